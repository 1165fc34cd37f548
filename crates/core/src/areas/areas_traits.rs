use async_trait::async_trait;

use super::areas_model::{Area, NewArea};
use crate::errors::Result;
use crate::users::RequestContext;

/// Trait for area repository operations
#[async_trait]
pub trait AreaRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Area>>;
    fn find_by_id(&self, area_id: &str) -> Result<Option<Area>>;
    fn find_by_name(&self, name: &str) -> Result<Option<Area>>;

    /// True when metas or lancamentos still reference the area.
    fn has_dependents(&self, area_id: &str) -> Result<bool>;

    async fn create(&self, new_area: NewArea) -> Result<Area>;
    async fn update(&self, area: Area) -> Result<Area>;
    async fn delete(&self, area_id: &str) -> Result<usize>;
}

/// Trait for area service operations
#[async_trait]
pub trait AreaServiceTrait: Send + Sync {
    fn get_areas(&self) -> Result<Vec<Area>>;
    fn get_area(&self, area_id: &str) -> Result<Area>;
    async fn create_area(&self, ctx: &RequestContext, new_area: NewArea) -> Result<Area>;
    async fn update_area(
        &self,
        ctx: &RequestContext,
        area_id: &str,
        changes: NewArea,
    ) -> Result<Area>;
    async fn delete_area(&self, ctx: &RequestContext, area_id: &str) -> Result<()>;
}
