use async_trait::async_trait;

use super::metas_model::{Meta, MetaUpdate, NewMeta};
use crate::errors::Result;
use crate::users::RequestContext;

/// Trait for meta repository operations
#[async_trait]
pub trait MetaRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Meta>>;
    fn list_by_area(&self, area_id: &str) -> Result<Vec<Meta>>;
    fn find_by_id(&self, meta_id: &str) -> Result<Option<Meta>>;
    async fn create(&self, new_meta: NewMeta) -> Result<Meta>;
    async fn update(&self, meta_id: &str, meta: NewMeta) -> Result<Meta>;
    async fn delete(&self, meta_id: &str) -> Result<usize>;
}

/// Trait for meta service operations
#[async_trait]
pub trait MetaServiceTrait: Send + Sync {
    fn get_metas(&self) -> Result<Vec<Meta>>;
    fn get_meta(&self, meta_id: &str) -> Result<Meta>;
    fn get_metas_by_area(&self, area_id: &str) -> Result<Vec<Meta>>;
    async fn create_meta(&self, ctx: &RequestContext, new_meta: NewMeta) -> Result<Meta>;
    async fn update_meta(
        &self,
        ctx: &RequestContext,
        meta_id: &str,
        changes: MetaUpdate,
    ) -> Result<Meta>;
    async fn delete_meta(&self, ctx: &RequestContext, meta_id: &str) -> Result<()>;
}
