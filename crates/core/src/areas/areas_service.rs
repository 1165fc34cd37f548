use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::areas_model::{Area, NewArea};
use super::areas_traits::{AreaRepositoryTrait, AreaServiceTrait};
use crate::errors::{Error, Result};
use crate::users::RequestContext;

/// Service for managing production areas
pub struct AreaService {
    repository: Arc<dyn AreaRepositoryTrait>,
}

impl AreaService {
    pub fn new(repository: Arc<dyn AreaRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn ensure_name_available(&self, name: &str, current_id: Option<&str>) -> Result<()> {
        match self.repository.find_by_name(name)? {
            Some(existing) if Some(existing.id.as_str()) != current_id => Err(Error::Conflict(
                format!("An area named '{name}' already exists"),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl AreaServiceTrait for AreaService {
    fn get_areas(&self) -> Result<Vec<Area>> {
        self.repository.list()
    }

    fn get_area(&self, area_id: &str) -> Result<Area> {
        self.repository
            .find_by_id(area_id)?
            .ok_or_else(|| Error::not_found("Area", area_id))
    }

    async fn create_area(&self, ctx: &RequestContext, new_area: NewArea) -> Result<Area> {
        ctx.require_admin("manage areas")?;
        let new_area = new_area.normalized()?;
        self.ensure_name_available(&new_area.name, None)?;

        let area = self.repository.create(new_area).await?;
        info!("Area '{}' created by {}", area.name, ctx.user().username);
        Ok(area)
    }

    async fn update_area(
        &self,
        ctx: &RequestContext,
        area_id: &str,
        changes: NewArea,
    ) -> Result<Area> {
        ctx.require_admin("manage areas")?;
        let changes = changes.normalized()?;
        let mut area = self.get_area(area_id)?;
        self.ensure_name_available(&changes.name, Some(area_id))?;

        debug!("Renaming area {} from '{}' to '{}'", area.id, area.name, changes.name);
        area.name = changes.name;
        self.repository.update(area).await
    }

    async fn delete_area(&self, ctx: &RequestContext, area_id: &str) -> Result<()> {
        ctx.require_admin("manage areas")?;
        let area = self.get_area(area_id)?;
        if self.repository.has_dependents(area_id)? {
            return Err(Error::Conflict(format!(
                "Area '{}' still has metas or lancamentos and cannot be deleted",
                area.name
            )));
        }
        self.repository.delete(area_id).await?;
        info!("Area '{}' deleted by {}", area.name, ctx.user().username);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_ctx, standard_ctx, InMemoryLedger};
    use chrono::NaiveDate;

    fn service(store: &Arc<InMemoryLedger>) -> AreaService {
        AreaService::new(store.clone())
    }

    #[tokio::test]
    async fn test_create_area_trims_name() {
        let store = Arc::new(InMemoryLedger::default());
        let area = service(&store)
            .create_area(&admin_ctx(), NewArea::new("  Corte  "))
            .await
            .unwrap();
        assert_eq!(area.name, "Corte");
    }

    #[tokio::test]
    async fn test_create_area_requires_admin() {
        let store = Arc::new(InMemoryLedger::default());
        let err = service(&store)
            .create_area(&standard_ctx(), NewArea::new("Corte"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
        assert!(store.areas.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_area_rejects_blank_and_duplicate_names() {
        let store = Arc::new(InMemoryLedger::default());
        let svc = service(&store);
        assert!(matches!(
            svc.create_area(&admin_ctx(), NewArea::new("   ")).await,
            Err(Error::Validation(_))
        ));

        svc.create_area(&admin_ctx(), NewArea::new("Mesa")).await.unwrap();
        assert!(matches!(
            svc.create_area(&admin_ctx(), NewArea::new("Mesa")).await,
            Err(Error::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_rename_to_own_name_is_allowed() {
        let store = Arc::new(InMemoryLedger::default());
        let svc = service(&store);
        let area = svc.create_area(&admin_ctx(), NewArea::new("Mesa")).await.unwrap();
        let renamed = svc
            .update_area(&admin_ctx(), &area.id, NewArea::new("Mesa"))
            .await
            .unwrap();
        assert_eq!(renamed, area);
    }

    #[tokio::test]
    async fn test_rename_onto_other_area_conflicts() {
        let store = Arc::new(InMemoryLedger::default());
        let svc = service(&store);
        svc.create_area(&admin_ctx(), NewArea::new("Mesa")).await.unwrap();
        let topo = svc.create_area(&admin_ctx(), NewArea::new("Topo")).await.unwrap();
        let err = svc
            .update_area(&admin_ctx(), &topo.id, NewArea::new("Mesa"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_area_with_entries_conflicts() {
        let store = Arc::new(InMemoryLedger::default());
        let area = store.seed_area("Alça");
        let colaborador = store.seed_colaborador("Maria");
        store.seed_lancamento(
            &area.id,
            &colaborador.id,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            10,
        );

        let err = service(&store)
            .delete_area(&admin_ctx(), &area.id)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_area_is_not_found() {
        let store = Arc::new(InMemoryLedger::default());
        let err = service(&store)
            .delete_area(&admin_ctx(), "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_unused_area() {
        let store = Arc::new(InMemoryLedger::default());
        let area = store.seed_area("Fundo");
        service(&store).delete_area(&admin_ctx(), &area.id).await.unwrap();
        assert!(store.areas.read().unwrap().is_empty());
    }
}
