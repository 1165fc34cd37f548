use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::metas_model::{Meta, MetaUpdate, NewMeta};
use super::metas_traits::{MetaRepositoryTrait, MetaServiceTrait};
use crate::areas::AreaRepositoryTrait;
use crate::errors::{Error, Result};
use crate::users::RequestContext;

/// Service for managing metas
pub struct MetaService {
    repository: Arc<dyn MetaRepositoryTrait>,
    area_repository: Arc<dyn AreaRepositoryTrait>,
}

impl MetaService {
    pub fn new(
        repository: Arc<dyn MetaRepositoryTrait>,
        area_repository: Arc<dyn AreaRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            area_repository,
        }
    }

    fn ensure_area_exists(&self, area_id: &str) -> Result<()> {
        self.area_repository
            .find_by_id(area_id)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found("Area", area_id))
    }
}

#[async_trait]
impl MetaServiceTrait for MetaService {
    fn get_metas(&self) -> Result<Vec<Meta>> {
        self.repository.list()
    }

    fn get_meta(&self, meta_id: &str) -> Result<Meta> {
        self.repository
            .find_by_id(meta_id)?
            .ok_or_else(|| Error::not_found("Meta", meta_id))
    }

    fn get_metas_by_area(&self, area_id: &str) -> Result<Vec<Meta>> {
        self.ensure_area_exists(area_id)?;
        self.repository.list_by_area(area_id)
    }

    async fn create_meta(&self, ctx: &RequestContext, mut new_meta: NewMeta) -> Result<Meta> {
        ctx.require_admin("manage metas")?;
        new_meta.name = new_meta.name.trim().to_string();
        new_meta.validate()?;
        self.ensure_area_exists(&new_meta.area_id)?;

        let meta = self.repository.create(new_meta).await?;
        info!(
            "Meta '{}' for area {} created: target {} at {} per unit, effective {:?}",
            meta.name, meta.area_id, meta.target_quantity, meta.unit_value, meta.effective_date
        );
        Ok(meta)
    }

    async fn update_meta(
        &self,
        ctx: &RequestContext,
        meta_id: &str,
        changes: MetaUpdate,
    ) -> Result<Meta> {
        ctx.require_admin("manage metas")?;
        let current = self.get_meta(meta_id)?;
        let mut merged = changes.apply_to(&current);
        merged.name = merged.name.trim().to_string();
        merged.validate()?;
        if merged.area_id != current.area_id {
            self.ensure_area_exists(&merged.area_id)?;
        }
        self.repository.update(meta_id, merged).await
    }

    async fn delete_meta(&self, ctx: &RequestContext, meta_id: &str) -> Result<()> {
        ctx.require_admin("manage metas")?;
        let meta = self.get_meta(meta_id)?;
        self.repository.delete(meta_id).await?;
        info!("Meta '{}' deleted", meta.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_ctx, standard_ctx, InMemoryLedger};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn new_meta(area_id: &str) -> NewMeta {
        NewMeta {
            name: "Meta diária".to_string(),
            area_id: area_id.to_string(),
            target_quantity: 100,
            unit_value: dec!(0.35),
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        }
    }

    fn service(store: &Arc<InMemoryLedger>) -> MetaService {
        MetaService::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_create_meta_for_missing_area_is_not_found() {
        let store = Arc::new(InMemoryLedger::default());
        let err = service(&store)
            .create_meta(&admin_ctx(), new_meta("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_meta_requires_admin() {
        let store = Arc::new(InMemoryLedger::default());
        let area = store.seed_area("Topo");
        let err = service(&store)
            .create_meta(&standard_ctx(), new_meta(&area.id))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_create_meta_rejects_non_positive_target() {
        let store = Arc::new(InMemoryLedger::default());
        let area = store.seed_area("Topo");
        let mut meta = new_meta(&area.id);
        meta.target_quantity = 0;
        assert!(matches!(
            service(&store).create_meta(&admin_ctx(), meta).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_meta_rejects_negative_unit_value() {
        let store = Arc::new(InMemoryLedger::default());
        let area = store.seed_area("Topo");
        let mut meta = new_meta(&area.id);
        meta.unit_value = dec!(-0.01);
        assert!(matches!(
            service(&store).create_meta(&admin_ctx(), meta).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_zero_unit_value_is_allowed() {
        let store = Arc::new(InMemoryLedger::default());
        let area = store.seed_area("Topo");
        let mut meta = new_meta(&area.id);
        meta.unit_value = dec!(0);
        let created = service(&store).create_meta(&admin_ctx(), meta).await.unwrap();
        assert_eq!(created.unit_value, dec!(0));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_untouched_fields() {
        let store = Arc::new(InMemoryLedger::default());
        let area = store.seed_area("Topo");
        let svc = service(&store);
        let created = svc.create_meta(&admin_ctx(), new_meta(&area.id)).await.unwrap();

        let updated = svc
            .update_meta(
                &admin_ctx(),
                &created.id,
                MetaUpdate {
                    target_quantity: Some(120),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.target_quantity, 120);
        assert_eq!(updated.unit_value, dec!(0.35));
        assert_eq!(updated.effective_date, created.effective_date);
        assert_eq!(updated.name, created.name);
    }

    #[tokio::test]
    async fn test_update_to_missing_area_is_not_found() {
        let store = Arc::new(InMemoryLedger::default());
        let area = store.seed_area("Topo");
        let svc = service(&store);
        let created = svc.create_meta(&admin_ctx(), new_meta(&area.id)).await.unwrap();
        let err = svc
            .update_meta(
                &admin_ctx(),
                &created.id,
                MetaUpdate {
                    area_id: Some("ghost".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_metas_by_area_filters() {
        let store = Arc::new(InMemoryLedger::default());
        let topo = store.seed_area("Topo");
        let fundo = store.seed_area("Fundo");
        let svc = service(&store);
        svc.create_meta(&admin_ctx(), new_meta(&topo.id)).await.unwrap();
        svc.create_meta(&admin_ctx(), new_meta(&fundo.id)).await.unwrap();

        let metas = svc.get_metas_by_area(&topo.id).unwrap();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].area_id, topo.id);
        assert!(matches!(
            svc.get_metas_by_area("ghost"),
            Err(Error::NotFound(_))
        ));
    }
}
