use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use producao_core::metas::{Meta, MetaRepositoryTrait, NewMeta};
use producao_core::Result;

use super::model::{MetaChangesDB, MetaDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::metas;

pub struct MetaRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MetaRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn into_domain(rows: Vec<MetaDB>) -> Result<Vec<Meta>> {
    rows.into_iter().map(Meta::try_from).collect()
}

#[async_trait]
impl MetaRepositoryTrait for MetaRepository {
    fn list(&self) -> Result<Vec<Meta>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = metas::table
            .order((metas::area_id.asc(), metas::created_at.asc()))
            .select(MetaDB::as_select())
            .load(&mut conn)
            .into_core()?;
        into_domain(rows)
    }

    fn list_by_area(&self, area_id: &str) -> Result<Vec<Meta>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = metas::table
            .filter(metas::area_id.eq(area_id))
            .order((metas::data_vigencia.desc(), metas::created_at.desc()))
            .select(MetaDB::as_select())
            .load(&mut conn)
            .into_core()?;
        into_domain(rows)
    }

    fn find_by_id(&self, meta_id: &str) -> Result<Option<Meta>> {
        let mut conn = get_connection(&self.pool)?;
        metas::table
            .find(meta_id)
            .select(MetaDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Meta::try_from)
            .transpose()
    }

    async fn create(&self, new_meta: NewMeta) -> Result<Meta> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Meta> {
                let row = MetaDB::from_new(
                    Uuid::new_v4().to_string(),
                    new_meta,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(metas::table)
                    .values(&row)
                    .returning(MetaDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Meta::try_from(inserted)
            })
            .await
    }

    async fn update(&self, meta_id: &str, meta: NewMeta) -> Result<Meta> {
        let meta_id = meta_id.to_string();
        let changes = MetaChangesDB::from(meta);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Meta> {
                let updated = diesel::update(metas::table.find(meta_id))
                    .set(&changes)
                    .returning(MetaDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Meta::try_from(updated)
            })
            .await
    }

    async fn delete(&self, meta_id: &str) -> Result<usize> {
        let meta_id = meta_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(metas::table.find(meta_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDb;
    use chrono::NaiveDate;
    use producao_core::Error;
    use rust_decimal_macros::dec;

    fn new_meta(area_id: &str, effective: Option<NaiveDate>) -> NewMeta {
        NewMeta {
            name: "Meta".to_string(),
            area_id: area_id.to_string(),
            target_quantity: 100,
            unit_value: dec!(0.35),
            effective_date: effective,
        }
    }

    #[tokio::test]
    async fn test_unit_value_round_trips_exactly() {
        let db = TestDb::new();
        let (area, _) = db.seed_area_and_colaborador().await;
        let mut input = new_meta(&area.id, None);
        input.unit_value = dec!(1.125);
        let created = db.metas().create(input).await.unwrap();

        let read = db.metas().find_by_id(&created.id).unwrap().unwrap();
        assert_eq!(read.unit_value, dec!(1.125));
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_update_can_clear_effective_date() {
        let db = TestDb::new();
        let (area, _) = db.seed_area_and_colaborador().await;
        let created = db
            .metas()
            .create(new_meta(&area.id, NaiveDate::from_ymd_opt(2024, 1, 1)))
            .await
            .unwrap();

        let updated = db
            .metas()
            .update(&created.id, new_meta(&area.id, None))
            .await
            .unwrap();
        assert_eq!(updated.effective_date, None);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_meta_for_unknown_area_violates_foreign_key() {
        let db = TestDb::new();
        let err = db.metas().create(new_meta("ghost", None)).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[tokio::test]
    async fn test_list_by_area_puts_latest_effective_first() {
        let db = TestDb::new();
        let (area, _) = db.seed_area_and_colaborador().await;
        let repo = db.metas();
        repo.create(new_meta(&area.id, NaiveDate::from_ymd_opt(2024, 1, 1)))
            .await
            .unwrap();
        repo.create(new_meta(&area.id, NaiveDate::from_ymd_opt(2024, 6, 1)))
            .await
            .unwrap();

        let metas = repo.list_by_area(&area.id).unwrap();
        assert_eq!(metas.len(), 2);
        assert_eq!(metas[0].effective_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    }
}
