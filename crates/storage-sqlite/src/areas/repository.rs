use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use producao_core::areas::{Area, AreaRepositoryTrait, NewArea};
use producao_core::Result;

use super::model::AreaDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{areas, lancamentos_producao, metas};

pub struct AreaRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AreaRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AreaRepositoryTrait for AreaRepository {
    fn list(&self) -> Result<Vec<Area>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = areas::table
            .order(areas::nome.asc())
            .select(AreaDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Area::from).collect())
    }

    fn find_by_id(&self, area_id: &str) -> Result<Option<Area>> {
        let mut conn = get_connection(&self.pool)?;
        let row = areas::table
            .find(area_id)
            .select(AreaDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Area::from))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Area>> {
        let mut conn = get_connection(&self.pool)?;
        let row = areas::table
            .filter(areas::nome.eq(name))
            .select(AreaDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Area::from))
    }

    fn has_dependents(&self, area_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let has_metas = diesel::select(exists(metas::table.filter(metas::area_id.eq(area_id))))
            .get_result::<bool>(&mut conn)
            .into_core()?;
        if has_metas {
            return Ok(true);
        }
        diesel::select(exists(
            lancamentos_producao::table.filter(lancamentos_producao::area_id.eq(area_id)),
        ))
        .get_result::<bool>(&mut conn)
        .into_core()
    }

    async fn create(&self, new_area: NewArea) -> Result<Area> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Area> {
                let row = AreaDB {
                    id: Uuid::new_v4().to_string(),
                    nome: new_area.name,
                };
                let inserted = diesel::insert_into(areas::table)
                    .values(&row)
                    .returning(AreaDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Area::from(inserted))
            })
            .await
    }

    async fn update(&self, area: Area) -> Result<Area> {
        let row = AreaDB::from(area);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Area> {
                let updated = diesel::update(areas::table.find(row.id.clone()))
                    .set(&row)
                    .returning(AreaDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Area::from(updated))
            })
            .await
    }

    async fn delete(&self, area_id: &str) -> Result<usize> {
        let area_id = area_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(areas::table.find(area_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
