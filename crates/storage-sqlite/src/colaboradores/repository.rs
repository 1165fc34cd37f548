use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use producao_core::colaboradores::{Colaborador, ColaboradorRepositoryTrait, NewColaborador};
use producao_core::Result;

use super::model::ColaboradorDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{colaboradores, lancamentos_producao, observacoes_colaborador};

pub struct ColaboradorRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ColaboradorRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ColaboradorRepositoryTrait for ColaboradorRepository {
    fn list(&self) -> Result<Vec<Colaborador>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = colaboradores::table
            .order(colaboradores::nome.asc())
            .select(ColaboradorDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Colaborador::from).collect())
    }

    fn find_by_id(&self, colaborador_id: &str) -> Result<Option<Colaborador>> {
        let mut conn = get_connection(&self.pool)?;
        let row = colaboradores::table
            .find(colaborador_id)
            .select(ColaboradorDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Colaborador::from))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Colaborador>> {
        let mut conn = get_connection(&self.pool)?;
        let row = colaboradores::table
            .filter(colaboradores::nome.eq(name))
            .select(ColaboradorDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Colaborador::from))
    }

    fn has_dependents(&self, colaborador_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let has_entries = diesel::select(exists(
            lancamentos_producao::table
                .filter(lancamentos_producao::colaborador_id.eq(colaborador_id)),
        ))
        .get_result::<bool>(&mut conn)
        .into_core()?;
        if has_entries {
            return Ok(true);
        }
        diesel::select(exists(
            observacoes_colaborador::table
                .filter(observacoes_colaborador::colaborador_id.eq(colaborador_id)),
        ))
        .get_result::<bool>(&mut conn)
        .into_core()
    }

    async fn create(&self, new_colaborador: NewColaborador) -> Result<Colaborador> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Colaborador> {
                let row = ColaboradorDB {
                    id: Uuid::new_v4().to_string(),
                    nome: new_colaborador.name,
                };
                let inserted = diesel::insert_into(colaboradores::table)
                    .values(&row)
                    .returning(ColaboradorDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Colaborador::from(inserted))
            })
            .await
    }

    async fn update(&self, colaborador: Colaborador) -> Result<Colaborador> {
        let row = ColaboradorDB::from(colaborador);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Colaborador> {
                let updated = diesel::update(colaboradores::table.find(row.id.clone()))
                    .set(&row)
                    .returning(ColaboradorDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Colaborador::from(updated))
            })
            .await
    }

    async fn delete(&self, colaborador_id: &str) -> Result<usize> {
        let colaborador_id = colaborador_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(colaboradores::table.find(colaborador_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
