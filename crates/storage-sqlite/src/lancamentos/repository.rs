use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use producao_core::lancamentos::{
    Lancamento, LancamentoFilter, LancamentoRepositoryTrait, NewLancamento,
};
use producao_core::Result;

use super::model::{LancamentoChangesDB, LancamentoDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::lancamentos_producao::dsl as lp;

pub struct LancamentoRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LancamentoRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl LancamentoRepositoryTrait for LancamentoRepository {
    fn list(&self, filter: &LancamentoFilter) -> Result<Vec<Lancamento>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = lp::lancamentos_producao.into_boxed();

        if let Some(start) = filter.start_date {
            query = query.filter(lp::data.ge(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(lp::data.le(end));
        }
        if let Some(area_id) = filter.area_id.as_deref() {
            query = query.filter(lp::area_id.eq(area_id.to_string()));
        }
        if let Some(colaborador_id) = filter.colaborador_id.as_deref() {
            query = query.filter(lp::colaborador_id.eq(colaborador_id.to_string()));
        }

        let rows = query
            .order((lp::data.desc(), lp::created_at.desc()))
            .select(LancamentoDB::as_select())
            .load(&mut conn)
            .into_core()?;
        debug!("Loaded {} lancamentos", rows.len());
        Ok(rows.into_iter().map(Lancamento::from).collect())
    }

    fn find_by_id(&self, lancamento_id: &str) -> Result<Option<Lancamento>> {
        let mut conn = get_connection(&self.pool)?;
        let row = lp::lancamentos_producao
            .find(lancamento_id)
            .select(LancamentoDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Lancamento::from))
    }

    fn find_duplicate(
        &self,
        colaborador_id: &str,
        area_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Lancamento>> {
        let mut conn = get_connection(&self.pool)?;
        let row = lp::lancamentos_producao
            .filter(lp::colaborador_id.eq(colaborador_id))
            .filter(lp::area_id.eq(area_id))
            .filter(lp::data.eq(date))
            .select(LancamentoDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Lancamento::from))
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        lp::lancamentos_producao
            .count()
            .get_result(&mut conn)
            .into_core()
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<Lancamento>> {
        let mut conn = get_connection(&self.pool)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = lp::lancamentos_producao
            .order((lp::data.desc(), lp::created_at.desc()))
            .limit(limit)
            .select(LancamentoDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Lancamento::from).collect())
    }

    async fn create(&self, new_lancamento: NewLancamento) -> Result<Lancamento> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Lancamento> {
                let row = LancamentoDB::from_new(
                    Uuid::new_v4().to_string(),
                    new_lancamento,
                    Utc::now().naive_utc(),
                );
                let inserted = diesel::insert_into(lp::lancamentos_producao)
                    .values(&row)
                    .returning(LancamentoDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Lancamento::from(inserted))
            })
            .await
    }

    async fn update(&self, lancamento_id: &str, lancamento: NewLancamento) -> Result<Lancamento> {
        let lancamento_id = lancamento_id.to_string();
        let changes = LancamentoChangesDB::from(lancamento);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Lancamento> {
                let updated = diesel::update(lp::lancamentos_producao.find(lancamento_id))
                    .set(&changes)
                    .returning(LancamentoDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Lancamento::from(updated))
            })
            .await
    }

    async fn delete(&self, lancamento_id: &str) -> Result<usize> {
        let lancamento_id = lancamento_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(lp::lancamentos_producao.find(lancamento_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
