use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use producao_core::observacoes::{
    NewObservacao, Observacao, ObservacaoFilter, ObservacaoRepositoryTrait,
};
use producao_core::Result;

use super::model::ObservacaoDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::observacoes_colaborador::dsl as obs;

pub struct ObservacaoRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ObservacaoRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ObservacaoRepositoryTrait for ObservacaoRepository {
    fn list(&self, filter: &ObservacaoFilter) -> Result<Vec<Observacao>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = obs::observacoes_colaborador.into_boxed();

        if let Some(start) = filter.start_date {
            query = query.filter(obs::data.ge(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(obs::data.le(end));
        }
        if let Some(colaborador_id) = filter.colaborador_id.as_deref() {
            query = query.filter(obs::colaborador_id.eq(colaborador_id.to_string()));
        }
        if let Some(tipo) = filter.tipo {
            query = query.filter(obs::tipo_observacao.eq(tipo.as_str()));
        }

        query
            .order((obs::data.desc(), obs::id.asc()))
            .select(ObservacaoDB::as_select())
            .load(&mut conn)
            .into_core()?
            .into_iter()
            .map(Observacao::try_from)
            .collect()
    }

    fn find_by_id(&self, observacao_id: &str) -> Result<Option<Observacao>> {
        let mut conn = get_connection(&self.pool)?;
        obs::observacoes_colaborador
            .find(observacao_id)
            .select(ObservacaoDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Observacao::try_from)
            .transpose()
    }

    async fn create(&self, new_observacao: NewObservacao) -> Result<Observacao> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Observacao> {
                let row = ObservacaoDB::from_new(Uuid::new_v4().to_string(), new_observacao);
                let inserted = diesel::insert_into(obs::observacoes_colaborador)
                    .values(&row)
                    .returning(ObservacaoDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Observacao::try_from(inserted)
            })
            .await
    }

    async fn update(&self, observacao_id: &str, observacao: NewObservacao) -> Result<Observacao> {
        let row = ObservacaoDB::from_new(observacao_id.to_string(), observacao);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Observacao> {
                let updated = diesel::update(obs::observacoes_colaborador.find(row.id.clone()))
                    .set(&row)
                    .returning(ObservacaoDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Observacao::try_from(updated)
            })
            .await
    }

    async fn delete(&self, observacao_id: &str) -> Result<usize> {
        let observacao_id = observacao_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(obs::observacoes_colaborador.find(observacao_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
