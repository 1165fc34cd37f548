use async_trait::async_trait;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use super::observacoes_model::{
    NewObservacao, Observacao, ObservacaoFilter, ObservacaoUpdate, ObservacaoView,
};
use super::observacoes_traits::{ObservacaoRepositoryTrait, ObservacaoServiceTrait};
use crate::colaboradores::ColaboradorRepositoryTrait;
use crate::errors::{Error, Result};
use crate::users::RequestContext;

pub struct ObservacaoService {
    repository: Arc<dyn ObservacaoRepositoryTrait>,
    colaborador_repository: Arc<dyn ColaboradorRepositoryTrait>,
}

impl ObservacaoService {
    pub fn new(
        repository: Arc<dyn ObservacaoRepositoryTrait>,
        colaborador_repository: Arc<dyn ColaboradorRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            colaborador_repository,
        }
    }

    fn find(&self, observacao_id: &str) -> Result<Observacao> {
        self.repository
            .find_by_id(observacao_id)?
            .ok_or_else(|| Error::not_found("Observacao", observacao_id))
    }

    fn colaborador_name(&self, colaborador_id: &str) -> Result<Option<String>> {
        Ok(self
            .colaborador_repository
            .find_by_id(colaborador_id)?
            .map(|colaborador| colaborador.name))
    }

    fn checked_input(&self, observacao: NewObservacao) -> Result<(NewObservacao, String)> {
        let observacao = observacao.normalized()?;
        let name = self
            .colaborador_name(&observacao.colaborador_id)?
            .ok_or_else(|| Error::not_found("Colaborador", &observacao.colaborador_id))?;
        Ok((observacao, name))
    }
}

#[async_trait]
impl ObservacaoServiceTrait for ObservacaoService {
    fn list_observacoes(&self, filter: &ObservacaoFilter) -> Result<Vec<ObservacaoView>> {
        filter.validate()?;
        let names: HashMap<String, String> = self
            .colaborador_repository
            .list()?
            .into_iter()
            .map(|colaborador| (colaborador.id, colaborador.name))
            .collect();
        Ok(self
            .repository
            .list(filter)?
            .into_iter()
            .map(|observacao| ObservacaoView {
                colaborador_nome: names.get(&observacao.colaborador_id).cloned(),
                observacao,
            })
            .collect())
    }

    fn get_observacao(&self, observacao_id: &str) -> Result<ObservacaoView> {
        let observacao = self.find(observacao_id)?;
        Ok(ObservacaoView {
            colaborador_nome: self.colaborador_name(&observacao.colaborador_id)?,
            observacao,
        })
    }

    async fn create_observacao(
        &self,
        ctx: &RequestContext,
        new_observacao: NewObservacao,
    ) -> Result<ObservacaoView> {
        ctx.require_admin("manage observacoes")?;
        let (new_observacao, colaborador_nome) = self.checked_input(new_observacao)?;
        let observacao = self.repository.create(new_observacao).await?;
        info!(
            "Observacao '{}' on {} recorded for {}",
            observacao.tipo, observacao.date, colaborador_nome
        );
        Ok(ObservacaoView {
            observacao,
            colaborador_nome: Some(colaborador_nome),
        })
    }

    async fn update_observacao(
        &self,
        ctx: &RequestContext,
        observacao_id: &str,
        changes: ObservacaoUpdate,
    ) -> Result<ObservacaoView> {
        ctx.require_admin("manage observacoes")?;
        let current = self.find(observacao_id)?;
        let (merged, colaborador_nome) = self.checked_input(changes.apply_to(&current))?;
        let observacao = self.repository.update(observacao_id, merged).await?;
        Ok(ObservacaoView {
            observacao,
            colaborador_nome: Some(colaborador_nome),
        })
    }

    async fn delete_observacao(&self, ctx: &RequestContext, observacao_id: &str) -> Result<()> {
        ctx.require_admin("manage observacoes")?;
        self.find(observacao_id)?;
        self.repository.delete(observacao_id).await?;
        info!("Observacao {} deleted", observacao_id);
        Ok(())
    }
}
