use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

use super::balance_calculator::{payable_value, select_active_meta, BalanceCalculator};
use super::lancamentos_model::{
    Lancamento, LancamentoFilter, LancamentoUpdate, LancamentoView, NewLancamento,
};
use super::lancamentos_traits::{LancamentoRepositoryTrait, LancamentoServiceTrait};
use crate::areas::AreaRepositoryTrait;
use crate::colaboradores::ColaboradorRepositoryTrait;
use crate::errors::{Error, Result};
use crate::metas::MetaRepositoryTrait;
use crate::users::RequestContext;

/// Service for recording production entries and reading them back with
/// their computed balance.
pub struct LancamentoService {
    repository: Arc<dyn LancamentoRepositoryTrait>,
    area_repository: Arc<dyn AreaRepositoryTrait>,
    colaborador_repository: Arc<dyn ColaboradorRepositoryTrait>,
    meta_repository: Arc<dyn MetaRepositoryTrait>,
}

impl LancamentoService {
    pub fn new(
        repository: Arc<dyn LancamentoRepositoryTrait>,
        area_repository: Arc<dyn AreaRepositoryTrait>,
        colaborador_repository: Arc<dyn ColaboradorRepositoryTrait>,
        meta_repository: Arc<dyn MetaRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            area_repository,
            colaborador_repository,
            meta_repository,
        }
    }

    fn ensure_references(&self, entry: &NewLancamento) -> Result<()> {
        if self.area_repository.find_by_id(&entry.area_id)?.is_none() {
            return Err(Error::not_found("Area", &entry.area_id));
        }
        if self
            .colaborador_repository
            .find_by_id(&entry.colaborador_id)?
            .is_none()
        {
            return Err(Error::not_found("Colaborador", &entry.colaborador_id));
        }
        Ok(())
    }

    fn ensure_not_duplicate(&self, entry: &NewLancamento, current_id: Option<&str>) -> Result<()> {
        match self
            .repository
            .find_duplicate(&entry.colaborador_id, &entry.area_id, entry.date)?
        {
            Some(existing) if Some(existing.id.as_str()) != current_id => {
                Err(Error::Conflict(format!(
                    "A lancamento for this colaborador and area on {} already exists",
                    entry.date
                )))
            }
            _ => Ok(()),
        }
    }

    /// Fails if the entry's payable value cannot be computed against the meta
    /// in force for it. Runs before any write.
    fn ensure_balance_computable(&self, entry: &NewLancamento) -> Result<()> {
        let metas = self.meta_repository.list_by_area(&entry.area_id)?;
        if let Some(meta) = select_active_meta(&metas, &entry.area_id, entry.date) {
            payable_value(entry.quantity_done, meta.unit_value)?;
        }
        Ok(())
    }

    fn find(&self, lancamento_id: &str) -> Result<Lancamento> {
        self.repository
            .find_by_id(lancamento_id)?
            .ok_or_else(|| Error::not_found("Lancamento", lancamento_id))
    }

    /// Resolves names and balances for a batch of entries. Either every entry
    /// is enriched or the whole call fails.
    fn enrich(&self, entries: Vec<Lancamento>) -> Result<Vec<LancamentoView>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let area_names: HashMap<String, String> = self
            .area_repository
            .list()?
            .into_iter()
            .map(|area| (area.id, area.name))
            .collect();
        let colaborador_names: HashMap<String, String> = self
            .colaborador_repository
            .list()?
            .into_iter()
            .map(|colaborador| (colaborador.id, colaborador.name))
            .collect();
        let metas = self.meta_repository.list()?;
        let calculator = BalanceCalculator::new(&metas);

        entries
            .into_iter()
            .map(|lancamento| {
                let balance = calculator.balance_for(&lancamento)?;
                let area_nome = area_names
                    .get(&lancamento.area_id)
                    .cloned()
                    .unwrap_or_default();
                let colaborador_nome = colaborador_names
                    .get(&lancamento.colaborador_id)
                    .cloned()
                    .unwrap_or_default();
                Ok(LancamentoView {
                    lancamento,
                    area_nome,
                    colaborador_nome,
                    balance,
                })
            })
            .collect()
    }

    fn enrich_one(&self, lancamento: Lancamento) -> Result<LancamentoView> {
        let id = lancamento.id.clone();
        self.enrich(vec![lancamento])?
            .pop()
            .ok_or_else(|| Error::Unexpected(format!("Lancamento {id} vanished during enrichment")))
    }
}

#[async_trait]
impl LancamentoServiceTrait for LancamentoService {
    fn list_lancamentos(&self, filter: &LancamentoFilter) -> Result<Vec<LancamentoView>> {
        filter.validate()?;
        let entries = self.repository.list(filter)?;
        debug!("Enriching {} lancamentos for {:?}", entries.len(), filter);
        self.enrich(entries)
    }

    fn get_lancamento(&self, lancamento_id: &str) -> Result<LancamentoView> {
        let lancamento = self.find(lancamento_id)?;
        self.enrich_one(lancamento)
    }

    fn recent_lancamentos(&self, limit: usize) -> Result<Vec<LancamentoView>> {
        let entries = self.repository.list_recent(limit)?;
        self.enrich(entries)
    }

    async fn create_lancamento(
        &self,
        ctx: &RequestContext,
        new_lancamento: NewLancamento,
    ) -> Result<LancamentoView> {
        ctx.require_entry_access()?;
        new_lancamento.validate()?;
        self.ensure_references(&new_lancamento)?;
        self.ensure_not_duplicate(&new_lancamento, None)?;
        self.ensure_balance_computable(&new_lancamento)?;

        let lancamento = self.repository.create(new_lancamento).await?;
        info!(
            "Lancamento {} recorded by {}: colaborador {} area {} on {} qty {}",
            lancamento.id,
            ctx.user().username,
            lancamento.colaborador_id,
            lancamento.area_id,
            lancamento.date,
            lancamento.quantity_done
        );
        self.enrich_one(lancamento)
    }

    async fn update_lancamento(
        &self,
        ctx: &RequestContext,
        lancamento_id: &str,
        changes: LancamentoUpdate,
    ) -> Result<LancamentoView> {
        ctx.require_entry_access()?;
        let current = self.find(lancamento_id)?;
        let merged = changes.apply_to(&current);
        merged.validate()?;
        self.ensure_references(&merged)?;
        self.ensure_not_duplicate(&merged, Some(lancamento_id))?;
        self.ensure_balance_computable(&merged)?;

        let lancamento = self.repository.update(lancamento_id, merged).await?;
        self.enrich_one(lancamento)
    }

    async fn delete_lancamento(&self, ctx: &RequestContext, lancamento_id: &str) -> Result<()> {
        ctx.require_entry_access()?;
        self.find(lancamento_id)?;
        self.repository.delete(lancamento_id).await?;
        info!("Lancamento {} deleted by {}", lancamento_id, ctx.user().username);
        Ok(())
    }
}
