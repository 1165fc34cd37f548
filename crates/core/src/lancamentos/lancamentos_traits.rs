use async_trait::async_trait;
use chrono::NaiveDate;

use super::lancamentos_model::{
    Lancamento, LancamentoFilter, LancamentoUpdate, LancamentoView, NewLancamento,
};
use crate::errors::Result;
use crate::users::RequestContext;

/// Trait for lancamento repository operations
#[async_trait]
pub trait LancamentoRepositoryTrait: Send + Sync {
    /// Entries matching `filter`, most recent date first.
    fn list(&self, filter: &LancamentoFilter) -> Result<Vec<Lancamento>>;
    fn find_by_id(&self, lancamento_id: &str) -> Result<Option<Lancamento>>;

    /// The entry already recorded for this colaborador, area and date, if any.
    fn find_duplicate(
        &self,
        colaborador_id: &str,
        area_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Lancamento>>;

    fn count(&self) -> Result<i64>;

    /// The `limit` most recent entries, in `list` order.
    fn list_recent(&self, limit: usize) -> Result<Vec<Lancamento>>;

    async fn create(&self, new_lancamento: NewLancamento) -> Result<Lancamento>;
    async fn update(&self, lancamento_id: &str, lancamento: NewLancamento) -> Result<Lancamento>;
    async fn delete(&self, lancamento_id: &str) -> Result<usize>;
}

/// Trait for lancamento service operations.
///
/// Reads return [`LancamentoView`]s: the stored entry plus resolved names and
/// the balance computed against the meta in force on the entry date.
#[async_trait]
pub trait LancamentoServiceTrait: Send + Sync {
    fn list_lancamentos(&self, filter: &LancamentoFilter) -> Result<Vec<LancamentoView>>;
    fn get_lancamento(&self, lancamento_id: &str) -> Result<LancamentoView>;
    fn recent_lancamentos(&self, limit: usize) -> Result<Vec<LancamentoView>>;
    async fn create_lancamento(
        &self,
        ctx: &RequestContext,
        new_lancamento: NewLancamento,
    ) -> Result<LancamentoView>;
    async fn update_lancamento(
        &self,
        ctx: &RequestContext,
        lancamento_id: &str,
        changes: LancamentoUpdate,
    ) -> Result<LancamentoView>;
    async fn delete_lancamento(&self, ctx: &RequestContext, lancamento_id: &str) -> Result<()>;
}
