use async_trait::async_trait;

use super::observacoes_model::{
    NewObservacao, Observacao, ObservacaoFilter, ObservacaoUpdate, ObservacaoView,
};
use crate::errors::Result;
use crate::users::RequestContext;

/// Trait for observacao repository operations
#[async_trait]
pub trait ObservacaoRepositoryTrait: Send + Sync {
    /// Observacoes matching `filter`, most recent date first.
    fn list(&self, filter: &ObservacaoFilter) -> Result<Vec<Observacao>>;
    fn find_by_id(&self, observacao_id: &str) -> Result<Option<Observacao>>;
    async fn create(&self, new_observacao: NewObservacao) -> Result<Observacao>;
    async fn update(&self, observacao_id: &str, observacao: NewObservacao) -> Result<Observacao>;
    async fn delete(&self, observacao_id: &str) -> Result<usize>;
}

/// Trait for observacao service operations
#[async_trait]
pub trait ObservacaoServiceTrait: Send + Sync {
    fn list_observacoes(&self, filter: &ObservacaoFilter) -> Result<Vec<ObservacaoView>>;
    fn get_observacao(&self, observacao_id: &str) -> Result<ObservacaoView>;
    async fn create_observacao(
        &self,
        ctx: &RequestContext,
        new_observacao: NewObservacao,
    ) -> Result<ObservacaoView>;
    async fn update_observacao(
        &self,
        ctx: &RequestContext,
        observacao_id: &str,
        changes: ObservacaoUpdate,
    ) -> Result<ObservacaoView>;
    async fn delete_observacao(&self, ctx: &RequestContext, observacao_id: &str) -> Result<()>;
}
