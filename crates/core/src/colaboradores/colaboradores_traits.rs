use async_trait::async_trait;

use super::colaboradores_model::{Colaborador, NewColaborador};
use crate::errors::Result;
use crate::users::RequestContext;

/// Trait for colaborador repository operations
#[async_trait]
pub trait ColaboradorRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Colaborador>>;
    fn find_by_id(&self, colaborador_id: &str) -> Result<Option<Colaborador>>;
    fn find_by_name(&self, name: &str) -> Result<Option<Colaborador>>;

    /// True when lancamentos or observacoes still reference the worker.
    fn has_dependents(&self, colaborador_id: &str) -> Result<bool>;

    async fn create(&self, new_colaborador: NewColaborador) -> Result<Colaborador>;
    async fn update(&self, colaborador: Colaborador) -> Result<Colaborador>;
    async fn delete(&self, colaborador_id: &str) -> Result<usize>;
}

/// Trait for colaborador service operations
#[async_trait]
pub trait ColaboradorServiceTrait: Send + Sync {
    fn get_colaboradores(&self) -> Result<Vec<Colaborador>>;
    fn get_colaborador(&self, colaborador_id: &str) -> Result<Colaborador>;
    async fn create_colaborador(
        &self,
        ctx: &RequestContext,
        new_colaborador: NewColaborador,
    ) -> Result<Colaborador>;
    async fn update_colaborador(
        &self,
        ctx: &RequestContext,
        colaborador_id: &str,
        changes: NewColaborador,
    ) -> Result<Colaborador>;
    async fn delete_colaborador(&self, ctx: &RequestContext, colaborador_id: &str) -> Result<()>;
}
