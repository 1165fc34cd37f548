use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::colaboradores_model::{Colaborador, NewColaborador};
use super::colaboradores_traits::{ColaboradorRepositoryTrait, ColaboradorServiceTrait};
use crate::errors::{Error, Result};
use crate::users::RequestContext;

pub struct ColaboradorService {
    repository: Arc<dyn ColaboradorRepositoryTrait>,
}

impl ColaboradorService {
    pub fn new(repository: Arc<dyn ColaboradorRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn ensure_name_available(&self, name: &str, current_id: Option<&str>) -> Result<()> {
        match self.repository.find_by_name(name)? {
            Some(existing) if Some(existing.id.as_str()) != current_id => Err(Error::Conflict(
                format!("A colaborador named '{name}' already exists"),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ColaboradorServiceTrait for ColaboradorService {
    fn get_colaboradores(&self) -> Result<Vec<Colaborador>> {
        self.repository.list()
    }

    fn get_colaborador(&self, colaborador_id: &str) -> Result<Colaborador> {
        self.repository
            .find_by_id(colaborador_id)?
            .ok_or_else(|| Error::not_found("Colaborador", colaborador_id))
    }

    async fn create_colaborador(
        &self,
        ctx: &RequestContext,
        new_colaborador: NewColaborador,
    ) -> Result<Colaborador> {
        ctx.require_admin("manage colaboradores")?;
        let new_colaborador = new_colaborador.normalized()?;
        self.ensure_name_available(&new_colaborador.name, None)?;
        let colaborador = self.repository.create(new_colaborador).await?;
        info!("Colaborador '{}' created", colaborador.name);
        Ok(colaborador)
    }

    async fn update_colaborador(
        &self,
        ctx: &RequestContext,
        colaborador_id: &str,
        changes: NewColaborador,
    ) -> Result<Colaborador> {
        ctx.require_admin("manage colaboradores")?;
        let changes = changes.normalized()?;
        let mut colaborador = self.get_colaborador(colaborador_id)?;
        self.ensure_name_available(&changes.name, Some(colaborador_id))?;
        colaborador.name = changes.name;
        self.repository.update(colaborador).await
    }

    async fn delete_colaborador(&self, ctx: &RequestContext, colaborador_id: &str) -> Result<()> {
        ctx.require_admin("manage colaboradores")?;
        let colaborador = self.get_colaborador(colaborador_id)?;
        if self.repository.has_dependents(colaborador_id)? {
            return Err(Error::Conflict(format!(
                "Colaborador '{}' still has lancamentos or observacoes and cannot be deleted",
                colaborador.name
            )));
        }
        self.repository.delete(colaborador_id).await?;
        info!("Colaborador '{}' deleted", colaborador.name);
        Ok(())
    }
}
