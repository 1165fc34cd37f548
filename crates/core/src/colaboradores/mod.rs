//! Colaboradores module - workers that record production.

mod colaboradores_model;
mod colaboradores_service;
mod colaboradores_traits;

pub use colaboradores_model::{Colaborador, NewColaborador};
pub use colaboradores_service::ColaboradorService;
pub use colaboradores_traits::{ColaboradorRepositoryTrait, ColaboradorServiceTrait};
