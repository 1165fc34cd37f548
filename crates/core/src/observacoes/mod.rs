//! Observacoes module - dated notes about a colaborador (vacation, absence...).

mod observacoes_model;
mod observacoes_service;
mod observacoes_traits;

pub use observacoes_model::{
    NewObservacao, Observacao, ObservacaoFilter, ObservacaoUpdate, ObservacaoView, TipoObservacao,
};
pub use observacoes_service::ObservacaoService;
pub use observacoes_traits::{ObservacaoRepositoryTrait, ObservacaoServiceTrait};
