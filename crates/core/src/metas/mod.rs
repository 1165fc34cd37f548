//! Metas module - production goals per area.

mod metas_model;
mod metas_service;
mod metas_traits;

pub use metas_model::{Meta, MetaUpdate, NewMeta};
pub use metas_service::MetaService;
pub use metas_traits::{MetaRepositoryTrait, MetaServiceTrait};
