//! Areas module - production lines/departments.

mod areas_model;
mod areas_service;
mod areas_traits;

pub use areas_model::{Area, NewArea};
pub use areas_service::AreaService;
pub use areas_traits::{AreaRepositoryTrait, AreaServiceTrait};
