//! SQLite storage implementation for areas.

mod model;
mod repository;

pub use model::AreaDB;
pub use repository::AreaRepository;
