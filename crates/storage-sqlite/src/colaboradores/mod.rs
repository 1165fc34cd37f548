//! SQLite storage implementation for colaboradores.

mod model;
mod repository;

pub use model::ColaboradorDB;
pub use repository::ColaboradorRepository;
