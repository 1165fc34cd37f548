//! SQLite storage implementation for metas.

mod model;
mod repository;

pub use model::{MetaChangesDB, MetaDB};
pub use repository::MetaRepository;
