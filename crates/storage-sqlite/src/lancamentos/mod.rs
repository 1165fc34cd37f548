//! SQLite storage implementation for lancamentos.

mod model;
mod repository;

pub use model::{LancamentoChangesDB, LancamentoDB};
pub use repository::LancamentoRepository;
