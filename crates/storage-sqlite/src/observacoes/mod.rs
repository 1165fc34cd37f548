//! SQLite storage implementation for observacoes.

mod model;
mod repository;

pub use model::ObservacaoDB;
pub use repository::ObservacaoRepository;
