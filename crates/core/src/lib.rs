//! Producao Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the production ledger: areas,
//! colaboradores, metas, lancamentos and observacoes, plus the balance
//! calculator and report aggregator. It is database-agnostic and defines
//! traits that are implemented by the `storage-sqlite` crate.

pub mod areas;
pub mod colaboradores;
pub mod constants;
pub mod errors;
pub mod lancamentos;
pub mod metas;
pub mod observacoes;
pub mod reports;
pub mod users;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
