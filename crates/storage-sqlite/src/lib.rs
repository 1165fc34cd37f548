//! SQLite storage implementation for the production ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `producao-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! Reads use pooled connections. Every write goes through the single writer
//! actor ([`WriteHandle`]) so SQLite never sees concurrent writers.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod areas;
pub mod colaboradores;
pub mod lancamentos;
pub mod metas;
pub mod observacoes;
pub mod users;

#[cfg(test)]
mod test_utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from producao-core for convenience
pub use producao_core::errors::{DatabaseError, Error, Result};
