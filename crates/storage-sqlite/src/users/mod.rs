//! SQLite storage implementation for dashboard users.

mod model;
mod repository;

pub use model::UserDB;
pub use repository::UserRepository;
