use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::users_model::{NewUser, User};
use crate::errors::Result;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn admin_exists(&self) -> Result<bool>;
    async fn create(&self, new_user: NewUser) -> Result<User>;
    async fn record_login(&self, user_id: &str, at: NaiveDateTime) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;

    /// Looks up a login candidate. Inactive users are returned so the caller
    /// can report them distinctly from bad credentials.
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Creates the first administrator. Fails once any admin exists.
    async fn create_admin(&self, new_user: NewUser) -> Result<User>;

    async fn record_login(&self, user_id: &str) -> Result<User>;
}
