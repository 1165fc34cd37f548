use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::users_model::{NewUser, Role, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .find_by_id(user_id)?
            .ok_or_else(|| Error::not_found("User", user_id))
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repository.find_by_username(username.trim())
    }

    async fn create_admin(&self, mut new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        new_user.username = new_user.username.trim().to_string();
        new_user.email = new_user.email.trim().to_string();
        new_user.role = Role::Admin;

        if self.repository.admin_exists()? {
            return Err(Error::Conflict(
                "An administrator account already exists".to_string(),
            ));
        }
        if self.repository.find_by_username(&new_user.username)?.is_some() {
            return Err(Error::Conflict(format!(
                "Username '{}' already exists",
                new_user.username
            )));
        }
        if self.repository.find_by_email(&new_user.email)?.is_some() {
            return Err(Error::Conflict(format!(
                "Email '{}' already exists",
                new_user.email
            )));
        }

        let user = self.repository.create(new_user).await?;
        info!("Created administrator '{}'", user.username);
        Ok(user)
    }

    async fn record_login(&self, user_id: &str) -> Result<User> {
        self.repository
            .record_login(user_id, chrono::Utc::now().naive_utc())
            .await
    }
}
