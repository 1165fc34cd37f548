use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use producao_core::users::{NewUser, Role, User, UserRepositoryTrait};
use producao_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(User::try_from)
            .transpose()
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .filter(users::username.eq(username))
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(User::try_from)
            .transpose()
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(User::try_from)
            .transpose()
    }

    fn admin_exists(&self) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(exists(
            users::table.filter(users::role.eq(Role::Admin.as_str())),
        ))
        .get_result(&mut conn)
        .into_core()
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row = UserDB {
                    id: Uuid::new_v4().to_string(),
                    username: new_user.username,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    role: new_user.role.as_str().to_string(),
                    is_active: true,
                    created_at: Utc::now().naive_utc(),
                    last_login: None,
                };
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                User::try_from(inserted)
            })
            .await
    }

    async fn record_login(&self, user_id: &str, at: NaiveDateTime) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let updated = diesel::update(users::table.find(user_id))
                    .set(users::last_login.eq(Some(at)))
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                User::try_from(updated)
            })
            .await
    }
}
