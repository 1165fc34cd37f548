use chrono::NaiveDateTime;
use diesel::prelude::*;

use producao_core::users::{Role, User};
use producao_core::Error;

use crate::errors::StorageError;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl TryFrom<UserDB> for User {
    type Error = Error;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        let role = db.role.parse::<Role>().map_err(|_| {
            StorageError::CorruptValue(format!("users.role '{}' for {}", db.role, db.username))
        })?;
        Ok(Self {
            id: db.id,
            username: db.username,
            email: db.email,
            role,
            is_active: db.is_active,
            created_at: db.created_at,
            last_login: db.last_login,
            password_hash: db.password_hash,
        })
    }
}
