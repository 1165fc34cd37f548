//! User, role and request-context models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};

/// Role attached to a user. Governs which mutations are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[default]
    #[serde(rename = "user", alias = "standard")]
    Standard,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Standard => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn permissions(&self) -> Permissions {
        let admin = self.is_admin();
        Permissions {
            can_manage_metas: admin,
            can_create_lancamentos: true,
            can_view_all_lancamentos: admin,
            can_manage_areas: admin,
            can_manage_colaboradores: admin,
            can_manage_observacoes: admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" | "standard" => Ok(Role::Standard),
            other => Err(Error::invalid_input(format!("Unknown role '{other}'"))),
        }
    }
}

/// Capability flags derived from a [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub can_manage_metas: bool,
    pub can_create_lancamentos: bool,
    pub can_view_all_lancamentos: bool,
    pub can_manage_areas: bool,
    pub can_manage_colaboradores: bool,
    pub can_manage_observacoes: bool,
}

/// Domain model representing a dashboard user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
    /// Argon2 PHC string. Never leaves the server.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Input model for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username".to_string()).into());
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingField("email".to_string()).into());
        }
        if !email.contains('@') {
            return Err(Error::invalid_input(format!("Invalid email '{email}'")));
        }
        if self.password_hash.is_empty() {
            return Err(ValidationError::MissingField("password".to_string()).into());
        }
        Ok(())
    }
}

/// Explicit per-request identity, built by the transport layer from the
/// session and handed to every service call that mutates data.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    user: User,
}

impl RequestContext {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn permissions(&self) -> Permissions {
        self.user.role.permissions()
    }

    /// Fails with [`Error::Unauthorized`] unless the acting user is an admin.
    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.user.role.is_admin() {
            Ok(())
        } else {
            Err(Error::Unauthorized(format!(
                "Access denied: only administrators can {action}"
            )))
        }
    }

    pub fn require_entry_access(&self) -> Result<()> {
        if self.permissions().can_create_lancamentos {
            Ok(())
        } else {
            Err(Error::Unauthorized(
                "Access denied: you are not allowed to record entries".to_string(),
            ))
        }
    }
}
