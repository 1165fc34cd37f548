//! Areas domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a production area
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Area {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Input model for creating or renaming an area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArea {
    #[serde(rename = "nome")]
    pub name: String,
}

impl NewArea {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Trims the name and rejects blanks.
    pub fn normalized(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingField("nome".to_string()).into());
        }
        Ok(Self { name })
    }
}
