use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a worker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Colaborador {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewColaborador {
    #[serde(rename = "nome")]
    pub name: String,
}

impl NewColaborador {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn normalized(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingField("nome".to_string()).into());
        }
        Ok(Self { name })
    }
}
