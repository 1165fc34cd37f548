//! Observacoes domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};
use crate::utils::DateRange;

/// Kind of observation. Serialized with the labels the dashboard displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipoObservacao {
    #[serde(rename = "férias")]
    Vacation,
    #[serde(rename = "falta")]
    Absence,
    #[serde(rename = "treinamento")]
    Training,
    #[serde(rename = "atestado")]
    MedicalLeave,
    #[serde(rename = "licença")]
    Leave,
    #[serde(rename = "outros")]
    Other,
}

impl TipoObservacao {
    pub const ALL: [TipoObservacao; 6] = [
        TipoObservacao::Vacation,
        TipoObservacao::Absence,
        TipoObservacao::Training,
        TipoObservacao::MedicalLeave,
        TipoObservacao::Leave,
        TipoObservacao::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoObservacao::Vacation => "férias",
            TipoObservacao::Absence => "falta",
            TipoObservacao::Training => "treinamento",
            TipoObservacao::MedicalLeave => "atestado",
            TipoObservacao::Leave => "licença",
            TipoObservacao::Other => "outros",
        }
    }
}

impl fmt::Display for TipoObservacao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoObservacao {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|tipo| tipo.as_str() == label)
            .ok_or_else(|| {
                let accepted: Vec<&str> = Self::ALL.iter().map(|tipo| tipo.as_str()).collect();
                Error::invalid_input(format!(
                    "tipo_observacao must be one of: {} (got '{label}')",
                    accepted.join(", ")
                ))
            })
    }
}

/// Domain model representing a note about a colaborador on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observacao {
    pub id: String,
    pub colaborador_id: String,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "tipo_observacao")]
    pub tipo: TipoObservacao,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}

/// Input model for creating an observacao
#[derive(Debug, Clone, PartialEq)]
pub struct NewObservacao {
    pub colaborador_id: String,
    pub date: NaiveDate,
    pub tipo: TipoObservacao,
    pub description: Option<String>,
}

impl NewObservacao {
    /// Requires a colaborador and drops blank descriptions.
    pub fn normalized(mut self) -> Result<Self> {
        if self.colaborador_id.trim().is_empty() {
            return Err(ValidationError::MissingField("colaborador_id".to_string()).into());
        }
        self.description = self
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        Ok(self)
    }
}

/// Partial update. `description: Some(None)` clears the stored text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservacaoUpdate {
    pub colaborador_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub tipo: Option<TipoObservacao>,
    pub description: Option<Option<String>>,
}

impl ObservacaoUpdate {
    pub fn apply_to(self, current: &Observacao) -> NewObservacao {
        NewObservacao {
            colaborador_id: self
                .colaborador_id
                .unwrap_or_else(|| current.colaborador_id.clone()),
            date: self.date.unwrap_or(current.date),
            tipo: self.tipo.unwrap_or(current.tipo),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
        }
    }
}

/// An observacao with its colaborador's name resolved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ObservacaoView {
    #[serde(flatten)]
    pub observacao: Observacao,
    pub colaborador_nome: Option<String>,
}

/// Optional filters for listing observacoes. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservacaoFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub colaborador_id: Option<String>,
    pub tipo: Option<TipoObservacao>,
}

impl ObservacaoFilter {
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            DateRange::new(start, end)?;
        }
        Ok(())
    }

    pub fn matches(&self, observacao: &Observacao) -> bool {
        self.start_date.map_or(true, |start| observacao.date >= start)
            && self.end_date.map_or(true, |end| observacao.date <= end)
            && self
                .colaborador_id
                .as_deref()
                .map_or(true, |id| observacao.colaborador_id == id)
            && self.tipo.map_or(true, |tipo| observacao.tipo == tipo)
    }
}
