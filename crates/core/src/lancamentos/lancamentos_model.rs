//! Lancamentos domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::DateRange;

/// Domain model representing one day of production by a worker in an area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lancamento {
    pub id: String,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    pub area_id: String,
    pub colaborador_id: String,
    #[serde(rename = "quantidade_realizada")]
    pub quantity_done: i32,
    pub created_at: NaiveDateTime,
}

/// Input model for recording an entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewLancamento {
    pub date: NaiveDate,
    pub area_id: String,
    pub colaborador_id: String,
    pub quantity_done: i32,
}

impl NewLancamento {
    pub fn validate(&self) -> Result<()> {
        if self.area_id.trim().is_empty() {
            return Err(ValidationError::MissingField("area_id".to_string()).into());
        }
        if self.colaborador_id.trim().is_empty() {
            return Err(ValidationError::MissingField("colaborador_id".to_string()).into());
        }
        if self.quantity_done < 0 {
            return Err(Error::invalid_input(format!(
                "quantidade_realizada must not be negative (got {})",
                self.quantity_done
            )));
        }
        Ok(())
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LancamentoUpdate {
    pub date: Option<NaiveDate>,
    pub area_id: Option<String>,
    pub colaborador_id: Option<String>,
    pub quantity_done: Option<i32>,
}

impl LancamentoUpdate {
    pub fn apply_to(self, current: &Lancamento) -> NewLancamento {
        NewLancamento {
            date: self.date.unwrap_or(current.date),
            area_id: self.area_id.unwrap_or_else(|| current.area_id.clone()),
            colaborador_id: self
                .colaborador_id
                .unwrap_or_else(|| current.colaborador_id.clone()),
            quantity_done: self.quantity_done.unwrap_or(current.quantity_done),
        }
    }
}

/// Values derived from an entry and its active meta.
///
/// All three fields are `None` when the entry's area has no meta in force on
/// the entry date. Consumers must show that as "no goal configured", never as
/// a zero goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Balance {
    /// `quantity_done - target_quantity`. Positive is surplus.
    pub saldo: Option<i64>,
    /// `quantity_done * unit_value`, rounded to cents.
    pub valor_receber: Option<Decimal>,
    /// Id of the meta the values were computed against.
    pub meta_id: Option<String>,
}

impl Balance {
    pub fn without_goal() -> Self {
        Self::default()
    }

    pub fn has_goal(&self) -> bool {
        self.meta_id.is_some()
    }
}

/// An entry enriched for presentation: names resolved and balance computed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LancamentoView {
    #[serde(flatten)]
    pub lancamento: Lancamento,
    pub area_nome: String,
    pub colaborador_nome: String,
    #[serde(flatten)]
    pub balance: Balance,
}

/// Optional filters for listing entries. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LancamentoFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub area_id: Option<String>,
    pub colaborador_id: Option<String>,
}

impl LancamentoFilter {
    pub fn for_range(range: &DateRange) -> Self {
        Self {
            start_date: Some(range.start()),
            end_date: Some(range.end()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            DateRange::new(start, end)?;
        }
        Ok(())
    }

    pub fn matches(&self, entry: &Lancamento) -> bool {
        self.start_date.map_or(true, |start| entry.date >= start)
            && self.end_date.map_or(true, |end| entry.date <= end)
            && self
                .area_id
                .as_deref()
                .map_or(true, |area| entry.area_id == area)
            && self
                .colaborador_id
                .as_deref()
                .map_or(true, |colaborador| entry.colaborador_id == colaborador)
    }
}
