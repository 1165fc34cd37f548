//! Metas domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_UNIT_VALUE;
use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a production goal for an area.
///
/// The meta whose `effective_date` is the latest one on or before an entry's
/// date is that entry's active goal. An undated meta is always in force but
/// loses to any dated one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meta {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub area_id: String,
    #[serde(rename = "meta_quantidade")]
    pub target_quantity: i32,
    #[serde(rename = "valor_unitario")]
    pub unit_value: Decimal,
    #[serde(rename = "data_vigencia")]
    pub effective_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a meta
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeta {
    pub name: String,
    pub area_id: String,
    pub target_quantity: i32,
    pub unit_value: Decimal,
    pub effective_date: Option<NaiveDate>,
}

impl NewMeta {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("nome".to_string()).into());
        }
        if self.area_id.trim().is_empty() {
            return Err(ValidationError::MissingField("area_id".to_string()).into());
        }
        if self.target_quantity <= 0 {
            return Err(Error::invalid_input(format!(
                "meta_quantidade must be greater than zero (got {})",
                self.target_quantity
            )));
        }
        if self.unit_value < Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "valor_unitario must not be negative (got {})",
                self.unit_value
            )));
        }
        if self.unit_value > Decimal::from(MAX_UNIT_VALUE) {
            return Err(Error::invalid_input(format!(
                "valor_unitario must not exceed {MAX_UNIT_VALUE} (got {})",
                self.unit_value
            )));
        }
        Ok(())
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaUpdate {
    pub name: Option<String>,
    pub area_id: Option<String>,
    pub target_quantity: Option<i32>,
    pub unit_value: Option<Decimal>,
    pub effective_date: Option<NaiveDate>,
}

impl MetaUpdate {
    /// Merges the changes over `current`, yielding the full record to validate.
    pub fn apply_to(self, current: &Meta) -> NewMeta {
        NewMeta {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            area_id: self.area_id.unwrap_or_else(|| current.area_id.clone()),
            target_quantity: self.target_quantity.unwrap_or(current.target_quantity),
            unit_value: self.unit_value.unwrap_or(current.unit_value),
            effective_date: self.effective_date.or(current.effective_date),
        }
    }
}
