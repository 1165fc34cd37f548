//! Database models for metas.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use producao_core::metas::{Meta, NewMeta};
use producao_core::Error;

use crate::errors::StorageError;

/// Database model for metas. `valor_unitario` is stored as decimal text.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::metas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MetaDB {
    pub id: String,
    pub nome: String,
    pub area_id: String,
    pub meta_quantidade: i32,
    pub valor_unitario: String,
    pub data_vigencia: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Column values written on update. Clearing `data_vigencia` must write NULL.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::metas)]
#[diesel(treat_none_as_null = true)]
pub struct MetaChangesDB {
    pub nome: String,
    pub area_id: String,
    pub meta_quantidade: i32,
    pub valor_unitario: String,
    pub data_vigencia: Option<NaiveDate>,
}

impl MetaDB {
    pub fn from_new(id: String, domain: NewMeta, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            nome: domain.name,
            area_id: domain.area_id,
            meta_quantidade: domain.target_quantity,
            valor_unitario: domain.unit_value.to_string(),
            data_vigencia: domain.effective_date,
            created_at,
        }
    }
}

impl From<NewMeta> for MetaChangesDB {
    fn from(domain: NewMeta) -> Self {
        Self {
            nome: domain.name,
            area_id: domain.area_id,
            meta_quantidade: domain.target_quantity,
            valor_unitario: domain.unit_value.to_string(),
            data_vigencia: domain.effective_date,
        }
    }
}

impl TryFrom<MetaDB> for Meta {
    type Error = Error;

    fn try_from(db: MetaDB) -> Result<Self, Self::Error> {
        let unit_value = Decimal::from_str(&db.valor_unitario).map_err(|e| {
            StorageError::CorruptValue(format!(
                "metas.valor_unitario '{}' for meta {}: {e}",
                db.valor_unitario, db.id
            ))
        })?;
        Ok(Self {
            id: db.id,
            name: db.nome,
            area_id: db.area_id,
            target_quantity: db.meta_quantidade,
            unit_value,
            effective_date: db.data_vigencia,
            created_at: db.created_at,
        })
    }
}
