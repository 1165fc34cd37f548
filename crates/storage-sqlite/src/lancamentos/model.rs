use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use producao_core::lancamentos::{Lancamento, NewLancamento};

/// Database model for lancamentos
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::lancamentos_producao)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LancamentoDB {
    pub id: String,
    pub data: NaiveDate,
    pub area_id: String,
    pub colaborador_id: String,
    pub quantidade_realizada: i32,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::lancamentos_producao)]
pub struct LancamentoChangesDB {
    pub data: NaiveDate,
    pub area_id: String,
    pub colaborador_id: String,
    pub quantidade_realizada: i32,
}

impl LancamentoDB {
    pub fn from_new(id: String, domain: NewLancamento, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            data: domain.date,
            area_id: domain.area_id,
            colaborador_id: domain.colaborador_id,
            quantidade_realizada: domain.quantity_done,
            created_at,
        }
    }
}

impl From<NewLancamento> for LancamentoChangesDB {
    fn from(domain: NewLancamento) -> Self {
        Self {
            data: domain.date,
            area_id: domain.area_id,
            colaborador_id: domain.colaborador_id,
            quantidade_realizada: domain.quantity_done,
        }
    }
}

impl From<LancamentoDB> for Lancamento {
    fn from(db: LancamentoDB) -> Self {
        Self {
            id: db.id,
            date: db.data,
            area_id: db.area_id,
            colaborador_id: db.colaborador_id,
            quantity_done: db.quantidade_realizada,
            created_at: db.created_at,
        }
    }
}
