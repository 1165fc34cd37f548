use chrono::NaiveDate;
use diesel::prelude::*;

use producao_core::observacoes::{NewObservacao, Observacao, TipoObservacao};
use producao_core::Error;

use crate::errors::StorageError;

/// Database model for observacoes. `tipo_observacao` holds the wire label.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::observacoes_colaborador)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ObservacaoDB {
    pub id: String,
    pub colaborador_id: String,
    pub data: NaiveDate,
    pub tipo_observacao: String,
    pub descricao: Option<String>,
}

impl ObservacaoDB {
    pub fn from_new(id: String, domain: NewObservacao) -> Self {
        Self {
            id,
            colaborador_id: domain.colaborador_id,
            data: domain.date,
            tipo_observacao: domain.tipo.as_str().to_string(),
            descricao: domain.description,
        }
    }
}

impl TryFrom<ObservacaoDB> for Observacao {
    type Error = Error;

    fn try_from(db: ObservacaoDB) -> Result<Self, Self::Error> {
        let tipo = db.tipo_observacao.parse::<TipoObservacao>().map_err(|_| {
            StorageError::CorruptValue(format!(
                "observacoes_colaborador.tipo_observacao '{}' for {}",
                db.tipo_observacao, db.id
            ))
        })?;
        Ok(Self {
            id: db.id,
            colaborador_id: db.colaborador_id,
            date: db.data,
            tipo,
            description: db.descricao,
        })
    }
}
