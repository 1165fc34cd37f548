//! Database models for areas.

use diesel::prelude::*;
use producao_core::areas::Area;

/// Database model for areas
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::areas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AreaDB {
    pub id: String,
    pub nome: String,
}

impl From<AreaDB> for Area {
    fn from(db: AreaDB) -> Self {
        Self {
            id: db.id,
            name: db.nome,
        }
    }
}

impl From<Area> for AreaDB {
    fn from(domain: Area) -> Self {
        Self {
            id: domain.id,
            nome: domain.name,
        }
    }
}
