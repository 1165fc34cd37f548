use diesel::prelude::*;
use producao_core::colaboradores::Colaborador;

/// Database model for colaboradores
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::colaboradores)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ColaboradorDB {
    pub id: String,
    pub nome: String,
}

impl From<ColaboradorDB> for Colaborador {
    fn from(db: ColaboradorDB) -> Self {
        Self {
            id: db.id,
            name: db.nome,
        }
    }
}

impl From<Colaborador> for ColaboradorDB {
    fn from(domain: Colaborador) -> Self {
        Self {
            id: domain.id,
            nome: domain.name,
        }
    }
}
