//! Temp-file database fixture for repository tests.

use chrono::NaiveDate;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

use producao_core::areas::{Area, AreaRepositoryTrait, NewArea};
use producao_core::colaboradores::{Colaborador, ColaboradorRepositoryTrait, NewColaborador};
use producao_core::lancamentos::{Lancamento, LancamentoRepositoryTrait, NewLancamento};

use crate::areas::AreaRepository;
use crate::colaboradores::ColaboradorRepository;
use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::lancamentos::LancamentoRepository;
use crate::metas::MetaRepository;
use crate::observacoes::ObservacaoRepository;
use crate::users::UserRepository;

pub struct TestDb {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Must be called inside a Tokio runtime: the writer actor is spawned here.
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path = init(&db_path.to_string_lossy()).expect("Failed to init database");
        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        Self {
            pool,
            writer,
            _temp_dir: temp_dir,
        }
    }

    pub fn areas(&self) -> AreaRepository {
        AreaRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub fn colaboradores(&self) -> ColaboradorRepository {
        ColaboradorRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub fn metas(&self) -> MetaRepository {
        MetaRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub fn lancamentos(&self) -> LancamentoRepository {
        LancamentoRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub fn observacoes(&self) -> ObservacaoRepository {
        ObservacaoRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub async fn seed_area_and_colaborador(&self) -> (Area, Colaborador) {
        let area = self.areas().create(NewArea::new("Corte")).await.unwrap();
        let colaborador = self
            .colaboradores()
            .create(NewColaborador::new("Maria"))
            .await
            .unwrap();
        (area, colaborador)
    }

    pub async fn seed_lancamento(
        &self,
        area_id: &str,
        colaborador_id: &str,
        date: &str,
        quantity_done: i32,
    ) -> Lancamento {
        self.lancamentos()
            .create(NewLancamento {
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                area_id: area_id.to_string(),
                colaborador_id: colaborador_id.to_string(),
                quantity_done,
            })
            .await
            .unwrap()
    }
}
