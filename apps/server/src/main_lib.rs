use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use producao_core::{
    areas::{AreaService, AreaServiceTrait},
    colaboradores::{ColaboradorService, ColaboradorServiceTrait},
    lancamentos::{LancamentoService, LancamentoServiceTrait},
    metas::{MetaService, MetaServiceTrait},
    observacoes::{ObservacaoService, ObservacaoServiceTrait},
    reports::{ReportService, ReportServiceTrait},
    users::{UserService, UserServiceTrait},
};
use producao_storage_sqlite::{
    areas::AreaRepository, colaboradores::ColaboradorRepository, db,
    lancamentos::LancamentoRepository, metas::MetaRepository,
    observacoes::ObservacaoRepository, users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub area_service: Arc<dyn AreaServiceTrait>,
    pub colaborador_service: Arc<dyn ColaboradorServiceTrait>,
    pub meta_service: Arc<dyn MetaServiceTrait>,
    pub lancamento_service: Arc<dyn LancamentoServiceTrait>,
    pub observacao_service: Arc<dyn ObservacaoServiceTrait>,
    pub report_service: Arc<dyn ReportServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PRODUCAO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Opens the database, applies migrations, starts the writer actor and wires
/// repositories into services. Must run inside a Tokio runtime.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let area_repo = Arc::new(AreaRepository::new(pool.clone(), writer.clone()));
    let colaborador_repo = Arc::new(ColaboradorRepository::new(pool.clone(), writer.clone()));
    let meta_repo = Arc::new(MetaRepository::new(pool.clone(), writer.clone()));
    let lancamento_repo = Arc::new(LancamentoRepository::new(pool.clone(), writer.clone()));
    let observacao_repo = Arc::new(ObservacaoRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer));

    let area_service = Arc::new(AreaService::new(area_repo.clone()));
    let colaborador_service = Arc::new(ColaboradorService::new(colaborador_repo.clone()));
    let meta_service = Arc::new(MetaService::new(meta_repo.clone(), area_repo.clone()));
    let lancamento_service: Arc<dyn LancamentoServiceTrait> = Arc::new(LancamentoService::new(
        lancamento_repo.clone(),
        area_repo.clone(),
        colaborador_repo.clone(),
        meta_repo.clone(),
    ));
    let observacao_service = Arc::new(ObservacaoService::new(
        observacao_repo,
        colaborador_repo.clone(),
    ));
    let report_service = Arc::new(ReportService::new(
        lancamento_service.clone(),
        lancamento_repo,
        area_repo,
        colaborador_repo,
        meta_repo,
    ));
    let user_service = Arc::new(UserService::new(user_repo));

    let auth = Arc::new(AuthManager::new(&config.secret_key, config.session_ttl));

    Ok(Arc::new(AppState {
        area_service,
        colaborador_service,
        meta_service,
        lancamento_service,
        observacao_service,
        report_service,
        user_service,
        auth,
    }))
}
