use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{auth, config::Config, main_lib::AppState};

mod areas;
mod colaboradores;
mod dashboard;
mod health;
mod lancamentos;
mod metas;
mod observacoes;
mod reports;

#[derive(serde::Serialize)]
pub(crate) struct Deleted {
    pub message: String,
}

impl Deleted {
    pub(crate) fn new(entity: &str) -> Self {
        Self {
            message: format!("{entity} deleted"),
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(origin) => Some(origin),
                Err(e) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}': {}", o, e);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    }
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let protected = Router::new()
        .merge(areas::router())
        .merge(colaboradores::router())
        .merge(metas::router())
        .merge(lancamentos::router())
        .merge(reports::router())
        .merge(observacoes::router())
        .merge(dashboard::router())
        .route("/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    let public = Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/check-auth", get(auth::check_auth))
        .route("/create-admin", post(auth::create_admin))
        .merge(health::router());

    Router::new()
        .nest("/api", public.merge(protected))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
