use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use producao_core::reports::DashboardSummary;

use crate::{error::ApiResult, main_lib::AppState};

async fn get_dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<DashboardSummary>> {
    Ok(Json(state.report_service.dashboard()?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard", get(get_dashboard))
}
