use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use producao_core::reports::{render_csv, GroupBy};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{ReportFormat, ReportQuery, ReportRowResponse},
};

fn production_report(
    state: &AppState,
    query: &ReportQuery,
    group_by: GroupBy,
) -> ApiResult<Response> {
    let range = query.range()?;
    let format = query.format()?;
    let rows = state.report_service.production_report(&range, group_by)?;

    match format {
        ReportFormat::Csv => {
            let body = render_csv(&rows, group_by)?;
            let disposition = format!(
                "attachment; filename=\"producao-{}-{}-{}.csv\"",
                group_by,
                range.start(),
                range.end()
            );
            Ok((
                [
                    (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response())
        }
        ReportFormat::Json => {
            let rows: Vec<ReportRowResponse> = rows
                .into_iter()
                .map(|row| ReportRowResponse::new(row, group_by))
                .collect();
            Ok(Json(rows).into_response())
        }
    }
}

async fn producao_por_colaborador(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Response> {
    production_report(&state, &query, GroupBy::Colaborador)
}

async fn producao_por_area(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Response> {
    production_report(&state, &query, GroupBy::Area)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/relatorios/producao-colaborador",
            get(producao_por_colaborador),
        )
        .route("/relatorios/producao-area", get(producao_por_area))
        .route(
            "/lancamentos/relatorios/producao-colaborador",
            get(producao_por_colaborador),
        )
        .route(
            "/lancamentos/relatorios/producao-area",
            get(producao_por_area),
        )
}
