use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use producao_core::{
    lancamentos::{LancamentoFilter, LancamentoUpdate, LancamentoView, NewLancamento},
    users::RequestContext,
};

use super::Deleted;
use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
    models::{LancamentoPayload, LancamentoQuery},
};

async fn list_lancamentos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LancamentoQuery>,
) -> ApiResult<Json<Vec<LancamentoView>>> {
    let filter = LancamentoFilter::try_from(query)?;
    Ok(Json(state.lancamento_service.list_lancamentos(&filter)?))
}

async fn get_lancamento(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LancamentoView>> {
    Ok(Json(state.lancamento_service.get_lancamento(&id)?))
}

async fn create_lancamento(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    ApiJson(payload): ApiJson<LancamentoPayload>,
) -> ApiResult<(StatusCode, Json<LancamentoView>)> {
    let new_lancamento = NewLancamento::try_from(payload)?;
    let view = state
        .lancamento_service
        .create_lancamento(&ctx, new_lancamento)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update_lancamento(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    ApiJson(payload): ApiJson<LancamentoPayload>,
) -> ApiResult<Json<LancamentoView>> {
    let changes = LancamentoUpdate::try_from(payload)?;
    let view = state
        .lancamento_service
        .update_lancamento(&ctx, &id, changes)
        .await?;
    Ok(Json(view))
}

async fn delete_lancamento(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<Json<Deleted>> {
    state
        .lancamento_service
        .delete_lancamento(&ctx, &id)
        .await?;
    Ok(Json(Deleted::new("Lancamento")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lancamentos", get(list_lancamentos).post(create_lancamento))
        .route(
            "/lancamentos/{id}",
            get(get_lancamento)
                .put(update_lancamento)
                .delete(delete_lancamento),
        )
}
