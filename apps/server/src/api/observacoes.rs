use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use producao_core::{
    observacoes::{NewObservacao, ObservacaoFilter, ObservacaoUpdate, ObservacaoView},
    users::RequestContext,
};

use super::Deleted;
use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
    models::{ObservacaoPayload, ObservacaoQuery},
};

async fn list_observacoes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ObservacaoQuery>,
) -> ApiResult<Json<Vec<ObservacaoView>>> {
    let filter = ObservacaoFilter::try_from(query)?;
    Ok(Json(state.observacao_service.list_observacoes(&filter)?))
}

async fn get_observacao(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ObservacaoView>> {
    Ok(Json(state.observacao_service.get_observacao(&id)?))
}

async fn create_observacao(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    ApiJson(payload): ApiJson<ObservacaoPayload>,
) -> ApiResult<(StatusCode, Json<ObservacaoView>)> {
    let new_observacao = NewObservacao::try_from(payload)?;
    let view = state
        .observacao_service
        .create_observacao(&ctx, new_observacao)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update_observacao(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    ApiJson(payload): ApiJson<ObservacaoPayload>,
) -> ApiResult<Json<ObservacaoView>> {
    let changes = ObservacaoUpdate::try_from(payload)?;
    let view = state
        .observacao_service
        .update_observacao(&ctx, &id, changes)
        .await?;
    Ok(Json(view))
}

async fn delete_observacao(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<Json<Deleted>> {
    state
        .observacao_service
        .delete_observacao(&ctx, &id)
        .await?;
    Ok(Json(Deleted::new("Observacao")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/observacoes",
            get(list_observacoes).post(create_observacao),
        )
        .route(
            "/observacoes/{id}",
            get(get_observacao)
                .put(update_observacao)
                .delete(delete_observacao),
        )
}
