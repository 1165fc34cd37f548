use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use producao_core::{
    colaboradores::{Colaborador, NewColaborador},
    users::RequestContext,
};

use super::Deleted;
use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
    models::NamePayload,
};

async fn list_colaboradores(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Colaborador>>> {
    Ok(Json(state.colaborador_service.get_colaboradores()?))
}

async fn get_colaborador(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Colaborador>> {
    Ok(Json(state.colaborador_service.get_colaborador(&id)?))
}

async fn create_colaborador(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    ApiJson(payload): ApiJson<NamePayload>,
) -> ApiResult<(StatusCode, Json<Colaborador>)> {
    let new_colaborador = NewColaborador::try_from(payload)?;
    let colaborador = state
        .colaborador_service
        .create_colaborador(&ctx, new_colaborador)
        .await?;
    Ok((StatusCode::CREATED, Json(colaborador)))
}

async fn update_colaborador(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    ApiJson(payload): ApiJson<NamePayload>,
) -> ApiResult<Json<Colaborador>> {
    let changes = NewColaborador::try_from(payload)?;
    let colaborador = state
        .colaborador_service
        .update_colaborador(&ctx, &id, changes)
        .await?;
    Ok(Json(colaborador))
}

async fn delete_colaborador(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<Json<Deleted>> {
    state
        .colaborador_service
        .delete_colaborador(&ctx, &id)
        .await?;
    Ok(Json(Deleted::new("Colaborador")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/colaboradores",
            get(list_colaboradores).post(create_colaborador),
        )
        .route(
            "/colaboradores/{id}",
            get(get_colaborador)
                .put(update_colaborador)
                .delete(delete_colaborador),
        )
}
