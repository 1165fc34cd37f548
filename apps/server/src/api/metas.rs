use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use producao_core::{
    errors::Error as CoreError,
    metas::{Meta, MetaUpdate, NewMeta},
    users::RequestContext,
};

use super::Deleted;
use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
    models::{MetaPayload, MetaResponse},
};

fn with_area_names(state: &AppState, metas: Vec<Meta>) -> ApiResult<Vec<MetaResponse>> {
    let names: HashMap<String, String> = state
        .area_service
        .get_areas()?
        .into_iter()
        .map(|area| (area.id, area.name))
        .collect();
    Ok(metas
        .into_iter()
        .map(|meta| MetaResponse {
            area_nome: names.get(&meta.area_id).cloned(),
            meta,
        })
        .collect())
}

fn with_area_name(state: &AppState, meta: Meta) -> ApiResult<MetaResponse> {
    let area_nome = match state.area_service.get_area(&meta.area_id) {
        Ok(area) => Some(area.name),
        Err(CoreError::NotFound(_)) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(MetaResponse { meta, area_nome })
}

async fn list_metas(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<MetaResponse>>> {
    let metas = state.meta_service.get_metas()?;
    Ok(Json(with_area_names(&state, metas)?))
}

async fn list_metas_by_area(
    Path(area_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MetaResponse>>> {
    let metas = state.meta_service.get_metas_by_area(&area_id)?;
    Ok(Json(with_area_names(&state, metas)?))
}

async fn get_meta(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MetaResponse>> {
    let meta = state.meta_service.get_meta(&id)?;
    Ok(Json(with_area_name(&state, meta)?))
}

async fn create_meta(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    ApiJson(payload): ApiJson<MetaPayload>,
) -> ApiResult<(StatusCode, Json<MetaResponse>)> {
    let new_meta = NewMeta::try_from(payload)?;
    let meta = state.meta_service.create_meta(&ctx, new_meta).await?;
    Ok((StatusCode::CREATED, Json(with_area_name(&state, meta)?)))
}

async fn update_meta(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    ApiJson(payload): ApiJson<MetaPayload>,
) -> ApiResult<Json<MetaResponse>> {
    let changes = MetaUpdate::try_from(payload)?;
    let meta = state.meta_service.update_meta(&ctx, &id, changes).await?;
    Ok(Json(with_area_name(&state, meta)?))
}

async fn delete_meta(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<Json<Deleted>> {
    state.meta_service.delete_meta(&ctx, &id).await?;
    Ok(Json(Deleted::new("Meta")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/metas", get(list_metas).post(create_meta))
        .route("/metas/area/{area_id}", get(list_metas_by_area))
        .route(
            "/metas/{id}",
            get(get_meta).put(update_meta).delete(delete_meta),
        )
}
