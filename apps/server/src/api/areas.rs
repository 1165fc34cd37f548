use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use producao_core::{
    areas::{Area, NewArea},
    users::RequestContext,
};

use super::Deleted;
use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
    models::NamePayload,
};

async fn list_areas(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Area>>> {
    let areas = state.area_service.get_areas()?;
    Ok(Json(areas))
}

async fn get_area(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Area>> {
    Ok(Json(state.area_service.get_area(&id)?))
}

async fn create_area(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    ApiJson(payload): ApiJson<NamePayload>,
) -> ApiResult<(StatusCode, Json<Area>)> {
    let new_area = NewArea::try_from(payload)?;
    let area = state.area_service.create_area(&ctx, new_area).await?;
    Ok((StatusCode::CREATED, Json(area)))
}

async fn update_area(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    ApiJson(payload): ApiJson<NamePayload>,
) -> ApiResult<Json<Area>> {
    let changes = NewArea::try_from(payload)?;
    let area = state.area_service.update_area(&ctx, &id, changes).await?;
    Ok(Json(area))
}

async fn delete_area(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<Json<Deleted>> {
    state.area_service.delete_area(&ctx, &id).await?;
    Ok(Json(Deleted::new("Area")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/areas", get(list_areas).post(create_area))
        .route(
            "/areas/{id}",
            get(get_area).put(update_area).delete(delete_area),
        )
}
