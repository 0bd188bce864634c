use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{CityPage, UpsertCityPageRequest},
    error::{AppError, Result},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CityPage>>> {
    Ok(Json(state.service_context.content_repo.list().await?))
}

/// Public: the marketing site fetches its city page by slug.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CityPage>> {
    let page = state
        .service_context
        .content_repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;

    Ok(Json(page))
}

pub async fn upsert(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<UpsertCityPageRequest>,
) -> Result<Json<CityPage>> {
    request.validate()?;

    let page = state.service_context.content_repo.upsert(&slug, request).await?;

    Ok(Json(page))
}

pub async fn delete(State(state): State<AppState>, Path(slug): Path<String>) -> Result<StatusCode> {
    state
        .service_context
        .content_repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;

    state.service_context.content_repo.delete(&slug).await?;

    Ok(StatusCode::NO_CONTENT)
}
