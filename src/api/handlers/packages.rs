use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{CreatePackageRequest, TourPackage, UpdatePackageRequest},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub city: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<TourPackage>>> {
    let packages = match params.city.as_deref() {
        Some(city) => state.service_context.package_repo.list_by_city(city).await?,
        None => state.service_context.package_repo.list().await?,
    };

    Ok(Json(packages))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<TourPackage>> {
    let package = state
        .service_context
        .package_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

    Ok(Json(package))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreatePackageRequest>,
) -> Result<(StatusCode, Json<TourPackage>)> {
    request.validate()?;

    let package = state.service_context.package_repo.create(request).await?;

    Ok((StatusCode::CREATED, Json(package)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdatePackageRequest>,
) -> Result<Json<TourPackage>> {
    let package = state.service_context.package_repo.update(id, update).await?;
    Ok(Json(package))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state
        .service_context
        .package_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

    state.service_context.package_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
