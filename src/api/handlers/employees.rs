use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{CreateEmployeeRequest, Employee, UpdateEmployeeRequest},
    error::{AppError, Result},
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Employee>>> {
    Ok(Json(state.service_context.employee_repo.list().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Employee>> {
    let employee = state
        .service_context
        .employee_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(Json(employee))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>)> {
    request.validate()?;

    let employee = state.service_context.employee_repo.create(request).await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateEmployeeRequest>,
) -> Result<Json<Employee>> {
    let employee = state.service_context.employee_repo.update(id, update).await?;
    Ok(Json(employee))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state
        .service_context
        .employee_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    state.service_context.employee_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
