use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{CreateLeadRequest, Lead, LeadStatus, UpdateLeadRequest},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub leads: Vec<Lead>,
    pub total: usize,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let leads = match params.status.as_deref() {
        None => {
            state
                .service_context
                .lead_repo
                .list(params.limit, params.offset)
                .await?
        }
        Some(s) => {
            let status = LeadStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown lead status: {s}")))?;
            state.service_context.lead_repo.list_by_status(status).await?
        }
    };

    let total = leads.len();
    Ok(Json(ListResponse { leads, total }))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Lead>> {
    let lead = state
        .service_context
        .lead_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))?;

    Ok(Json(lead))
}

/// Public endpoint: enquiry forms on the marketing site post here.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<Lead>)> {
    request.validate()?;

    let lead = state.service_context.lead_service.create_lead(request).await?;

    Ok((StatusCode::CREATED, Json(lead)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateLeadRequest>,
) -> Result<Json<Lead>> {
    let lead = state.service_context.lead_repo.update(id, update).await?;
    Ok(Json(lead))
}

#[derive(Debug, Deserialize)]
pub struct AdvanceStatusDto {
    pub status: LeadStatus,
}

pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<AdvanceStatusDto>,
) -> Result<Json<Lead>> {
    let lead = state
        .service_context
        .lead_service
        .advance_status(id, dto.status)
        .await?;

    Ok(Json(lead))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state
        .service_context
        .lead_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))?;

    state.service_context.lead_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
