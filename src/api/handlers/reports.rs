use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::state::AppState,
    domain::BookingStatus,
    error::{AppError, Result},
    service::DashboardSummary,
};

pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardSummary>> {
    let now = Utc::now();
    let summary = state.service_context.report_service.dashboard(now).await?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct RevenueParams {
    pub status: Option<String>,
}

pub async fn revenue(
    State(state): State<AppState>,
    Query(params): Query<RevenueParams>,
) -> Result<Json<serde_json::Value>> {
    let now = Utc::now();
    let status = match params.status.as_deref() {
        None => BookingStatus::Completed,
        Some(s) => BookingStatus::parse(s)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown status: {s}")))?,
    };

    let total = state.service_context.report_service.revenue(status, now).await?;

    Ok(Json(json!({
        "status": status.as_str(),
        "revenue": total,
    })))
}

/// CSV export for the reports screen. Status values are the derived ones,
/// byte for byte the same strings the JSON endpoints serve.
pub async fn export_bookings(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let now = Utc::now();
    let body = state
        .service_context
        .report_service
        .export_bookings_csv(now)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"bookings.csv\"",
            ),
        ],
        body,
    ))
}
