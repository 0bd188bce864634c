use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{Booking, BookingDraft, BookingStatus, StatusCounts},
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
pub struct BookingDto {
    pub id: i64,
    pub reference: Uuid,
    pub customer: String,
    pub email: String,
    pub phone: String,
    pub destination: String,
    pub package_name: String,
    pub amount: f64,
    pub status: &'static str,
    pub booking_date: Option<String>,
    pub travel_date: Option<String>,
    pub created_at: String,
}

impl BookingDto {
    /// `now` comes from the caller so every DTO in one response derives
    /// against the same instant.
    pub fn from_booking(booking: Booking, now: DateTime<Utc>) -> Self {
        let status = booking.status(now).as_str();
        Self {
            id: booking.id,
            reference: booking.reference,
            customer: booking.customer,
            email: booking.email,
            phone: booking.phone,
            destination: booking.destination,
            package_name: booking.package_name,
            amount: booking.amount,
            status,
            booking_date: booking.booked_at.map(|d| d.format("%Y-%m-%d").to_string()),
            travel_date: booking.travel_date.map(|d| d.format("%Y-%m-%d").to_string()),
            created_at: booking.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub bookings: Vec<BookingDto>,
    /// Tallies over the whole table for the filter-tab badges, derived at
    /// the same instant as the rows above.
    pub counts: StatusCounts,
    pub total: usize,
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<BookingStatus>> {
    match raw {
        None => Ok(None),
        Some(s) => BookingStatus::parse(s)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown status: {s}"))),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let now = Utc::now();
    let status = parse_status_filter(params.status.as_deref())?;

    let bookings = state
        .service_context
        .booking_service
        .list(status, params.limit, params.offset, now)
        .await?;
    let counts = state.service_context.booking_service.status_counts(now).await?;

    Ok(Json(ListResponse {
        bookings: bookings
            .into_iter()
            .map(|b| BookingDto::from_booking(b, now))
            .collect(),
        counts,
        total: counts.total(),
    }))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<BookingDto>> {
    let now = Utc::now();
    let booking = state.service_context.booking_service.find(id).await?;
    Ok(Json(BookingDto::from_booking(booking, now)))
}

/// Public endpoint used by the checkout/payment-link flow. Accepts the
/// loose wire shape (either field spelling, amount as number or string).
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<BookingDraft>,
) -> Result<(StatusCode, Json<BookingDto>)> {
    let now = Utc::now();
    let booking = state
        .service_context
        .booking_service
        .create_booking(draft)
        .await?;

    Ok((StatusCode::CREATED, Json(BookingDto::from_booking(booking, now))))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    // Ensure it exists so deletes of unknown ids 404 instead of silently
    // succeeding.
    state.service_context.booking_service.find(id).await?;
    state.service_context.booking_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
