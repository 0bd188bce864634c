use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{derive_payment_status, Booking, BookingStatus, StatusSource},
    error::{AppError, Result},
};

/// Read-only projection of a booking for the payments screen: same rows,
/// same derivation rule, with "Completed" reading as "Paid".
#[derive(Debug, Serialize)]
pub struct PaymentDto {
    pub id: i64,
    pub reference: Uuid,
    pub customer: String,
    pub email: String,
    pub amount: f64,
    /// Raw persisted flag, surfaced for support/debugging.
    pub payment_status: Option<String>,
    pub status: &'static str,
    pub booking_date: Option<String>,
}

impl PaymentDto {
    pub fn from_booking(booking: Booking, now: DateTime<Utc>) -> Self {
        let status =
            derive_payment_status(booking.payment_flag(), booking.booked_at, now).as_str();
        Self {
            id: booking.id,
            reference: booking.reference,
            customer: booking.customer,
            email: booking.email,
            amount: booking.amount,
            payment_status: booking.payment_status,
            status,
            booking_date: booking.booked_at.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

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

/// The payments screen filters in its own vocabulary ("Paid" rather than
/// "Completed"); both map onto the one underlying status.
fn parse_payment_filter(raw: &str) -> Option<BookingStatus> {
    match raw {
        "Paid" => Some(BookingStatus::Completed),
        other => BookingStatus::parse(other),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PaymentDto>>> {
    let now = Utc::now();
    let status = match params.status.as_deref() {
        None => None,
        Some(s) => Some(
            parse_payment_filter(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown status: {s}")))?,
        ),
    };

    let bookings = state
        .service_context
        .booking_service
        .list(status, params.limit, params.offset, now)
        .await?;

    Ok(Json(
        bookings
            .into_iter()
            .map(|b| PaymentDto::from_booking(b, now))
            .collect(),
    ))
}

/// Payload sent by the external payment processor. Legacy notifiers use
/// the camelCase spelling; first non-empty wins, same as at the store
/// boundary.
#[derive(Debug, Deserialize)]
pub struct PaymentWebhookDto {
    pub reference: Uuid,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default, rename = "paymentStatus")]
    pub payment_status_camel: Option<String>,
}

impl PaymentWebhookDto {
    fn flag(&self) -> Option<&str> {
        self.payment_status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                self.payment_status_camel
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
            })
    }
}

/// Public webhook: the only place the raw payment flag is written.
pub async fn webhook(
    State(state): State<AppState>,
    Json(dto): Json<PaymentWebhookDto>,
) -> Result<Json<PaymentDto>> {
    let now = Utc::now();
    let flag = dto
        .flag()
        .ok_or_else(|| AppError::BadRequest("Missing payment status".to_string()))?;

    tracing::info!(reference = %dto.reference, flag, "Payment confirmation received");

    let booking = state
        .service_context
        .booking_service
        .record_payment_flag(dto.reference, flag)
        .await?;

    Ok(Json(PaymentDto::from_booking(booking, now)))
}
