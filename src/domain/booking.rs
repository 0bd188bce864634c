use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::lifecycle::{BookingStatus, StatusSource};

/// A booking as held by the store. `payment_status` is the raw persisted
/// flag written by the external payment-confirmation webhook; the
/// user-facing status is never stored, always derived (see
/// [`crate::domain::lifecycle`]).
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: i64,
    /// Customer-facing reference handed out by the checkout flow.
    pub reference: Uuid,
    pub customer: String,
    pub email: String,
    pub phone: String,
    pub destination: String,
    pub package_name: String,
    pub amount: f64,
    pub payment_status: Option<String>,
    pub booked_at: Option<DateTime<Utc>>,
    pub travel_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn status(&self, now: DateTime<Utc>) -> BookingStatus {
        StatusSource::status(self, now)
    }
}

impl StatusSource for Booking {
    fn payment_flag(&self) -> Option<&str> {
        self.payment_status.as_deref()
    }

    fn booked_at(&self) -> Option<DateTime<Utc>> {
        self.booked_at
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Canonical insert shape produced from a [`BookingDraft`].
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer: String,
    pub email: String,
    pub phone: String,
    pub destination: String,
    pub package_name: String,
    pub amount: f64,
    pub payment_status: Option<String>,
    pub booked_at: Option<DateTime<Utc>>,
    pub travel_date: Option<NaiveDate>,
}

/// Wire shape accepted from the checkout flow and legacy importers. Two
/// generations of clients spell the payment and date fields differently
/// (`payment_status` vs `paymentStatus`, `booking_date` vs `bookingDate`),
/// and amounts arrive as numbers or strings. All of that is resolved here,
/// once, so everything past this boundary sees one canonical shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingDraft {
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, alias = "packageName")]
    pub package_name: String,
    #[serde(default)]
    pub amount: serde_json::Value,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default, rename = "paymentStatus")]
    pub payment_status_camel: Option<String>,
    #[serde(default)]
    pub booking_date: Option<String>,
    #[serde(default, rename = "bookingDate")]
    pub booking_date_camel: Option<String>,
    #[serde(default, alias = "travelDate")]
    pub travel_date: Option<String>,
}

impl BookingDraft {
    /// Resolves field-name synonyms (first non-empty wins) and normalizes
    /// loose values. Never fails: a garbage amount becomes 0, a garbage
    /// date becomes "absent" and is defaulted to the creation instant by
    /// the repository.
    pub fn canonicalize(self) -> NewBooking {
        let payment_status = first_non_empty(self.payment_status, self.payment_status_camel);
        let booking_date = first_non_empty(self.booking_date, self.booking_date_camel);

        NewBooking {
            customer: self.customer.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            destination: self.destination.trim().to_string(),
            package_name: self.package_name.trim().to_string(),
            amount: parse_amount(&self.amount),
            payment_status,
            booked_at: booking_date.as_deref().and_then(parse_booking_date),
            travel_date: self
                .travel_date
                .as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()),
        }
    }
}

fn first_non_empty(a: Option<String>, b: Option<String>) -> Option<String> {
    a.filter(|s| !s.trim().is_empty())
        .or_else(|| b.filter(|s| !s.trim().is_empty()))
}

/// Amounts come off the wire as numbers or numeric strings; anything else
/// normalizes to 0 so the record still shows up in counts.
pub fn parse_amount(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Tolerant date parse for the booking-date field. Accepts RFC 3339, a
/// bare date, or a naive datetime; everything else reads as absent.
pub fn parse_booking_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_resolves_snake_case_spelling() {
        let draft: BookingDraft = serde_json::from_value(json!({
            "customer": "Asha Verma",
            "amount": 15000,
            "payment_status": "Paid",
            "booking_date": "2024-01-01"
        }))
        .unwrap();

        let new = draft.canonicalize();
        assert_eq!(new.payment_status.as_deref(), Some("Paid"));
        assert_eq!(new.amount, 15000.0);
        assert!(new.booked_at.is_some());
    }

    #[test]
    fn draft_resolves_camel_case_spelling() {
        let draft: BookingDraft = serde_json::from_value(json!({
            "paymentStatus": "Paid",
            "bookingDate": "2024-01-01",
            "amount": "8000"
        }))
        .unwrap();

        let new = draft.canonicalize();
        assert_eq!(new.payment_status.as_deref(), Some("Paid"));
        assert!(new.booked_at.is_some());
        assert_eq!(new.amount, 8000.0);
    }

    #[test]
    fn first_non_empty_wins_when_both_spellings_present() {
        let draft: BookingDraft = serde_json::from_value(json!({
            "payment_status": "",
            "paymentStatus": "Paid"
        }))
        .unwrap();
        assert_eq!(draft.canonicalize().payment_status.as_deref(), Some("Paid"));

        let draft: BookingDraft = serde_json::from_value(json!({
            "payment_status": "Pending",
            "paymentStatus": "Paid"
        }))
        .unwrap();
        assert_eq!(
            draft.canonicalize().payment_status.as_deref(),
            Some("Pending")
        );
    }

    #[test]
    fn malformed_amount_normalizes_to_zero() {
        assert_eq!(parse_amount(&json!("not-a-number")), 0.0);
        assert_eq!(parse_amount(&json!(null)), 0.0);
        assert_eq!(parse_amount(&json!({"weird": true})), 0.0);
        assert_eq!(parse_amount(&json!(" 1200.50 ")), 1200.50);
    }

    #[test]
    fn garbage_booking_date_reads_as_absent() {
        assert!(parse_booking_date("someday soon").is_none());
        assert!(parse_booking_date("").is_none());
        assert!(parse_booking_date("2024-01-01").is_some());
        assert!(parse_booking_date("2024-01-01T10:30:00Z").is_some());
        assert!(parse_booking_date("2024-01-01T10:30:00").is_some());
    }
}
