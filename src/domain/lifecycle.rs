use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Days an unpaid booking may sit before it is shown as Cancelled.
/// Business policy inherited from the agency; deliberately a constant,
/// not a config surface.
pub const PAYMENT_WINDOW_DAYS: i64 = 30;

/// The literal the payment-confirmation webhook writes. Any other value
/// (or no value at all) means not paid.
pub const PAID_FLAG: &str = "Paid";

/// Display lifecycle of a booking. Never persisted: recomputed from the
/// raw payment flag and the booking age on every read, so the dashboard,
/// list screens and exports can never disagree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Completed,
    Cancelled,
    Pending,
}

/// Same lifecycle viewed from the payments screen, where a completed
/// booking reads "Paid".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Paid,
    Cancelled,
    Pending,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Pending => "Pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Completed" => Some(BookingStatus::Completed),
            "Cancelled" => Some(BookingStatus::Cancelled),
            "Pending" => Some(BookingStatus::Pending),
            _ => None,
        }
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Cancelled => "Cancelled",
            PaymentStatus::Pending => "Pending",
        }
    }
}

impl From<BookingStatus> for PaymentStatus {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Completed => PaymentStatus::Paid,
            BookingStatus::Cancelled => PaymentStatus::Cancelled,
            BookingStatus::Pending => PaymentStatus::Pending,
        }
    }
}

/// Whole days elapsed between `reference` and `now`, floored. A reference
/// equal to `now` is age 0; a future reference goes negative.
pub fn age_in_days(reference: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - reference).num_seconds().div_euclid(86_400)
}

/// True once the payment window has elapsed. Strictly greater than: a
/// booking exactly 30 days old is still inside the window.
pub fn is_expired(reference: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    age_in_days(reference, now) > PAYMENT_WINDOW_DAYS
}

/// The one derivation rule every screen shares. Order matters:
/// a paid booking is never reported as cancelled, however old; only then
/// does the payment window apply. A missing booking date reads as "just
/// booked", never as infinitely old.
pub fn derive_booking_status(
    payment_flag: Option<&str>,
    booked_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> BookingStatus {
    if payment_flag == Some(PAID_FLAG) {
        return BookingStatus::Completed;
    }
    let reference = booked_at.unwrap_or(now);
    if is_expired(reference, now) {
        BookingStatus::Cancelled
    } else {
        BookingStatus::Pending
    }
}

pub fn derive_payment_status(
    payment_flag: Option<&str>,
    booked_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> PaymentStatus {
    derive_booking_status(payment_flag, booked_at, now).into()
}

/// Anything the derivation and aggregation rules can run over. Implemented
/// by the booking entity; kept as a trait so reports and tests can feed
/// lightweight records through the same rule.
pub trait StatusSource {
    fn payment_flag(&self) -> Option<&str>;
    fn booked_at(&self) -> Option<DateTime<Utc>>;
    fn amount(&self) -> f64;

    fn status(&self, now: DateTime<Utc>) -> BookingStatus {
        derive_booking_status(self.payment_flag(), self.booked_at(), now)
    }
}

/// Per-status tallies for filter badges and dashboard tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub completed: usize,
    pub cancelled: usize,
    pub pending: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.completed + self.cancelled + self.pending
    }

    pub fn get(&self, status: BookingStatus) -> usize {
        match status {
            BookingStatus::Completed => self.completed,
            BookingStatus::Cancelled => self.cancelled,
            BookingStatus::Pending => self.pending,
        }
    }
}

/// Tallies every record into exactly one bucket; `total()` always equals
/// the input length.
pub fn count_by_status<T: StatusSource>(records: &[T], now: DateTime<Utc>) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for record in records {
        match record.status(now) {
            BookingStatus::Completed => counts.completed += 1,
            BookingStatus::Cancelled => counts.cancelled += 1,
            BookingStatus::Pending => counts.pending += 1,
        }
    }
    counts
}

/// Sums amounts over records whose derived status matches. Records with a
/// malformed amount were already normalized to 0 at the store boundary, so
/// they count toward the tally but add nothing here.
pub fn sum_revenue<T: StatusSource>(
    records: &[T],
    status: BookingStatus,
    now: DateTime<Utc>,
) -> f64 {
    records
        .iter()
        .filter(|r| r.status(now) == status)
        .map(|r| r.amount())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn age_is_zero_for_reference_equal_to_now() {
        let now = at(2024, 3, 1);
        assert_eq!(age_in_days(now, now), 0);
        assert!(!is_expired(now, now));
    }

    #[test]
    fn age_floors_partial_days() {
        let reference = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 6, 0, 0).unwrap();
        assert_eq!(age_in_days(reference, now), 0);
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let now = at(2024, 5, 1);
        let day_30 = at(2024, 4, 1); // exactly 30 days before
        let day_31 = at(2024, 3, 31);
        assert!(!is_expired(day_30, now));
        assert!(is_expired(day_31, now));
    }

    #[test]
    fn paid_flag_dominates_age() {
        let now = at(2024, 6, 1);
        let day_45 = at(2024, 4, 17);
        assert_eq!(
            derive_booking_status(Some("Paid"), Some(day_45), now),
            BookingStatus::Completed
        );
    }

    #[test]
    fn only_the_exact_paid_literal_counts() {
        let now = at(2024, 6, 1);
        for flag in ["paid", "PAID", "Pending", "Failed", ""] {
            assert_ne!(
                derive_booking_status(Some(flag), Some(now), now),
                BookingStatus::Completed,
                "flag {flag:?} must not read as paid"
            );
        }
    }

    #[test]
    fn missing_date_reads_as_just_booked() {
        let now = at(2024, 6, 1);
        assert_eq!(
            derive_booking_status(None, None, now),
            BookingStatus::Pending
        );
    }

    #[test]
    fn future_date_is_pending_not_cancelled() {
        let now = at(2024, 6, 1);
        let future = at(2024, 7, 1);
        assert_eq!(
            derive_booking_status(Some("Pending"), Some(future), now),
            BookingStatus::Pending
        );
    }

    #[test]
    fn payment_projection_aliases_completed_to_paid() {
        let now = at(2024, 6, 1);
        assert_eq!(
            derive_payment_status(Some("Paid"), None, now),
            PaymentStatus::Paid
        );
        assert_eq!(PaymentStatus::from(BookingStatus::Cancelled).as_str(), "Cancelled");
    }
}
