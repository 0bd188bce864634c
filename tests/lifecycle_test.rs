use chrono::{DateTime, TimeZone, Utc};

use tripdesk::domain::{
    booking::parse_amount, count_by_status, derive_booking_status, derive_payment_status,
    lifecycle::StatusSource, sum_revenue, BookingStatus, PaymentStatus,
};

/// Minimal record for feeding the shared derivation rule in tests.
struct Rec {
    flag: Option<&'static str>,
    booked_at: Option<DateTime<Utc>>,
    amount: f64,
}

impl StatusSource for Rec {
    fn payment_flag(&self) -> Option<&str> {
        self.flag
    }

    fn booked_at(&self) -> Option<DateTime<Utc>> {
        self.booked_at
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

#[test]
fn counts_partition_every_record() {
    let now = date(2024, 6, 1);
    let records = vec![
        Rec { flag: Some("Paid"), booked_at: Some(date(2024, 1, 1)), amount: 100.0 },
        Rec { flag: Some("Pending"), booked_at: Some(date(2024, 1, 1)), amount: 100.0 },
        Rec { flag: None, booked_at: None, amount: 100.0 },
        Rec { flag: Some("garbage"), booked_at: Some(date(2024, 5, 30)), amount: 100.0 },
        Rec { flag: None, booked_at: Some(date(2030, 1, 1)), amount: 100.0 },
    ];

    let counts = count_by_status(&records, now);
    assert_eq!(counts.total(), records.len());
    assert_eq!(
        counts.completed + counts.cancelled + counts.pending,
        records.len()
    );
}

#[test]
fn paid_dominates_any_booking_date() {
    let now = date(2024, 6, 1);
    for booked_at in [
        Some(date(2020, 1, 1)), // years overdue
        Some(date(2030, 1, 1)), // far future
        None,                   // missing entirely
    ] {
        assert_eq!(
            derive_booking_status(Some("Paid"), booked_at, now),
            BookingStatus::Completed
        );
    }
}

#[test]
fn expiry_boundary_day_30_pending_day_31_cancelled() {
    let now = date(2024, 5, 1);
    let exactly_30 = date(2024, 4, 1);
    let exactly_31 = date(2024, 3, 31);

    assert_eq!(
        derive_booking_status(Some("Pending"), Some(exactly_30), now),
        BookingStatus::Pending
    );
    assert_eq!(
        derive_booking_status(Some("Pending"), Some(exactly_31), now),
        BookingStatus::Cancelled
    );
}

#[test]
fn derivation_is_deterministic_for_fixed_now() {
    let now = date(2024, 4, 20);
    let records = vec![
        Rec { flag: Some("Paid"), booked_at: Some(date(2024, 1, 10)), amount: 700.0 },
        Rec { flag: None, booked_at: Some(date(2024, 2, 1)), amount: 300.0 },
        Rec { flag: Some("Pending"), booked_at: Some(date(2024, 4, 15)), amount: 500.0 },
    ];

    let first = count_by_status(&records, now);
    let second = count_by_status(&records, now);
    assert_eq!(first, second);

    assert_eq!(
        sum_revenue(&records, BookingStatus::Completed, now),
        sum_revenue(&records, BookingStatus::Completed, now)
    );

    for record in &records {
        assert_eq!(record.status(now), record.status(now));
    }
}

#[test]
fn malformed_amount_counts_but_contributes_zero_revenue() {
    let now = date(2024, 6, 1);
    // Wire-level amount normalization happens at the store boundary.
    let amount = parse_amount(&serde_json::json!("not-a-number"));
    assert_eq!(amount, 0.0);

    let records = vec![
        Rec { flag: Some("Paid"), booked_at: Some(date(2024, 5, 20)), amount },
        Rec { flag: Some("Paid"), booked_at: Some(date(2024, 5, 20)), amount: 250.0 },
    ];

    let counts = count_by_status(&records, now);
    assert_eq!(counts.completed, 2);
    assert_eq!(sum_revenue(&records, BookingStatus::Completed, now), 250.0);
}

#[test]
fn scenario_paid_booking_from_january_seen_in_june() {
    let now = date(2024, 6, 1);
    let record = Rec {
        flag: Some("Paid"),
        booked_at: Some(date(2024, 1, 1)),
        amount: 15000.0,
    };

    assert_eq!(record.status(now), BookingStatus::Completed);
    assert_eq!(
        sum_revenue(&[record], BookingStatus::Completed, now),
        15000.0
    );
}

#[test]
fn scenario_unpaid_booking_74_days_old_is_cancelled() {
    let now = date(2024, 3, 15);
    let record = Rec {
        flag: Some("Pending"),
        booked_at: Some(date(2024, 1, 1)),
        amount: 8000.0,
    };

    assert_eq!(record.status(now), BookingStatus::Cancelled);
    assert_eq!(sum_revenue(&[record], BookingStatus::Completed, now), 0.0);
}

#[test]
fn scenario_unpaid_booking_19_days_old_is_pending() {
    let now = date(2024, 3, 20);
    let record = Rec {
        flag: Some("Pending"),
        booked_at: Some(date(2024, 3, 1)),
        amount: 5000.0,
    };

    assert_eq!(record.status(now), BookingStatus::Pending);
}

#[test]
fn payment_projection_uses_the_same_rule() {
    let now = date(2024, 6, 1);

    // Same inputs, payment vocabulary.
    assert_eq!(
        derive_payment_status(Some("Paid"), Some(date(2024, 1, 1)), now),
        PaymentStatus::Paid
    );
    assert_eq!(
        derive_payment_status(Some("Pending"), Some(date(2024, 1, 1)), now),
        PaymentStatus::Cancelled
    );
    assert_eq!(
        derive_payment_status(None, Some(date(2024, 5, 25)), now),
        PaymentStatus::Pending
    );
}
