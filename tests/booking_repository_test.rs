use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use tripdesk::{
    domain::{BookingDraft, BookingStatus},
    repository::{BookingRepository, SqliteBookingRepository},
};

async fn test_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

#[tokio::test]
async fn test_booking_crud() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteBookingRepository::new(pool.clone());

    let draft: BookingDraft = serde_json::from_value(serde_json::json!({
        "customer": "Asha Verma",
        "email": "asha@example.com",
        "destination": "Jaipur",
        "package_name": "Jaipur Explorer 5D4N",
        "amount": 15000,
        "payment_status": "Paid",
        "booking_date": "2024-01-01"
    }))?;

    let booking = repo.create(draft.canonicalize()).await?;
    assert_eq!(booking.customer, "Asha Verma");
    assert_eq!(booking.amount, 15000.0);
    assert_eq!(booking.payment_status.as_deref(), Some("Paid"));
    assert!(booking.booked_at.is_some());

    // Find by id and by the customer-facing reference
    let found = repo.find_by_id(booking.id).await?;
    assert!(found.is_some());

    let by_reference = repo.find_by_reference(booking.reference).await?;
    assert_eq!(by_reference.unwrap().id, booking.id);

    // List
    let bookings = repo.list(10, 0).await?;
    assert_eq!(bookings.len(), 1);

    // Delete
    repo.delete(booking.id).await?;
    assert!(repo.find_by_id(booking.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_camel_case_draft_is_canonicalized() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteBookingRepository::new(pool);

    let draft: BookingDraft = serde_json::from_value(serde_json::json!({
        "customer": "Rahul Mehta",
        "paymentStatus": "Paid",
        "bookingDate": "2024-02-01",
        "amount": "8000"
    }))?;

    let booking = repo.create(draft.canonicalize()).await?;
    assert_eq!(booking.payment_status.as_deref(), Some("Paid"));
    assert_eq!(booking.amount, 8000.0);
    assert!(booking.booked_at.is_some());

    Ok(())
}

#[tokio::test]
async fn test_webhook_flag_update_changes_derived_status() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteBookingRepository::new(pool);
    let now = Utc::now();

    let draft: BookingDraft = serde_json::from_value(serde_json::json!({
        "customer": "Priya Nair",
        "amount": 5000
    }))?;

    let booking = repo.create(draft.canonicalize()).await?;
    assert_eq!(booking.status(now), BookingStatus::Pending);

    let updated = repo.update_payment_flag(booking.id, "Paid").await?;
    assert_eq!(updated.status(now), BookingStatus::Completed);

    Ok(())
}

#[tokio::test]
async fn test_absent_booking_date_defaults_to_creation_instant() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteBookingRepository::new(pool);

    let draft: BookingDraft = serde_json::from_value(serde_json::json!({
        "customer": "No Date",
        "amount": 1200
    }))?;

    let booking = repo.create(draft.canonicalize()).await?;
    let booked_at = booking.booked_at.expect("booking date defaulted");
    assert!((Utc::now() - booked_at) < Duration::minutes(1));

    Ok(())
}

#[tokio::test]
async fn test_garbage_booking_date_reads_as_just_booked() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let repo = SqliteBookingRepository::new(pool.clone());
    let now = Utc::now();

    // A row imported from the old system with an unparseable date.
    let created = Utc::now().naive_utc();
    sqlx::query(
        r#"
        INSERT INTO bookings (reference, customer, amount, payment_status, booking_date, created_at, updated_at)
        VALUES (?, 'Legacy Row', 900.0, 'Pending', 'someday soon', ?, ?)
        "#,
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(created)
    .bind(created)
    .execute(&pool)
    .await?;

    let bookings = repo.list_all().await?;
    assert_eq!(bookings.len(), 1);
    let legacy = &bookings[0];
    // Garbage never errors, never reads as infinitely old.
    assert!(legacy.booked_at.is_none());
    assert_eq!(legacy.status(now), BookingStatus::Pending);

    Ok(())
}
