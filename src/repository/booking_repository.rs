use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{booking::parse_booking_date, Booking, NewBooking},
    error::{AppError, Result},
    repository::BookingRepository,
};

/// Raw row shape. The booking and travel dates stay TEXT here: rows
/// imported from the old system can hold anything, and garbage must read
/// as "absent" rather than fail the whole list query.
#[derive(FromRow)]
struct BookingRow {
    id: i64,
    reference: String,
    customer: String,
    email: String,
    phone: String,
    destination: String,
    package_name: String,
    amount: f64,
    payment_status: Option<String>,
    booking_date: Option<String>,
    travel_date: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: BookingRow) -> Result<Booking> {
        Ok(Booking {
            id: row.id,
            reference: Uuid::parse_str(&row.reference)
                .map_err(|e| AppError::Database(e.to_string()))?,
            customer: row.customer,
            email: row.email,
            phone: row.phone,
            destination: row.destination,
            package_name: row.package_name,
            amount: row.amount,
            payment_status: row.payment_status,
            booked_at: row.booking_date.as_deref().and_then(parse_booking_date),
            travel_date: row
                .travel_date
                .as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

const BOOKING_COLUMNS: &str = r#"
    id, reference, customer, email, phone, destination, package_name,
    amount, payment_status, booking_date, travel_date, created_at, updated_at
"#;

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn create(&self, booking: NewBooking) -> Result<Booking> {
        let reference = Uuid::new_v4();
        let now = Utc::now();
        // An absent booking date defaults to the creation instant, so the
        // payment window starts counting from "just booked".
        let booked_at = booking.booked_at.unwrap_or(now);
        let booking_date = booked_at.to_rfc3339();
        let travel_date = booking.travel_date.map(|d| d.format("%Y-%m-%d").to_string());
        let now_naive = now.naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO bookings (
                reference, customer, email, phone, destination, package_name,
                amount, payment_status, booking_date, travel_date,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(reference.to_string())
        .bind(&booking.customer)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(&booking.destination)
        .bind(&booking.package_name)
        .bind(booking.amount)
        .bind(&booking.payment_status)
        .bind(&booking_date)
        .bind(&travel_date)
        .bind(now_naive)
        .bind(now_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created booking".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_booking(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_reference(&self, reference: Uuid) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE reference = ?"
        ))
        .bind(reference.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_booking(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_booking).collect()
    }

    async fn list_all(&self) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_booking).collect()
    }

    async fn update_payment_flag(&self, id: i64, flag: &str) -> Result<Booking> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET payment_status = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(flag)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated booking".to_string()))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
