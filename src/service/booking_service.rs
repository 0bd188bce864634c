use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    domain::{count_by_status, Booking, BookingDraft, BookingStatus, StatusCounts},
    error::{AppError, Result},
    mail::Mailer,
    repository::BookingRepository,
};

/// Bookings enter through the external checkout flow and have their raw
/// payment flag flipped by the payment-confirmation webhook. Everything
/// the back office shows about them is derived at read time.
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
    mailer: Option<Arc<Mailer>>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>, mailer: Option<Arc<Mailer>>) -> Self {
        Self { repo, mailer }
    }

    pub async fn create_booking(&self, draft: BookingDraft) -> Result<Booking> {
        let booking = self.repo.create(draft.canonicalize()).await?;

        if let Some(mailer) = &self.mailer {
            let mailer = mailer.clone();
            let for_mail = booking.clone();
            tokio::spawn(async move {
                if let Err(e) = mailer.send_booking_confirmation(&for_mail).await {
                    tracing::warn!("Failed to send booking confirmation: {:?}", e);
                }
            });
        }

        Ok(booking)
    }

    /// Webhook entry point: the external payment processor confirms (or
    /// reverses) a payment by writing the raw flag. This is the only write
    /// to it anywhere in the system.
    pub async fn record_payment_flag(&self, reference: Uuid, flag: &str) -> Result<Booking> {
        let booking = self
            .repo
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        self.repo.update_payment_flag(booking.id, flag).await
    }

    /// List bookings, optionally filtered by *derived* status. The status
    /// is not a column, so a filtered listing scans and derives with the
    /// caller's `now`, then pages in memory.
    pub async fn list(
        &self,
        status: Option<BookingStatus>,
        limit: i64,
        offset: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        match status {
            None => self.repo.list(limit, offset).await,
            Some(wanted) => {
                let all = self.repo.list_all().await?;
                Ok(all
                    .into_iter()
                    .filter(|b| b.status(now) == wanted)
                    .skip(offset.max(0) as usize)
                    .take(limit.max(0) as usize)
                    .collect())
            }
        }
    }

    pub async fn find(&self, id: i64) -> Result<Booking> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }

    /// Tallies for the filter-tab badges. Always derived from the same
    /// rule the listing uses, so badges and rows cannot disagree.
    pub async fn status_counts(&self, now: DateTime<Utc>) -> Result<StatusCounts> {
        let all = self.repo.list_all().await?;
        Ok(count_by_status(&all, now))
    }
}
