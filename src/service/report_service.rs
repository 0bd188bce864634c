use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    domain::{count_by_status, sum_revenue, BookingStatus, LeadStatus, StatusCounts},
    error::{AppError, Result},
    repository::{BookingRepository, CatalogRepository, LeadRepository, PackageRepository},
};

/// Dashboard tiles. Booking counts and revenue come from the same
/// derivation pass, evaluated at one `now`, so the tiles always agree with
/// the list screens rendered in the same request.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub bookings: StatusCounts,
    pub bookings_total: usize,
    pub revenue_completed: f64,
    pub leads_new: i64,
    pub leads_contacted: i64,
    pub leads_converted: i64,
    pub packages_total: usize,
    pub upcoming_departures: usize,
}

pub struct ReportService {
    booking_repo: Arc<dyn BookingRepository>,
    lead_repo: Arc<dyn LeadRepository>,
    package_repo: Arc<dyn PackageRepository>,
    catalog_repo: Arc<dyn CatalogRepository>,
}

impl ReportService {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        lead_repo: Arc<dyn LeadRepository>,
        package_repo: Arc<dyn PackageRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self {
            booking_repo,
            lead_repo,
            package_repo,
            catalog_repo,
        }
    }

    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<DashboardSummary> {
        let bookings = self.booking_repo.list_all().await?;
        let counts = count_by_status(&bookings, now);
        let revenue_completed = sum_revenue(&bookings, BookingStatus::Completed, now);

        let leads_new = self.lead_repo.count_by_status(LeadStatus::New).await?;
        let leads_contacted = self.lead_repo.count_by_status(LeadStatus::Contacted).await?;
        let leads_converted = self.lead_repo.count_by_status(LeadStatus::Converted).await?;

        let packages_total = self.package_repo.list().await?.len();
        let upcoming_departures = self
            .catalog_repo
            .list_fixed_departures()
            .await?
            .iter()
            .filter(|d| d.departure_date >= now.date_naive())
            .count();

        Ok(DashboardSummary {
            bookings: counts,
            bookings_total: counts.total(),
            revenue_completed,
            leads_new,
            leads_contacted,
            leads_converted,
            packages_total,
            upcoming_departures,
        })
    }

    pub async fn revenue(&self, status: BookingStatus, now: DateTime<Utc>) -> Result<f64> {
        let bookings = self.booking_repo.list_all().await?;
        Ok(sum_revenue(&bookings, status, now))
    }

    /// CSV export of all bookings. The `status` column is the derived
    /// value verbatim; there is no separate formatting rule for exports.
    pub async fn export_bookings_csv(&self, now: DateTime<Utc>) -> Result<String> {
        let bookings = self.booking_repo.list_all().await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "id",
                "reference",
                "customer",
                "email",
                "phone",
                "destination",
                "package",
                "amount",
                "status",
                "booking_date",
                "travel_date",
            ])
            .map_err(|e| AppError::Internal(e.to_string()))?;

        for booking in &bookings {
            writer
                .write_record([
                    booking.id.to_string(),
                    booking.reference.to_string(),
                    booking.customer.clone(),
                    booking.email.clone(),
                    booking.phone.clone(),
                    booking.destination.clone(),
                    booking.package_name.clone(),
                    format!("{:.2}", booking.amount),
                    booking.status(now).as_str().to_string(),
                    booking
                        .booked_at
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    booking
                        .travel_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                ])
                .map_err(|e| AppError::Internal(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
    }
}
