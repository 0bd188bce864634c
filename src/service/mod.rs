pub mod booking_service;
pub mod lead_service;
pub mod report_service;

use std::sync::Arc;

use crate::mail::Mailer;
use crate::repository::*;

pub use booking_service::BookingService;
pub use lead_service::LeadService;
pub use report_service::{DashboardSummary, ReportService};

pub struct ServiceContext {
    pub booking_repo: Arc<dyn BookingRepository>,
    pub lead_repo: Arc<dyn LeadRepository>,
    pub package_repo: Arc<dyn PackageRepository>,
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub content_repo: Arc<dyn ContentRepository>,
    pub employee_repo: Arc<dyn EmployeeRepository>,
    pub booking_service: Arc<BookingService>,
    pub lead_service: Arc<LeadService>,
    pub report_service: Arc<ReportService>,
}

impl ServiceContext {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        lead_repo: Arc<dyn LeadRepository>,
        package_repo: Arc<dyn PackageRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
        content_repo: Arc<dyn ContentRepository>,
        employee_repo: Arc<dyn EmployeeRepository>,
        mailer: Option<Arc<Mailer>>,
    ) -> Self {
        let booking_service = Arc::new(BookingService::new(booking_repo.clone(), mailer.clone()));
        let lead_service = Arc::new(LeadService::new(lead_repo.clone(), mailer));
        let report_service = Arc::new(ReportService::new(
            booking_repo.clone(),
            lead_repo.clone(),
            package_repo.clone(),
            catalog_repo.clone(),
        ));

        Self {
            booking_repo,
            lead_repo,
            package_repo,
            catalog_repo,
            content_repo,
            employee_repo,
            booking_service,
            lead_service,
            report_service,
        }
    }
}
