use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod booking_repository;
pub mod catalog_repository;
pub mod content_repository;
pub mod employee_repository;
pub mod lead_repository;
pub mod package_repository;

pub use booking_repository::SqliteBookingRepository;
pub use catalog_repository::SqliteCatalogRepository;
pub use content_repository::SqliteContentRepository;
pub use employee_repository::SqliteEmployeeRepository;
pub use lead_repository::SqliteLeadRepository;
pub use package_repository::SqlitePackageRepository;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: NewBooking) -> Result<Booking>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>>;
    async fn find_by_reference(&self, reference: Uuid) -> Result<Option<Booking>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Booking>>;
    /// Full table scan for aggregation and export. Status is derived, not
    /// stored, so status filters cannot be pushed into SQL.
    async fn list_all(&self) -> Result<Vec<Booking>>;
    async fn update_payment_flag(&self, id: i64, flag: &str) -> Result<Booking>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn create(&self, lead: CreateLeadRequest) -> Result<Lead>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Lead>>;
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Lead>>;
    async fn list_by_status(&self, status: LeadStatus) -> Result<Vec<Lead>>;
    async fn count_by_status(&self, status: LeadStatus) -> Result<i64>;
    async fn update(&self, id: i64, update: UpdateLeadRequest) -> Result<Lead>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn create(&self, package: CreatePackageRequest) -> Result<TourPackage>;
    async fn find_by_id(&self, id: i64) -> Result<Option<TourPackage>>;
    async fn list(&self) -> Result<Vec<TourPackage>>;
    async fn list_by_city(&self, city: &str) -> Result<Vec<TourPackage>>;
    async fn update(&self, id: i64, update: UpdatePackageRequest) -> Result<TourPackage>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_hotel(&self, hotel: CreateHotelRequest) -> Result<Hotel>;
    async fn list_hotels(&self) -> Result<Vec<Hotel>>;
    async fn delete_hotel(&self, id: i64) -> Result<()>;

    async fn create_vehicle(&self, vehicle: CreateVehicleRequest) -> Result<Vehicle>;
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>>;
    async fn delete_vehicle(&self, id: i64) -> Result<()>;

    async fn create_fixed_departure(
        &self,
        departure: CreateFixedDepartureRequest,
    ) -> Result<FixedDeparture>;
    async fn list_fixed_departures(&self) -> Result<Vec<FixedDeparture>>;
    async fn delete_fixed_departure(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn upsert(&self, slug: &str, page: UpsertCityPageRequest) -> Result<CityPage>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CityPage>>;
    async fn list(&self) -> Result<Vec<CityPage>>;
    async fn delete(&self, slug: &str) -> Result<()>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create(&self, employee: CreateEmployeeRequest) -> Result<Employee>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>>;
    async fn list(&self) -> Result<Vec<Employee>>;
    async fn update(&self, id: i64, update: UpdateEmployeeRequest) -> Result<Employee>;
    async fn delete(&self, id: i64) -> Result<()>;
}
