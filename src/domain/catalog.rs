use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// Catalog tables the package builder picks from. Plain CRUD, no derived
// state.

#[derive(Debug, Clone, Serialize)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHotelRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub city: String,
    /// "3-star", "heritage", etc.
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub capacity: i64,
}

/// A scheduled group departure with a fixed date and seat count.
#[derive(Debug, Clone, Serialize)]
pub struct FixedDeparture {
    pub id: i64,
    pub city: String,
    pub package_name: String,
    pub departure_date: NaiveDate,
    pub seats: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFixedDepartureRequest {
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[serde(default)]
    pub package_name: String,
    pub departure_date: NaiveDate,
    pub seats: i64,
}
