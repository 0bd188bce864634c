use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A sellable tour package built in the back office and published to the
/// marketing site for its destination city.
#[derive(Debug, Clone, Serialize)]
pub struct TourPackage {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub days: i64,
    pub nights: i64,
    pub price: f64,
    pub summary: String,
    pub itinerary: Vec<ItineraryDay>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: i64,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePackageRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    pub days: i64,
    pub nights: i64,
    pub price: f64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub days: Option<i64>,
    pub nights: Option<i64>,
    pub price: Option<f64>,
    pub summary: Option<String>,
    pub itinerary: Option<Vec<ItineraryDay>>,
}
