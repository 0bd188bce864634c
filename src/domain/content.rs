use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Marketing page content for one destination city, served to the public
/// website by slug. Upsert-only: editing the same slug replaces the page.
#[derive(Debug, Clone, Serialize)]
pub struct CityPage {
    pub id: i64,
    pub slug: String,
    pub city: String,
    pub hero_heading: String,
    pub intro: String,
    pub highlights: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertCityPageRequest {
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[serde(default)]
    pub hero_heading: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}
