use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub destination: String,
    pub message: String,
    /// Where the enquiry came from: a city landing page slug, "referral",
    /// "walk-in" and so on. Free text.
    pub source: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadStatus {
    New,
    Contacted,
    Converted,
    Closed,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Converted => "Converted",
            LeadStatus::Closed => "Closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "New" => Some(LeadStatus::New),
            "Contacted" => Some(LeadStatus::Contacted),
            "Converted" => Some(LeadStatus::Converted),
            "Closed" => Some(LeadStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLeadRequest {
    pub status: Option<LeadStatus>,
    pub phone: Option<String>,
    pub destination: Option<String>,
    pub message: Option<String>,
}
