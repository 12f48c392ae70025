use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Service category a maintenance request resolves to.
///
/// Serialized lowercase (`plumbing`, `electrical`, `general`) so the same
/// literals work as TOML price-table keys and JSON output values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Plumbing,
    Electrical,
    General,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Plumbing => "plumbing",
            ServiceCategory::Electrical => "electrical",
            ServiceCategory::General => "general",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contractor in the provider roster.
///
/// Roster entries are seed data: loaded once from a roster source and never
/// mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Average review score in [0, 5].
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    /// Free-text locality names the provider claims to serve.
    #[serde(default)]
    pub service_areas: Vec<String>,
    /// Informational category labels; not used in scoring.
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Quote per category. A missing category falls back to `general`,
    /// then to the policy's sentinel price.
    #[serde(default)]
    pub price_table: HashMap<ServiceCategory, f64>,
}

/// A maintenance request, as handed over by the request subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ServiceRequest {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Location descriptors of the property a request belongs to.
///
/// All fields are free text; missing fields are treated as empty during
/// area matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
}

/// A scored provider, computed per invocation and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub provider: ServiceProvider,
    /// Quote selected for the request's category.
    pub resolved_price: f64,
    /// Blended rating/price score in [0, 1].
    pub value_score: f64,
}

/// Result of a full ranking run, handed to the publish step.
#[derive(Debug, Clone, Serialize)]
pub struct Shortlist {
    pub request_title: Option<String>,
    pub category: ServiceCategory,
    pub ranked: Vec<RankedCandidate>,
}
