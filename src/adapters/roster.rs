//! Roster source adapters: HTTP directory, local TOML file, built-in seed.

use crate::core::RosterSource;
use crate::domain::model::{ServiceCategory, ServiceProvider};
use crate::utils::error::{RepairoError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

fn validate_provider(provider: &ServiceProvider) -> Result<()> {
    validate_non_empty_string("provider.id", &provider.id)?;
    validate_non_empty_string("provider.name", &provider.name)?;
    validate_range("provider.rating", provider.rating, 0.0, 5.0)?;

    for (category, price) in &provider.price_table {
        if *price <= 0.0 {
            return Err(RepairoError::InvalidConfigValueError {
                field: format!("provider.price_table.{}", category),
                value: price.to_string(),
                reason: format!("Quote for provider '{}' must be positive", provider.id),
            });
        }
    }

    Ok(())
}

fn validate_roster(providers: &[ServiceProvider]) -> Result<()> {
    for provider in providers {
        validate_provider(provider)?;
    }
    Ok(())
}

/// Fetches the roster as a JSON array from a provider directory endpoint.
#[derive(Debug, Clone)]
pub struct HttpRoster {
    endpoint: String,
    client: Client,
}

impl HttpRoster {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }
}

impl RosterSource for HttpRoster {
    async fn load(&self) -> Result<Vec<ServiceProvider>> {
        tracing::debug!("Fetching roster from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("Roster response status: {}", status);
        if !status.is_success() {
            return Err(RepairoError::RosterError {
                message: format!("Directory endpoint returned {}", status),
            });
        }

        let providers: Vec<ServiceProvider> = response.json().await?;
        validate_roster(&providers)?;
        Ok(providers)
    }
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    providers: Vec<ServiceProvider>,
}

/// Loads the roster from a local TOML file with `[[providers]]` tables.
#[derive(Debug, Clone)]
pub struct FileRoster {
    path: PathBuf,
}

impl FileRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for FileRoster {
    async fn load(&self) -> Result<Vec<ServiceProvider>> {
        tracing::debug!("Loading roster file: {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;

        let roster: RosterFile =
            toml::from_str(&content).map_err(|e| RepairoError::ConfigValidationError {
                field: "roster_file".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        validate_roster(&roster.providers)?;
        Ok(roster.providers)
    }
}

/// The built-in seed roster the hosted application shipped with.
#[derive(Debug, Clone, Default)]
pub struct SeedRoster;

impl SeedRoster {
    pub fn new() -> Self {
        Self
    }

    pub fn providers() -> Vec<ServiceProvider> {
        let provider = |id: &str,
                        name: &str,
                        email: &str,
                        phone: &str,
                        rating: f64,
                        review_count: u32,
                        areas: &[&str],
                        specialties: &[&str],
                        prices: &[(ServiceCategory, f64)]| {
            ServiceProvider {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                rating,
                review_count,
                service_areas: areas.iter().map(|s| s.to_string()).collect(),
                specialties: specialties.iter().map(|s| s.to_string()).collect(),
                price_table: prices.iter().copied().collect::<HashMap<_, _>>(),
            }
        };

        vec![
            provider(
                "c1",
                "Rapid Rooter Plumbing",
                "dispatch@rapidrooter.example",
                "555-0101",
                4.9,
                182,
                &["Springfield", "Greene"],
                &["Leak repair", "Drain cleaning"],
                &[
                    (ServiceCategory::Plumbing, 120.0),
                    (ServiceCategory::General, 150.0),
                ],
            ),
            provider(
                "c2",
                "Bright Spark Electric",
                "jobs@brightspark.example",
                "555-0102",
                4.7,
                96,
                &["Springfield"],
                &["Rewiring", "Fixture installation"],
                &[
                    (ServiceCategory::Electrical, 140.0),
                    (ServiceCategory::General, 160.0),
                ],
            ),
            provider(
                "c3",
                "Greene County Handyman Co",
                "hello@gchandyman.example",
                "555-0103",
                4.5,
                210,
                &["Greene", "Shelbyville"],
                &["General repairs"],
                &[(ServiceCategory::General, 95.0)],
            ),
            provider(
                "c4",
                "Summit Home Services",
                "contact@summithome.example",
                "555-0104",
                4.2,
                64,
                &["Shelbyville", "Ogdenville"],
                &["Painting", "Carpentry"],
                &[
                    (ServiceCategory::Plumbing, 180.0),
                    (ServiceCategory::Electrical, 175.0),
                    (ServiceCategory::General, 110.0),
                ],
            ),
            provider(
                "c5",
                "Heritage Plumbing & Heating",
                "office@heritageph.example",
                "555-0105",
                4.8,
                143,
                &["Ogdenville", "North Haverbrook"],
                &["Boilers", "Pipework"],
                &[
                    (ServiceCategory::Plumbing, 135.0),
                    (ServiceCategory::General, 170.0),
                ],
            ),
            provider(
                "c6",
                "Reliable Repairs Group",
                "team@reliablerepairs.example",
                "555-0106",
                3.9,
                41,
                &["Springfield", "North Haverbrook"],
                &["General repairs", "Appliances"],
                &[(ServiceCategory::General, 85.0)],
            ),
        ]
    }
}

impl RosterSource for SeedRoster {
    async fn load(&self) -> Result<Vec<ServiceProvider>> {
        Ok(Self::providers())
    }
}

/// Roster source selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnyRoster {
    Http(HttpRoster),
    File(FileRoster),
    Seed(SeedRoster),
}

impl RosterSource for AnyRoster {
    async fn load(&self) -> Result<Vec<ServiceProvider>> {
        match self {
            AnyRoster::Http(source) => source.load().await,
            AnyRoster::File(source) => source.load().await,
            AnyRoster::Seed(source) => source.load().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_seed_roster_is_valid() {
        let providers = SeedRoster::new().load().await.unwrap();
        assert_eq!(providers.len(), 6);
        assert!(validate_roster(&providers).is_ok());
    }

    #[tokio::test]
    async fn test_file_roster_parses_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let toml_content = r#"
[[providers]]
id = "p1"
name = "Test Plumbing"
email = "p1@example.com"
phone = "555-0100"
rating = 4.5
review_count = 20
service_areas = ["Springfield"]
specialties = ["Pipework"]

[providers.price_table]
plumbing = 110.0
general = 130.0

[[providers]]
id = "p2"
name = "Test Electric"
rating = 4.0
service_areas = ["Shelbyville"]

[providers.price_table]
electrical = 150.0
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let providers = FileRoster::new(temp_file.path()).load().await.unwrap();

        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].id, "p1");
        assert_eq!(
            providers[0].price_table[&ServiceCategory::Plumbing],
            110.0
        );
        // Optional contact fields default to empty.
        assert_eq!(providers[1].email, "");
    }

    #[tokio::test]
    async fn test_file_roster_rejects_bad_rating() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let toml_content = r#"
[[providers]]
id = "p1"
name = "Overrated"
rating = 6.5
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let result = FileRoster::new(temp_file.path()).load().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_file_roster_rejects_non_positive_quote() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let toml_content = r#"
[[providers]]
id = "p1"
name = "Free Lunch"
rating = 4.0

[providers.price_table]
general = 0.0
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let result = FileRoster::new(temp_file.path()).load().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_file_roster_missing_file_is_io_error() {
        let result = FileRoster::new("/nonexistent/roster.toml").load().await;
        assert!(matches!(result, Err(RepairoError::IoError(_))));
    }
}
