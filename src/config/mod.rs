pub mod toml_config;

pub use toml_config::TomlConfig;

use crate::core::policy::ScoringPolicy;
use crate::core::ConfigProvider;
use crate::domain::model::{PropertyLocation, ServiceRequest};
use crate::utils::error::{RepairoError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "repairo"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Rank contractors for a property maintenance request")
)]
pub struct CliConfig {
    /// TOML config file; when set, it takes precedence over the other flags.
    #[cfg_attr(feature = "cli", arg(long))]
    pub config: Option<String>,

    /// Provider directory endpoint returning a JSON roster.
    #[cfg_attr(feature = "cli", arg(long))]
    pub roster_endpoint: Option<String>,

    /// Local TOML roster file.
    #[cfg_attr(feature = "cli", arg(long))]
    pub roster_file: Option<String>,

    #[cfg_attr(feature = "cli", arg(long))]
    pub title: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = ""))]
    pub description: String,

    #[cfg_attr(feature = "cli", arg(long))]
    pub city: Option<String>,

    #[cfg_attr(feature = "cli", arg(long))]
    pub address: Option<String>,

    #[cfg_attr(feature = "cli", arg(long))]
    pub county: Option<String>,

    /// Shortlist size; omit to rank the whole candidate pool.
    #[cfg_attr(feature = "cli", arg(long))]
    pub top: Option<usize>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    #[cfg_attr(
        feature = "cli",
        arg(long, value_delimiter = ',', default_value = "csv")
    )]
    pub formats: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn request(&self) -> ServiceRequest {
        ServiceRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            created_at: None,
        }
    }

    fn property(&self) -> Option<PropertyLocation> {
        if self.city.is_none() && self.address.is_none() && self.county.is_none() {
            return None;
        }
        Some(PropertyLocation {
            city: self.city.clone(),
            full_address: self.address.clone(),
            county: self.county.clone(),
        })
    }

    fn top_n(&self) -> Option<usize> {
        self.top
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> Vec<String> {
        self.formats.clone()
    }

    fn policy(&self) -> ScoringPolicy {
        ScoringPolicy::default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.roster_endpoint {
            validate_url("roster_endpoint", endpoint)?;
        }

        if self.roster_endpoint.is_some() && self.roster_file.is_some() {
            return Err(RepairoError::InvalidConfigValueError {
                field: "roster_file".to_string(),
                value: self.roster_file.clone().unwrap_or_default(),
                reason: "Pass either --roster-endpoint or --roster-file, not both".to_string(),
            });
        }

        if let Some(file) = &self.roster_file {
            validate_path("roster_file", file)?;
        }

        if let Some(top) = self.top {
            validate_positive_number("top", top, 1)?;
        }

        validate_path("output_path", &self.output_path)?;

        let valid_formats = ["csv", "json"];
        for format in &self.formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(RepairoError::InvalidConfigValueError {
                    field: "formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            config: None,
            roster_endpoint: None,
            roster_file: None,
            title: Some("Toilet is broken".to_string()),
            description: String::new(),
            city: Some("Springfield".to_string()),
            address: None,
            county: None,
            top: Some(3),
            output_path: "./output".to_string(),
            formats: vec!["csv".to_string()],
            verbose: false,
            log_json: false,
        }
    }

    #[test]
    fn test_valid_cli_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_conflicting_roster_sources_rejected() {
        let mut config = base_config();
        config.roster_endpoint = Some("https://directory.example.com".to_string());
        config.roster_file = Some("roster.toml".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_top_rejected() {
        let mut config = base_config();
        config.top = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_property_absent_when_no_location_flags() {
        let mut config = base_config();
        config.city = None;
        assert!(config.property().is_none());
    }

    #[test]
    fn test_property_built_from_location_flags() {
        let mut config = base_config();
        config.county = Some("Greene".to_string());
        let property = config.property().unwrap();
        assert_eq!(property.city.as_deref(), Some("Springfield"));
        assert_eq!(property.county.as_deref(), Some("Greene"));
        assert!(property.full_address.is_none());
    }
}
