use crate::core::policy::ScoringPolicy;
use crate::core::ConfigProvider;
use crate::domain::model::{PropertyLocation, ServiceRequest};
use crate::utils::error::{RepairoError, Result};
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub application: ApplicationConfig,
    pub roster: RosterConfig,
    pub request: Option<ServiceRequest>,
    pub property: Option<PropertyLocation>,
    pub recommendation: Option<RecommendationConfig>,
    pub scoring: Option<ScoringPolicy>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub r#type: String,
    pub endpoint: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub top_n: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RepairoError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RepairoError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment variable values.
    /// Unset variables are left in place so validation reports them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        match self.roster.r#type.as_str() {
            "http" => {
                let endpoint = validate_required_field("roster.endpoint", &self.roster.endpoint)?;
                validate_url("roster.endpoint", endpoint)?;
            }
            "file" => {
                let file = validate_required_field("roster.file", &self.roster.file)?;
                validate_path("roster.file", file)?;
            }
            "seed" => {}
            other => {
                return Err(RepairoError::InvalidConfigValueError {
                    field: "roster.type".to_string(),
                    value: other.to_string(),
                    reason: "Supported roster types: http, file, seed".to_string(),
                });
            }
        }

        validate_path("output.path", &self.output.path)?;

        let valid_formats = ["csv", "json"];
        for format in &self.output.formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(RepairoError::InvalidConfigValueError {
                    field: "output.formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        if let Some(recommendation) = &self.recommendation {
            if let Some(top_n) = recommendation.top_n {
                validate_positive_number("recommendation.top_n", top_n, 1)?;
            }
        }

        if let Some(scoring) = &self.scoring {
            scoring.validate()?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn request(&self) -> ServiceRequest {
        self.request.clone().unwrap_or_default()
    }

    fn property(&self) -> Option<PropertyLocation> {
        self.property.clone()
    }

    fn top_n(&self) -> Option<usize> {
        self.recommendation.as_ref().and_then(|r| r.top_n)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> Vec<String> {
        self.output.formats.clone()
    }

    fn policy(&self) -> ScoringPolicy {
        self.scoring.clone().unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
