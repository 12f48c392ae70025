use crate::domain::model::ServiceCategory;
use crate::utils::error::{RepairoError, Result};
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};

/// One keyword rule: a category and the title substrings that select it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    pub category: ServiceCategory,
    pub keywords: Vec<String>,
}

/// Tunable ranking policy.
///
/// Defaults reproduce the production constants: plumbing keywords checked
/// before electrical ones, a 60/40 rating/price blend, and a 999 sentinel
/// quote for providers with no usable price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default = "default_rating_weight")]
    pub rating_weight: f64,
    #[serde(default = "default_price_weight")]
    pub price_weight: f64,
    #[serde(default = "default_fallback_price")]
    pub fallback_price: f64,
    /// Checked in order; the first rule with a matching keyword wins.
    #[serde(default = "default_keyword_rules")]
    pub keyword_rules: Vec<KeywordRule>,
}

fn default_rating_weight() -> f64 {
    0.6
}

fn default_price_weight() -> f64 {
    0.4
}

fn default_fallback_price() -> f64 {
    999.0
}

fn default_keyword_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule {
            category: ServiceCategory::Plumbing,
            keywords: vec!["toilet".into(), "sink".into(), "plumb".into()],
        },
        KeywordRule {
            category: ServiceCategory::Electrical,
            keywords: vec!["light".into(), "elect".into()],
        },
    ]
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            rating_weight: default_rating_weight(),
            price_weight: default_price_weight(),
            fallback_price: default_fallback_price(),
            keyword_rules: default_keyword_rules(),
        }
    }
}

impl Validate for ScoringPolicy {
    fn validate(&self) -> Result<()> {
        validate_range("scoring.rating_weight", self.rating_weight, 0.0, 1.0)?;
        validate_range("scoring.price_weight", self.price_weight, 0.0, 1.0)?;

        // Weights must sum to 1 so value scores stay in [0, 1].
        let sum = self.rating_weight + self.price_weight;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(RepairoError::InvalidConfigValueError {
                field: "scoring".to_string(),
                value: format!("{} + {}", self.rating_weight, self.price_weight),
                reason: "rating_weight and price_weight must sum to 1.0".to_string(),
            });
        }

        if self.fallback_price <= 0.0 {
            return Err(RepairoError::InvalidConfigValueError {
                field: "scoring.fallback_price".to_string(),
                value: self.fallback_price.to_string(),
                reason: "Fallback price must be positive".to_string(),
            });
        }

        for rule in &self.keyword_rules {
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(RepairoError::InvalidConfigValueError {
                    field: "scoring.keyword_rules".to_string(),
                    value: rule.category.to_string(),
                    reason: "Keywords cannot be empty or whitespace-only".to_string(),
                });
            }
        }

        Ok(())
    }
}
