pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{FileRoster, HttpRoster, LocalStorage, SeedRoster};
pub use config::{CliConfig, TomlConfig};
pub use core::engine::RecommendEngine;
pub use core::pipeline::RecommendPipeline;
pub use core::policy::{KeywordRule, ScoringPolicy};
pub use core::recommender::{classify_service, filter_by_area, recommend, score_and_rank};
pub use domain::model::{
    PropertyLocation, RankedCandidate, ServiceCategory, ServiceProvider, ServiceRequest, Shortlist,
};
pub use utils::error::{RepairoError, Result};
