pub mod engine;
pub mod pipeline;
pub mod policy;
pub mod recommender;

pub use crate::domain::model::{
    PropertyLocation, RankedCandidate, ServiceCategory, ServiceProvider, ServiceRequest, Shortlist,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RosterSource, Storage};
pub use crate::utils::error::Result;
