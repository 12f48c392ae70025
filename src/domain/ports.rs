use crate::core::policy::ScoringPolicy;
use crate::domain::model::{PropertyLocation, ServiceProvider, ServiceRequest, Shortlist};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the full provider roster to the ranking pipeline.
pub trait RosterSource: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<ServiceProvider>>> + Send;
}

/// Storage backend for published shortlists.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn request(&self) -> ServiceRequest;
    fn property(&self) -> Option<PropertyLocation>;
    fn top_n(&self) -> Option<usize>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> Vec<String>;
    fn policy(&self) -> ScoringPolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn fetch_roster(&self) -> Result<Vec<ServiceProvider>>;
    async fn rank(&self, roster: Vec<ServiceProvider>) -> Result<Shortlist>;
    async fn publish(&self, shortlist: Shortlist) -> Result<String>;
}
