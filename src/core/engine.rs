use crate::core::Pipeline;
use crate::utils::error::Result;

/// Runs a pipeline end to end: fetch the roster, rank it, publish the
/// shortlist.
pub struct RecommendEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RecommendEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Fetching provider roster...");
        let roster = self.pipeline.fetch_roster().await?;
        tracing::info!("Fetched {} providers", roster.len());

        tracing::info!("Ranking candidates...");
        let shortlist = self.pipeline.rank(roster).await?;
        tracing::info!(
            "Ranked {} candidates for category '{}'",
            shortlist.ranked.len(),
            shortlist.category
        );

        tracing::info!("Publishing shortlist...");
        let output_path = self.pipeline.publish(shortlist).await?;
        tracing::info!("Shortlist saved to: {}", output_path);

        Ok(output_path)
    }
}
