use crate::core::recommender::{classify_service, filter_by_area, score_and_rank};
use crate::core::{ConfigProvider, Pipeline, RosterSource, Storage};
use crate::domain::model::{ServiceProvider, Shortlist};
use crate::utils::error::Result;

pub const CSV_FILENAME: &str = "shortlist.csv";
pub const JSON_FILENAME: &str = "shortlist.json";

/// Pipeline wiring a roster source and a storage backend around the pure
/// ranking core. All recommendation semantics live in
/// [`crate::core::recommender`]; this type only adapts I/O.
pub struct RecommendPipeline<R: RosterSource, S: Storage, C: ConfigProvider> {
    roster: R,
    storage: S,
    config: C,
}

impl<R: RosterSource, S: Storage, C: ConfigProvider> RecommendPipeline<R, S, C> {
    pub fn new(roster: R, storage: S, config: C) -> Self {
        Self {
            roster,
            storage,
            config,
        }
    }

    fn render_csv(&self, shortlist: &Shortlist) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record([
            "rank",
            "id",
            "name",
            "email",
            "phone",
            "rating",
            "review_count",
            "resolved_price",
            "value_score",
        ])?;

        for (rank, candidate) in shortlist.ranked.iter().enumerate() {
            writer.write_record([
                (rank + 1).to_string(),
                candidate.provider.id.clone(),
                candidate.provider.name.clone(),
                candidate.provider.email.clone(),
                candidate.provider.phone.clone(),
                candidate.provider.rating.to_string(),
                candidate.provider.review_count.to_string(),
                candidate.resolved_price.to_string(),
                format!("{:.4}", candidate.value_score),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| crate::utils::error::RepairoError::ProcessingError {
                message: format!("CSV buffer flush failed: {}", e),
            })
    }
}

#[async_trait::async_trait]
impl<R: RosterSource, S: Storage, C: ConfigProvider> Pipeline for RecommendPipeline<R, S, C> {
    async fn fetch_roster(&self) -> Result<Vec<ServiceProvider>> {
        let roster = self.roster.load().await?;
        if roster.is_empty() {
            tracing::warn!("Roster source returned no providers");
        }
        Ok(roster)
    }

    async fn rank(&self, roster: Vec<ServiceProvider>) -> Result<Shortlist> {
        let policy = self.config.policy();
        let request = self.config.request();
        let property = self.config.property();

        let category = classify_service(&request, &policy);
        tracing::debug!("Classified request as '{}'", category);

        let candidates = filter_by_area(&roster, property.as_ref());
        tracing::debug!(
            "{} of {} providers in candidate pool",
            candidates.len(),
            roster.len()
        );

        let mut ranked = score_and_rank(&candidates, category, &policy);
        if let Some(n) = self.config.top_n() {
            ranked.truncate(n);
        }

        Ok(Shortlist {
            request_title: request.title,
            category,
            ranked,
        })
    }

    async fn publish(&self, shortlist: Shortlist) -> Result<String> {
        let formats = self.config.output_formats();

        if formats.iter().any(|f| f == "csv") {
            let csv_data = self.render_csv(&shortlist)?;
            self.storage.write_file(CSV_FILENAME, &csv_data).await?;
            tracing::debug!("Wrote {} ({} bytes)", CSV_FILENAME, csv_data.len());
        }

        if formats.iter().any(|f| f == "json") {
            let json_data = serde_json::to_vec_pretty(&shortlist)?;
            self.storage.write_file(JSON_FILENAME, &json_data).await?;
            tracing::debug!("Wrote {} ({} bytes)", JSON_FILENAME, json_data.len());
        }

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::roster::SeedRoster;
    use crate::core::policy::ScoringPolicy;
    use crate::domain::model::{PropertyLocation, ServiceCategory, ServiceRequest};
    use crate::utils::error::RepairoError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                RepairoError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        title: Option<String>,
        city: Option<String>,
        top_n: Option<usize>,
        formats: Vec<String>,
    }

    impl MockConfig {
        fn new(title: &str) -> Self {
            Self {
                title: Some(title.to_string()),
                city: None,
                top_n: Some(3),
                formats: vec!["csv".to_string(), "json".to_string()],
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn request(&self) -> ServiceRequest {
            ServiceRequest {
                title: self.title.clone(),
                ..ServiceRequest::default()
            }
        }

        fn property(&self) -> Option<PropertyLocation> {
            self.city.as_ref().map(|city| PropertyLocation {
                city: Some(city.clone()),
                ..PropertyLocation::default()
            })
        }

        fn top_n(&self) -> Option<usize> {
            self.top_n
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn output_formats(&self) -> Vec<String> {
            self.formats.clone()
        }

        fn policy(&self) -> ScoringPolicy {
            ScoringPolicy::default()
        }
    }

    #[tokio::test]
    async fn test_rank_classifies_and_truncates() {
        let storage = MockStorage::new();
        let config = MockConfig::new("Toilet is broken");
        let pipeline = RecommendPipeline::new(SeedRoster::new(), storage, config);

        let roster = pipeline.fetch_roster().await.unwrap();
        assert!(roster.len() > 3);

        let shortlist = pipeline.rank(roster).await.unwrap();
        assert_eq!(shortlist.category, ServiceCategory::Plumbing);
        assert_eq!(shortlist.ranked.len(), 3);
    }

    #[tokio::test]
    async fn test_rank_empty_roster_yields_empty_shortlist() {
        let storage = MockStorage::new();
        let config = MockConfig::new("Toilet is broken");
        let pipeline = RecommendPipeline::new(SeedRoster::new(), storage, config);

        let shortlist = pipeline.rank(Vec::new()).await.unwrap();
        assert!(shortlist.ranked.is_empty());
    }

    #[tokio::test]
    async fn test_publish_writes_requested_formats() {
        let storage = MockStorage::new();
        let config = MockConfig::new("Light fixture broken");
        let pipeline = RecommendPipeline::new(SeedRoster::new(), storage.clone(), config);

        let roster = pipeline.fetch_roster().await.unwrap();
        let shortlist = pipeline.rank(roster).await.unwrap();
        let output_path = pipeline.publish(shortlist).await.unwrap();

        assert_eq!(output_path, "test_output");

        let csv_data = storage.get_file(CSV_FILENAME).await.unwrap();
        let csv_text = String::from_utf8(csv_data).unwrap();
        assert!(csv_text.starts_with("rank,id,name"));
        assert_eq!(csv_text.lines().count(), 4); // header + top 3

        let json_data = storage.get_file(JSON_FILENAME).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json_data).unwrap();
        assert_eq!(parsed["category"], "electrical");
        assert_eq!(parsed["ranked"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_publish_skips_unrequested_formats() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new("General mess");
        config.formats = vec!["csv".to_string()];
        let pipeline = RecommendPipeline::new(SeedRoster::new(), storage.clone(), config);

        let roster = pipeline.fetch_roster().await.unwrap();
        let shortlist = pipeline.rank(roster).await.unwrap();
        pipeline.publish(shortlist).await.unwrap();

        assert!(storage.get_file(CSV_FILENAME).await.is_some());
        assert!(storage.get_file(JSON_FILENAME).await.is_none());
    }

    #[tokio::test]
    async fn test_csv_rows_are_rank_ordered() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new("General mess");
        config.top_n = None;
        let pipeline = RecommendPipeline::new(SeedRoster::new(), storage.clone(), config);

        let roster = pipeline.fetch_roster().await.unwrap();
        let shortlist = pipeline.rank(roster).await.unwrap();
        let expected: Vec<String> = shortlist
            .ranked
            .iter()
            .map(|c| c.provider.id.clone())
            .collect();
        pipeline.publish(shortlist).await.unwrap();

        let csv_data = storage.get_file(CSV_FILENAME).await.unwrap();
        let mut reader = csv::Reader::from_reader(csv_data.as_slice());
        let ids: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(1).unwrap().to_string())
            .collect();

        assert_eq!(ids, expected);
    }
}
