use crate::collector::traits::VacancySource;
use crate::collector::types::VacancyPage;
use crate::config::SearchConfig;
use crate::error::FetchError;
use crate::models::Level;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// HeadHunter vacancies API client
pub struct HhClient {
    client: Client,
    config: SearchConfig,
}

impl HhClient {
    /// Create a client with the default search parameters
    pub fn new() -> Result<Self> {
        Self::with_config(SearchConfig::default())
    }

    /// Create a client with custom search parameters
    pub fn with_config(config: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn query(&self, level: Level, region: &str, page: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("text", self.config.text.clone()),
            ("area", region.to_string()),
            ("per_page", self.config.per_page.to_string()),
        ];
        for code in self.config.experience_codes(level) {
            query.push(("experience", code.clone()));
        }
        query.push(("page", page.to_string()));
        query
    }
}

#[async_trait]
impl VacancySource for HhClient {
    async fn fetch_page(&self, level: Level, region: &str, page: u32) -> Result<VacancyPage, FetchError> {
        debug!("GET {} level={} region={} page={}", self.config.base_url, level, region, page);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&self.query(level, region, page))
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            debug!("{} returned status: {}", self.source_name(), status);
            return Err(FetchError::Status { status });
        }

        response.json::<VacancyPage>().await.map_err(FetchError::Decode)
    }

    fn source_name(&self) -> &'static str {
        "HeadHunter"
    }
}
