use crate::collector::types::VacancyPage;
use crate::error::FetchError;
use crate::models::Level;
use async_trait::async_trait;

/// Paginated source of vacancy listings
#[async_trait]
pub trait VacancySource: Send + Sync {
    /// Fetch one page of vacancies for a level/region pair
    async fn fetch_page(&self, level: Level, region: &str, page: u32) -> Result<VacancyPage, FetchError>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
