use crate::models::Level;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.hh.ru/vacancies";
pub const DEFAULT_QUERY: &str = "Data Analyst OR Data Scientist OR Data Engineer";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Experience codes the API accepts for one qualification level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFilter {
    pub level: Level,
    pub experience: Vec<String>,
}

impl LevelFilter {
    pub fn new(level: Level, experience: &[&str]) -> Self {
        Self {
            level,
            experience: experience.iter().map(|code| code.to_string()).collect(),
        }
    }
}

/// Search parameters for the vacancy API
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Listings endpoint
    pub base_url: String,
    /// Free-text query
    pub text: String,
    /// Page size requested from the API
    pub per_page: u32,
    pub user_agent: String,
    /// Levels to collect, in collection order
    pub levels: Vec<LevelFilter>,
    /// Pause between consecutive page requests
    pub request_delay: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl SearchConfig {
    pub fn levels(&self) -> Vec<Level> {
        self.levels.iter().map(|filter| filter.level).collect()
    }

    pub fn experience_codes(&self, level: Level) -> &[String] {
        self.levels
            .iter()
            .find(|filter| filter.level == level)
            .map(|filter| filter.experience.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            text: DEFAULT_QUERY.to_string(),
            per_page: 100,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            levels: vec![
                LevelFilter::new(Level::Junior, &["noExperience", "between1And3"]),
                LevelFilter::new(Level::Middle, &["between3And6"]),
                LevelFilter::new(Level::Senior, &["moreThan6"]),
            ],
            request_delay: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }
}
