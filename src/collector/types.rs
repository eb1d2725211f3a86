use crate::error::FetchError;
use crate::models::{Level, VacancyRecord, UNKNOWN_EMPLOYER};
use serde::Deserialize;

/// One page of the listings endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct VacancyPage {
    #[serde(default)]
    pub items: Vec<RawVacancy>,
    /// Total number of pages for the query
    pub pages: u32,
    #[serde(default)]
    pub found: Option<u64>,
}

/// Vacancy object as returned by the API, reduced to the fields we keep
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawVacancy {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub employer: Option<RawEmployer>,
    #[serde(default)]
    pub salary: Option<RawSalary>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawEmployer {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawSalary {
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl RawVacancy {
    /// Flatten into a row tagged with the level and region it was searched under
    pub fn into_record(self, level: Level, region: &str) -> VacancyRecord {
        let employer = self
            .employer
            .and_then(|employer| employer.name)
            .unwrap_or_else(|| UNKNOWN_EMPLOYER.to_string());
        let (salary_from, salary_to, currency) = match self.salary {
            Some(salary) => (salary.from, salary.to, salary.currency),
            None => (None, None, None),
        };

        VacancyRecord {
            id: self.id,
            name: self.name,
            level: Some(level.to_string()),
            region: Some(region.to_string()),
            employer: Some(employer),
            salary_from,
            salary_to,
            currency,
            published_at: self.published_at,
        }
    }
}

/// How pagination for one level/region pair ended
#[derive(Debug)]
pub enum FetchStatus {
    /// Every page reported by the API was read
    Complete,
    /// Page `page` failed; items from earlier pages are kept
    Interrupted { page: u32, error: FetchError },
}

/// Items gathered for one level/region pair
#[derive(Debug)]
pub struct LevelFetch {
    pub level: Level,
    pub region: String,
    pub items: Vec<RawVacancy>,
    pub status: FetchStatus,
}

impl LevelFetch {
    pub fn is_complete(&self) -> bool {
        matches!(self.status, FetchStatus::Complete)
    }
}

#[derive(Debug)]
pub struct Interruption {
    pub level: Level,
    pub region: String,
    pub page: u32,
    pub error: FetchError,
}

/// Result of a full collection run
#[derive(Debug, Default)]
pub struct Collection {
    pub records: Vec<VacancyRecord>,
    pub interrupted: Vec<Interruption>,
}

impl Collection {
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_empty()
    }
}
