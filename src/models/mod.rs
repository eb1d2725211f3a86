use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder employer name for vacancies that do not carry one
pub const UNKNOWN_EMPLOYER: &str = "Unknown";

/// Qualification level a vacancy was searched under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Junior,
    Middle,
    Senior,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Junior, Level::Middle, Level::Senior];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Junior => "Junior",
            Level::Middle => "Middle",
            Level::Senior => "Senior",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown qualification level '{0}'")]
pub struct UnknownLevel(pub String);

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "junior" => Ok(Level::Junior),
            "middle" => Ok(Level::Middle),
            "senior" => Ok(Level::Senior),
            _ => Err(UnknownLevel(value.to_string())),
        }
    }
}

/// One vacancy row as collected and persisted.
///
/// Every column except `id` may be empty once the row has been through a
/// CSV file, so the persisted shape keeps them optional. Use
/// [`crate::processing::preprocess`] to get typed [`Vacancy`] values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VacancyRecord {
    pub id: String,
    pub name: Option<String>,
    pub level: Option<String>,
    pub region: Option<String>,
    pub employer: Option<String>,
    pub salary_from: Option<f64>,
    pub salary_to: Option<f64>,
    pub currency: Option<String>,
    pub published_at: Option<String>,
}

/// Processed vacancy: required fields present, salaries zero-filled and the
/// publication timestamp parsed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vacancy {
    pub id: String,
    pub name: String,
    pub level: Level,
    pub region: String,
    pub employer: String,
    pub salary_from: f64,
    pub salary_to: f64,
    pub currency: Option<String>,
    pub published_at: DateTime<FixedOffset>,
}

impl Vacancy {
    /// True when at least one salary bound is nonzero
    pub fn has_salary(&self) -> bool {
        self.salary_from != 0.0 || self.salary_to != 0.0
    }

    /// Single salary figure for the vacancy: the midpoint when both bounds
    /// are stated, otherwise whichever bound is. `None` when neither is.
    pub fn salary_estimate(&self) -> Option<f64> {
        match (self.salary_from != 0.0, self.salary_to != 0.0) {
            (true, true) => Some((self.salary_from + self.salary_to) / 2.0),
            (true, false) => Some(self.salary_from),
            (false, true) => Some(self.salary_to),
            (false, false) => None,
        }
    }
}

impl From<&Vacancy> for VacancyRecord {
    fn from(vacancy: &Vacancy) -> Self {
        Self {
            id: vacancy.id.clone(),
            name: Some(vacancy.name.clone()),
            level: Some(vacancy.level.to_string()),
            region: Some(vacancy.region.clone()),
            employer: Some(vacancy.employer.clone()),
            salary_from: Some(vacancy.salary_from),
            salary_to: Some(vacancy.salary_to),
            currency: vacancy.currency.clone(),
            published_at: Some(vacancy.published_at.to_rfc3339()),
        }
    }
}
