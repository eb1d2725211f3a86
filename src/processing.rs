use crate::error::ProcessError;
use crate::models::{Level, Vacancy, VacancyRecord, UNKNOWN_EMPLOYER};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use tracing::debug;

/// Turn persisted rows into typed vacancies.
///
/// Rows without a title, level, region or publication date are dropped.
/// Missing salary bounds become 0 and a missing employer becomes the
/// placeholder name. An unparseable date or level aborts processing.
pub fn preprocess(records: Vec<VacancyRecord>) -> Result<Vec<Vacancy>, ProcessError> {
    let total = records.len();
    let mut vacancies = Vec::with_capacity(total);

    for record in records {
        let VacancyRecord {
            id,
            name,
            level,
            region,
            employer,
            salary_from,
            salary_to,
            currency,
            published_at,
        } = record;

        let (Some(name), Some(level), Some(region), Some(published_at)) =
            (non_blank(name), non_blank(level), non_blank(region), non_blank(published_at))
        else {
            debug!("Dropping vacancy {} with missing required fields", id);
            continue;
        };

        let level = level
            .parse::<Level>()
            .map_err(|source| ProcessError::InvalidLevel { id: id.clone(), source })?;
        let published_at = parse_timestamp(&published_at).ok_or_else(|| ProcessError::InvalidDate {
            id: id.clone(),
            value: published_at.clone(),
        })?;

        vacancies.push(Vacancy {
            id,
            name,
            level,
            region,
            employer: non_blank(employer).unwrap_or_else(|| UNKNOWN_EMPLOYER.to_string()),
            salary_from: salary_from.unwrap_or(0.0),
            salary_to: salary_to.unwrap_or(0.0),
            currency: non_blank(currency),
            published_at,
        });
    }

    debug!("Kept {} of {} rows", vacancies.len(), total);
    Ok(vacancies)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Accepts RFC 3339, the API's `+0300` offset form, and bare dates (UTC midnight)
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt);
    }

    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).fixed_offset());
    }

    None
}
