pub mod hh;
pub mod traits;
pub mod types;

pub use hh::HhClient;
pub use traits::VacancySource;
pub use types::{Collection, FetchStatus, Interruption, LevelFetch, RawVacancy, VacancyPage};

use crate::models::Level;
use std::time::Duration;
use tracing::{info, warn};

/// Read every page for one level/region pair.
///
/// Pagination stops after the last page the API reports, or at the first
/// failed request. A failure keeps the items gathered so far and is reported
/// through [`FetchStatus::Interrupted`].
pub async fn fetch_level<S>(source: &S, level: Level, region: &str, delay: Duration) -> LevelFetch
where
    S: VacancySource + ?Sized,
{
    let mut items = Vec::new();
    let mut page = 0;

    let status = loop {
        match source.fetch_page(level, region, page).await {
            Ok(response) => {
                items.extend(response.items);
                if page + 1 >= response.pages {
                    break FetchStatus::Complete;
                }
            }
            Err(error) => {
                warn!(
                    "{} request failed for {} in region {} at page {}: {}",
                    source.source_name(),
                    level,
                    region,
                    page,
                    error
                );
                break FetchStatus::Interrupted { page, error };
            }
        }

        page += 1;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    };

    LevelFetch {
        level,
        region: region.to_string(),
        items,
        status,
    }
}

/// Collect vacancies for every region and level, flattened into rows
pub async fn collect<S>(source: &S, regions: &[String], levels: &[Level], delay: Duration) -> Collection
where
    S: VacancySource + ?Sized,
{
    let mut collection = Collection::default();

    for region in regions {
        for &level in levels {
            info!("Collecting {} vacancies in region {}...", level, region);
            let fetched = fetch_level(source, level, region, delay).await;
            info!("Got {} {} vacancies in region {}", fetched.items.len(), level, region);

            collection.records.extend(
                fetched
                    .items
                    .into_iter()
                    .map(|raw| raw.into_record(level, region)),
            );

            if let FetchStatus::Interrupted { page, error } = fetched.status {
                collection.interrupted.push(Interruption {
                    level,
                    region: region.clone(),
                    page,
                    error,
                });
            }
        }
    }

    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages keyed by (level, region, page)
    #[derive(Default)]
    struct ScriptedSource {
        pages: HashMap<(Level, String, u32), Result<VacancyPage, u16>>,
        requests: Mutex<Vec<(Level, String, u32)>>,
    }

    impl ScriptedSource {
        fn page(mut self, level: Level, region: &str, page: u32, ids: &[&str], pages: u32) -> Self {
            let items = ids
                .iter()
                .map(|id| {
                    serde_json::from_value(json!({
                        "id": id,
                        "name": format!("Vacancy {id}"),
                        "published_at": "2024-02-01T12:00:00+0300"
                    }))
                    .unwrap()
                })
                .collect();
            self.pages.insert(
                (level, region.to_string(), page),
                Ok(VacancyPage { items, pages, found: None }),
            );
            self
        }

        fn failing(mut self, level: Level, region: &str, page: u32, status: u16) -> Self {
            self.pages.insert((level, region.to_string(), page), Err(status));
            self
        }

        fn requests(&self) -> Vec<(Level, String, u32)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VacancySource for ScriptedSource {
        async fn fetch_page(&self, level: Level, region: &str, page: u32) -> Result<VacancyPage, FetchError> {
            self.requests.lock().unwrap().push((level, region.to_string(), page));
            match self.pages.get(&(level, region.to_string(), page)) {
                Some(Ok(response)) => Ok(response.clone()),
                Some(Err(status)) => Err(FetchError::Status {
                    status: reqwest::StatusCode::from_u16(*status).unwrap(),
                }),
                None => Ok(VacancyPage { items: vec![], pages: 0, found: None }),
            }
        }

        fn source_name(&self) -> &'static str {
            "scripted"
        }
    }

    fn ids(fetch: &LevelFetch) -> Vec<&str> {
        fetch.items.iter().map(|item| item.id.as_str()).collect()
    }

    #[tokio::test]
    async fn concatenates_pages_in_order() {
        let source = ScriptedSource::default()
            .page(Level::Junior, "1", 0, &["a", "b", "c"], 2)
            .page(Level::Junior, "1", 1, &["d"], 2);

        let fetched = fetch_level(&source, Level::Junior, "1", Duration::ZERO).await;

        assert!(fetched.is_complete());
        assert_eq!(ids(&fetched), vec!["a", "b", "c", "d"]);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn failure_keeps_partial_results() {
        let source = ScriptedSource::default()
            .page(Level::Middle, "2", 0, &["a", "b"], 3)
            .failing(Level::Middle, "2", 1, 503);

        let fetched = fetch_level(&source, Level::Middle, "2", Duration::ZERO).await;

        assert_eq!(ids(&fetched), vec!["a", "b"]);
        match fetched.status {
            FetchStatus::Interrupted { page, error: FetchError::Status { status } } => {
                assert_eq!(page, 1);
                assert_eq!(status.as_u16(), 503);
            }
            other => panic!("unexpected status: {other:?}"),
        }
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn empty_result_set_stops_after_first_page() {
        let source = ScriptedSource::default().page(Level::Senior, "1", 0, &[], 0);

        let fetched = fetch_level(&source, Level::Senior, "1", Duration::ZERO).await;

        assert!(fetched.is_complete());
        assert!(fetched.items.is_empty());
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn collect_walks_regions_then_levels() {
        let source = ScriptedSource::default()
            .page(Level::Junior, "1", 0, &["j1"], 1)
            .page(Level::Senior, "1", 0, &["s1"], 1)
            .page(Level::Junior, "2", 0, &["j2"], 1)
            .failing(Level::Senior, "2", 0, 500);
        let regions = vec!["1".to_string(), "2".to_string()];

        let collection = collect(&source, &regions, &[Level::Junior, Level::Senior], Duration::ZERO).await;

        let rows: Vec<(&str, Option<&str>, Option<&str>)> = collection
            .records
            .iter()
            .map(|r| (r.id.as_str(), r.level.as_deref(), r.region.as_deref()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("j1", Some("Junior"), Some("1")),
                ("s1", Some("Senior"), Some("1")),
                ("j2", Some("Junior"), Some("2")),
            ]
        );
        assert!(!collection.is_complete());
        assert_eq!(collection.interrupted.len(), 1);
        assert_eq!(collection.interrupted[0].level, Level::Senior);
        assert_eq!(collection.interrupted[0].region, "2");
    }
}
