use crate::models::{Level, Vacancy};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Which rows contribute to a salary mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SalaryBasis {
    /// Every row, with unstated salaries counted as 0
    #[default]
    IncludeUnstated,
    /// Only rows whose salary bound is nonzero
    StatedOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub total_vacancies: usize,
    pub vacancies_per_level: BTreeMap<Level, usize>,
    pub vacancies_per_region: BTreeMap<String, usize>,
    /// `None` when no row contributes
    pub average_salary_from: Option<f64>,
    pub average_salary_to: Option<f64>,
    pub salary_basis: SalaryBasis,
}

/// Calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Keep vacancies published between `start` and `end`, both days included
pub fn filter_by_date(rows: &[Vacancy], start: NaiveDate, end: NaiveDate) -> Vec<Vacancy> {
    rows.iter()
        .filter(|row| {
            let day = row.published_at.date_naive();
            start <= day && day <= end
        })
        .cloned()
        .collect()
}

/// Summary with unstated salaries averaged in as 0
pub fn summary_statistics(rows: &[Vacancy]) -> SummaryStatistics {
    summary_statistics_with(rows, SalaryBasis::IncludeUnstated)
}

pub fn summary_statistics_with(rows: &[Vacancy], basis: SalaryBasis) -> SummaryStatistics {
    SummaryStatistics {
        total_vacancies: rows.len(),
        vacancies_per_level: counts_by_level(rows),
        vacancies_per_region: counts_by_region(rows),
        average_salary_from: mean(rows.iter().map(|row| row.salary_from), basis),
        average_salary_to: mean(rows.iter().map(|row| row.salary_to), basis),
        salary_basis: basis,
    }
}

fn mean(values: impl Iterator<Item = f64>, basis: SalaryBasis) -> Option<f64> {
    let (sum, count) = values
        .filter(|value| basis == SalaryBasis::IncludeUnstated || *value != 0.0)
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    (count > 0).then(|| sum / count as f64)
}

pub fn counts_by_level(rows: &[Vacancy]) -> BTreeMap<Level, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.level).or_insert(0) += 1;
    }
    counts
}

pub fn counts_by_region(rows: &[Vacancy]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.region.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn counts_by_region_and_level(rows: &[Vacancy]) -> BTreeMap<String, BTreeMap<Level, usize>> {
    let mut counts: BTreeMap<String, BTreeMap<Level, usize>> = BTreeMap::new();
    for row in rows {
        *counts
            .entry(row.region.clone())
            .or_default()
            .entry(row.level)
            .or_insert(0) += 1;
    }
    counts
}

/// Mean salary estimate per region and level, over vacancies that state a salary
pub fn mean_salary_by_region_and_level(rows: &[Vacancy]) -> BTreeMap<String, BTreeMap<Level, f64>> {
    let mut sums: BTreeMap<String, BTreeMap<Level, (f64, usize)>> = BTreeMap::new();
    for row in rows {
        let Some(salary) = row.salary_estimate() else {
            continue;
        };
        let entry = sums
            .entry(row.region.clone())
            .or_default()
            .entry(row.level)
            .or_insert((0.0, 0));
        entry.0 += salary;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(region, levels)| {
            let means = levels
                .into_iter()
                .map(|(level, (sum, count))| (level, sum / count as f64))
                .collect();
            (region, means)
        })
        .collect()
}

pub fn counts_by_month(rows: &[Vacancy]) -> BTreeMap<YearMonth, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        let date = row.published_at.date_naive();
        let key = YearMonth {
            year: date.year(),
            month: date.month(),
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Density of `salary_from` per level over equal-width bins
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryDensity {
    /// Bin edges, `bins + 1` values from 0 to the largest salary
    pub edges: Vec<f64>,
    /// Per level, one density value per bin; each level integrates to 1
    pub densities: BTreeMap<Level, Vec<f64>>,
}

impl SalaryDensity {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }
}

/// `None` when there are no rows or every `salary_from` is 0
pub fn salary_density(rows: &[Vacancy], bins: usize) -> Option<SalaryDensity> {
    let max = rows.iter().map(|row| row.salary_from).fold(0.0_f64, f64::max);
    if bins == 0 || max <= 0.0 {
        return None;
    }

    let width = max / bins as f64;
    let edges = (0..=bins).map(|i| i as f64 * width).collect();

    let mut counts: BTreeMap<Level, Vec<usize>> = BTreeMap::new();
    for row in rows {
        let bin = ((row.salary_from / width) as usize).min(bins - 1);
        counts.entry(row.level).or_insert_with(|| vec![0; bins])[bin] += 1;
    }

    let densities = counts
        .into_iter()
        .map(|(level, counts)| {
            let total: usize = counts.iter().sum();
            let values = counts
                .into_iter()
                .map(|count| count as f64 / (total as f64 * width))
                .collect();
            (level, values)
        })
        .collect();

    Some(SalaryDensity { edges, densities })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN_EMPLOYER;
    use chrono::DateTime;

    fn vacancy(id: &str, level: Level, region: &str, from: f64, to: f64, published: &str) -> Vacancy {
        Vacancy {
            id: id.to_string(),
            name: "Data Engineer".to_string(),
            level,
            region: region.to_string(),
            employer: UNKNOWN_EMPLOYER.to_string(),
            salary_from: from,
            salary_to: to,
            currency: None,
            published_at: DateTime::parse_from_rfc3339(published).unwrap(),
        }
    }

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Vec<Vacancy> {
        vec![
            vacancy("1", Level::Junior, "1", 0.0, 0.0, "2023-01-01T00:05:00+03:00"),
            vacancy("2", Level::Junior, "2", 50000.0, 70000.0, "2023-06-15T12:00:00+03:00"),
            vacancy("3", Level::Senior, "1", 0.0, 200000.0, "2024-09-25T23:59:00+03:00"),
            vacancy("4", Level::Senior, "1", 300000.0, 0.0, "2024-09-26T00:00:00+03:00"),
        ]
    }

    #[test]
    fn date_filter_includes_both_boundaries() {
        let filtered = filter_by_date(&sample(), day("2023-01-01"), day("2024-09-25"));

        let ids: Vec<&str> = filtered.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn reversed_range_is_empty() {
        assert!(filter_by_date(&sample(), day("2024-01-01"), day("2023-01-01")).is_empty());
    }

    #[test]
    fn total_matches_row_count() {
        let rows = sample();
        assert_eq!(summary_statistics(&rows).total_vacancies, rows.len());
        assert_eq!(summary_statistics(&[]).total_vacancies, 0);
    }

    #[test]
    fn mean_includes_zero_filled_salaries() {
        let rows = vec![
            vacancy("a", Level::Junior, "1", 0.0, 0.0, "2024-01-01T10:00:00+03:00"),
            vacancy("b", Level::Senior, "1", 50000.0, 0.0, "2024-01-01T10:00:00+03:00"),
            vacancy("c", Level::Senior, "2", 0.0, 0.0, "2024-01-01T10:00:00+03:00"),
        ];

        let stats = summary_statistics(&rows);

        assert_eq!(stats.average_salary_from, Some((0.0 + 50000.0 + 0.0) / 3.0));
        assert_eq!(stats.average_salary_to, Some(0.0));
        assert_eq!(stats.vacancies_per_level[&Level::Junior], 1);
        assert_eq!(stats.vacancies_per_level[&Level::Senior], 2);
        assert_eq!(stats.vacancies_per_region["1"], 2);
        assert_eq!(stats.vacancies_per_region["2"], 1);
    }

    #[test]
    fn stated_only_basis_skips_zero_salaries() {
        let stats = summary_statistics_with(&sample(), SalaryBasis::StatedOnly);

        assert_eq!(stats.average_salary_from, Some((50000.0 + 300000.0) / 2.0));
        assert_eq!(stats.average_salary_to, Some((70000.0 + 200000.0) / 2.0));
    }

    #[test]
    fn empty_table_has_no_means() {
        let stats = summary_statistics(&[]);
        assert_eq!(stats.average_salary_from, None);
        assert!(stats.vacancies_per_level.is_empty());
    }

    #[test]
    fn region_level_means_exclude_unstated_rows() {
        let means = mean_salary_by_region_and_level(&sample());

        assert_eq!(means["1"][&Level::Senior], (200000.0 + 300000.0) / 2.0);
        assert!(!means["1"].contains_key(&Level::Junior));
        assert_eq!(means["2"][&Level::Junior], 60000.0);
    }

    #[test]
    fn region_level_counts() {
        let counts = counts_by_region_and_level(&sample());
        assert_eq!(counts["1"][&Level::Junior], 1);
        assert_eq!(counts["1"][&Level::Senior], 2);
        assert_eq!(counts["2"][&Level::Junior], 1);
    }

    #[test]
    fn months_are_counted_in_order() {
        let counts: Vec<(String, usize)> = counts_by_month(&sample())
            .into_iter()
            .map(|(month, count)| (month.to_string(), count))
            .collect();

        assert_eq!(
            counts,
            vec![
                ("2023-01".to_string(), 1),
                ("2023-06".to_string(), 1),
                ("2024-09".to_string(), 2),
            ]
        );
    }

    #[test]
    fn density_integrates_to_one_per_level() {
        let density = salary_density(&sample(), 10).unwrap();

        assert_eq!(density.edges.len(), 11);
        assert_eq!(density.bin_width(), 30000.0);
        for values in density.densities.values() {
            let area: f64 = values.iter().map(|v| v * density.bin_width()).sum();
            assert!((area - 1.0).abs() < 1e-9);
        }
        // the largest salary lands in the last bin
        assert!(density.densities[&Level::Senior][9] > 0.0);
    }

    #[test]
    fn density_needs_a_stated_salary() {
        let rows = vec![vacancy("a", Level::Junior, "1", 0.0, 10.0, "2024-01-01T10:00:00+03:00")];
        assert!(salary_density(&rows, 10).is_none());
    }
}
