pub mod charts;
pub mod summary;

pub use summary::{display_summary, format_summary};

use crate::models::{Level, Vacancy};
use crate::stats;
use anyhow::{Context, Result};
use charts::{BarSeries, StepSeries};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const SALARY_BINS: usize = 30;

pub const LEVEL_CHART: &str = "vacancies_per_level.svg";
pub const REGION_CHART: &str = "vacancies_per_region.svg";
pub const REGION_LEVEL_CHART: &str = "vacancies_per_region_level.svg";
pub const SALARY_CHART: &str = "average_salary_per_region_level.svg";
pub const DISTRIBUTION_CHART: &str = "salary_distribution.svg";
pub const TREND_CHART: &str = "vacancies_trend.svg";

/// Render every chart into `out_dir`, returning the files written.
///
/// Charts without data to show are skipped.
pub fn render_charts(rows: &[Vacancy], out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create chart directory {}", out_dir.display()))?;

    if rows.is_empty() {
        warn!("No vacancies to chart");
        return Ok(Vec::new());
    }

    let mut written = Vec::new();
    let mut record = |name: &str, drawn: bool| {
        let path = out_dir.join(name);
        if drawn {
            info!("Saved chart {}", path.display());
            written.push(path);
        } else {
            warn!("Skipped {}: nothing to plot", name);
        }
    };

    record(LEVEL_CHART, plot_vacancies_per_level(rows, &out_dir.join(LEVEL_CHART))?);
    record(REGION_CHART, plot_vacancies_per_region(rows, &out_dir.join(REGION_CHART))?);
    record(
        REGION_LEVEL_CHART,
        plot_vacancies_per_region_and_level(rows, &out_dir.join(REGION_LEVEL_CHART))?,
    );
    record(
        SALARY_CHART,
        plot_average_salary_per_region_and_level(rows, &out_dir.join(SALARY_CHART))?,
    );
    record(
        DISTRIBUTION_CHART,
        plot_salary_distribution(rows, &out_dir.join(DISTRIBUTION_CHART))?,
    );
    record(TREND_CHART, plot_vacancies_trend(rows, &out_dir.join(TREND_CHART))?);

    Ok(written)
}

pub fn plot_vacancies_per_level(rows: &[Vacancy], path: &Path) -> Result<bool> {
    let counts = stats::counts_by_level(rows);
    if counts.is_empty() {
        return Ok(false);
    }

    let categories = counts.keys().map(Level::to_string).collect::<Vec<_>>();
    let values = counts.values().map(|count| *count as f64).collect();

    charts::bar_chart(
        path,
        "Vacancies per qualification level",
        "Qualification level",
        "Vacancies",
        &categories,
        &[BarSeries {
            label: "Vacancies".to_string(),
            values,
        }],
    )?;
    Ok(true)
}

pub fn plot_vacancies_per_region(rows: &[Vacancy], path: &Path) -> Result<bool> {
    let counts = stats::counts_by_region(rows);
    if counts.is_empty() {
        return Ok(false);
    }

    let categories = counts.keys().cloned().collect::<Vec<_>>();
    let values = counts.values().map(|count| *count as f64).collect();

    charts::bar_chart(
        path,
        "Vacancies per region",
        "Region",
        "Vacancies",
        &categories,
        &[BarSeries {
            label: "Vacancies".to_string(),
            values,
        }],
    )?;
    Ok(true)
}

pub fn plot_vacancies_per_region_and_level(rows: &[Vacancy], path: &Path) -> Result<bool> {
    let counts = stats::counts_by_region_and_level(rows);
    if counts.is_empty() {
        return Ok(false);
    }

    let categories = counts.keys().cloned().collect::<Vec<_>>();
    let series = Level::ALL
        .iter()
        .map(|level| BarSeries {
            label: level.to_string(),
            values: counts
                .values()
                .map(|levels| levels.get(level).copied().unwrap_or(0) as f64)
                .collect(),
        })
        .collect::<Vec<_>>();

    charts::bar_chart(
        path,
        "Vacancies per region and level",
        "Region",
        "Vacancies",
        &categories,
        &series,
    )?;
    Ok(true)
}

/// Mean salary per region and level, over vacancies that state a salary
pub fn plot_average_salary_per_region_and_level(rows: &[Vacancy], path: &Path) -> Result<bool> {
    let means = stats::mean_salary_by_region_and_level(rows);
    if means.is_empty() {
        return Ok(false);
    }

    let categories = means.keys().cloned().collect::<Vec<_>>();
    let series = Level::ALL
        .iter()
        .map(|level| BarSeries {
            label: level.to_string(),
            values: means
                .values()
                .map(|levels| levels.get(level).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect::<Vec<_>>();

    charts::bar_chart(
        path,
        "Average salary per region and level",
        "Region",
        "Average salary",
        &categories,
        &series,
    )?;
    Ok(true)
}

pub fn plot_salary_distribution(rows: &[Vacancy], path: &Path) -> Result<bool> {
    let Some(density) = stats::salary_density(rows, SALARY_BINS) else {
        return Ok(false);
    };

    let series = density
        .densities
        .iter()
        .map(|(level, values)| StepSeries {
            label: level.to_string(),
            values: values.clone(),
        })
        .collect::<Vec<_>>();

    charts::step_chart(
        path,
        "Salary distribution by qualification level",
        "Salary (from)",
        "Density",
        &density.edges,
        &series,
    )?;
    Ok(true)
}

pub fn plot_vacancies_trend(rows: &[Vacancy], path: &Path) -> Result<bool> {
    let counts = stats::counts_by_month(rows);
    if counts.is_empty() {
        return Ok(false);
    }

    let categories = counts.keys().map(|month| month.to_string()).collect::<Vec<_>>();
    let values = counts.values().map(|count| *count as f64).collect::<Vec<_>>();

    charts::line_chart(
        path,
        "Vacancies per month",
        "Month",
        "Vacancies",
        &categories,
        &values,
    )?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN_EMPLOYER;
    use chrono::DateTime;
    use tempfile::tempdir;

    fn vacancy(level: Level, region: &str, from: f64, published: &str) -> Vacancy {
        Vacancy {
            id: format!("{level}-{region}-{published}"),
            name: "Data Analyst".to_string(),
            level,
            region: region.to_string(),
            employer: UNKNOWN_EMPLOYER.to_string(),
            salary_from: from,
            salary_to: 0.0,
            currency: Some("RUR".to_string()),
            published_at: DateTime::parse_from_rfc3339(published).unwrap(),
        }
    }

    #[test]
    fn renders_all_charts() {
        let dir = tempdir().unwrap();
        let rows = vec![
            vacancy(Level::Junior, "1", 60000.0, "2024-01-10T10:00:00+03:00"),
            vacancy(Level::Middle, "1", 0.0, "2024-02-10T10:00:00+03:00"),
            vacancy(Level::Senior, "2", 250000.0, "2024-02-12T10:00:00+03:00"),
        ];

        let written = render_charts(&rows, dir.path()).unwrap();

        assert_eq!(written.len(), 6);
        for path in &written {
            let svg = fs::read_to_string(path).unwrap();
            assert!(svg.contains("<svg"), "{} is not an svg", path.display());
        }
    }

    #[test]
    fn salary_charts_are_skipped_without_salaries() {
        let dir = tempdir().unwrap();
        let rows = vec![vacancy(Level::Junior, "1", 0.0, "2024-01-10T10:00:00+03:00")];

        let written = render_charts(&rows, dir.path()).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![LEVEL_CHART, REGION_CHART, REGION_LEVEL_CHART, TREND_CHART]);
        assert!(!dir.path().join(SALARY_CHART).exists());
    }

    #[test]
    fn empty_table_writes_nothing() {
        let dir = tempdir().unwrap();
        assert!(render_charts(&[], dir.path()).unwrap().is_empty());
    }
}
