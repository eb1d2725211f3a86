use crate::stats::{SalaryBasis, SummaryStatistics};
use std::fmt::Display;

/// Render summary statistics as plain text
pub fn format_summary(stats: &SummaryStatistics) -> String {
    let basis = match stats.salary_basis {
        SalaryBasis::IncludeUnstated => "unstated salaries counted as 0",
        SalaryBasis::StatedOnly => "stated salaries only",
    };

    format!(
        "Vacancy summary:\n\
         Total vacancies: {}\n\
         Vacancies per level: {{{}}}\n\
         Vacancies per region: {{{}}}\n\
         Average salary (from): {} ({basis})\n\
         Average salary (to): {} ({basis})\n",
        stats.total_vacancies,
        join_counts(&stats.vacancies_per_level),
        join_counts(&stats.vacancies_per_region),
        format_amount(stats.average_salary_from),
        format_amount(stats.average_salary_to),
    )
}

/// Print the summary to stdout
pub fn display_summary(stats: &SummaryStatistics) {
    print!("{}", format_summary(stats));
}

fn join_counts<'a, K: Display + 'a>(counts: impl IntoIterator<Item = (&'a K, &'a usize)>) -> String {
    counts
        .into_iter()
        .map(|(key, count)| format!("{key}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "n/a".to_string(),
    }
}
