use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vacancy_scout::collector::{self, HhClient};
use vacancy_scout::config::{SearchConfig, DEFAULT_QUERY};
use vacancy_scout::stats::{self, SalaryBasis};
use vacancy_scout::{processing, report, storage};

const RAW_FILE: &str = "vacancies_data.csv";
const PROCESSED_FILE: &str = "processed_vacancies_data.csv";

/// Collect data-role vacancies from HeadHunter and summarize them
#[derive(Debug, Parser)]
#[command(name = "vacancy-scout", version)]
struct Cli {
    /// Region codes to collect (1 = Moscow, 2 = Saint Petersburg)
    #[arg(long, value_delimiter = ',', default_values = ["1", "2"])]
    regions: Vec<String>,

    /// First publication day to keep (YYYY-MM-DD)
    #[arg(long, default_value = "2023-01-01")]
    from: NaiveDate,

    /// Last publication day to keep (YYYY-MM-DD)
    #[arg(long, default_value = "2024-09-25")]
    to: NaiveDate,

    /// Free-text search query
    #[arg(long, default_value = DEFAULT_QUERY)]
    query: String,

    /// Directory for the raw and processed CSV files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory for rendered charts
    #[arg(long, default_value = "charts")]
    charts_dir: PathBuf,

    /// Reuse the previously saved raw data instead of calling the API
    #[arg(long)]
    skip_fetch: bool,

    /// Average only salaries that were actually stated
    #[arg(long)]
    stated_salaries_only: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .with_context(|| format!("Invalid log filter '{}'", cli.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Vacancy Scout - HeadHunter collector");

    let raw_path = cli.data_dir.join(RAW_FILE);

    if cli.skip_fetch {
        info!("Skipping collection, reusing {}", raw_path.display());
    } else {
        let client = HhClient::with_config(SearchConfig {
            text: cli.query.clone(),
            ..SearchConfig::default()
        })?;
        let levels = client.config().levels();
        let delay = client.config().request_delay;

        info!("Collecting vacancies for regions {:?}...", cli.regions);
        let collection = collector::collect(&client, &cli.regions, &levels, delay).await;

        if !collection.is_complete() {
            warn!(
                "{} level/region pairs returned partial results",
                collection.interrupted.len()
            );
        }

        storage::save(&collection.records, &raw_path)?;
        info!("Collected {} vacancies into {}", collection.records.len(), raw_path.display());
    }

    info!("Loading and preprocessing data...");
    let records = storage::load(&raw_path)?;
    let processed = processing::preprocess(records)?;

    info!("Filtering by publication date {}..={}", cli.from, cli.to);
    let filtered = stats::filter_by_date(&processed, cli.from, cli.to);
    info!("Kept {} vacancies", filtered.len());

    let basis = if cli.stated_salaries_only {
        SalaryBasis::StatedOnly
    } else {
        SalaryBasis::IncludeUnstated
    };
    let summary = stats::summary_statistics_with(&filtered, basis);
    report::display_summary(&summary);

    info!("Rendering charts...");
    let charts = report::render_charts(&filtered, &cli.charts_dir)?;
    info!("Saved {} charts to {}", charts.len(), cli.charts_dir.display());

    let processed_path = cli.data_dir.join(PROCESSED_FILE);
    storage::save(&processed, &processed_path)?;
    info!("Saved processed data to {}", processed_path.display());

    Ok(())
}
