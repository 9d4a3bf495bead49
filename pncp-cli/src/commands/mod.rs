//! Command implementations.

pub mod fetch;
pub mod glossary;
pub mod options;
pub mod report;

use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use pncp_lib::api::FetchOutcome;
use pncp_lib::api::PageSource;
use pncp_lib::api::SearchQuery;
use pncp_lib::api::fetch_all;
use pncp_lib::dataset::CsvExporter;
use pncp_lib::dataset::Dataset;

use crate::config::AppConfig;

/// Fetches the configured search, reports completeness and writes the full
/// table to `export_path`.
///
/// An incomplete fetch is reported but not fatal; the partial table is still
/// exported and returned.
pub async fn load_dataset(config: &AppConfig, export_path: &Path) -> Result<Dataset> {
    let client = config.client()?;
    log::info!("Searching {} for \"{}\"", client.base_url(), client.query().term);

    load_from(&client, client.query(), client.max_pages(), export_path).await
}

/// Fetches `query` from `source` and writes the full table to `export_path`.
async fn load_from<S>(
    source: &S,
    query: &SearchQuery,
    max_pages: u32,
    export_path: &Path,
) -> Result<Dataset>
where
    S: PageSource + ?Sized,
{
    let outcome = fetch_all(source, query, max_pages)
        .await
        .context("Fetch failed")?;
    print_outcome(&outcome);

    let dataset = Dataset::from_records(outcome.into_records());
    CsvExporter::new()
        .write_to_path(dataset.contracts(), export_path)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;

    Ok(dataset)
}

fn print_outcome(outcome: &FetchOutcome) {
    let report = outcome.report();
    match outcome {
        FetchOutcome::Complete { .. } => {
            println!("All good: {} records fetched in {} pages", report.collected, report.last_page);
        }
        FetchOutcome::Incomplete { .. } => {
            eprintln!("Something went wrong, the fetch is incomplete:");
            eprintln!("{}", report);
        }
    }
}
