//! `pncp report`

use std::fmt::Write;

use anyhow::Context;
use anyhow::Result;
use pncp_lib::dataset::CsvExporter;
use pncp_lib::dataset::Dataset;

use crate::cli::ReportArgs;
use crate::config::AppConfig;

const DESCRIPTION_WIDTH: usize = 60;

pub async fn run(config: &AppConfig, args: ReportArgs) -> Result<()> {
    let dataset = super::load_dataset(config, &config.export_path()).await?;

    let filter = args.filters.to_filter();
    let filtered = dataset.filter(&filter);
    log::info!("{} of {} contracts match the filters", filtered.len(), dataset.len());

    print!("{}", render(&filtered, args.top, args.details));

    if let Some(path) = args.export {
        CsvExporter::new()
            .with_value_in_millions(true)
            .write_to_path(filtered.contracts(), &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {} filtered contracts to {}", filtered.len(), path.display());
    }

    Ok(())
}

fn render(dataset: &Dataset, top: usize, details: bool) -> String {
    let mut out = String::new();
    let overview = dataset.overview();

    let _ = writeln!(out, "Overview");
    let _ = writeln!(out, "  Records:                 {}", overview.records);
    let _ = writeln!(out, "  Total value (R$ million): {:.3}", overview.total_value_millions());
    let _ = writeln!(out, "  Distinct bodies:         {}", overview.distinct_bodies);
    let _ = writeln!(out, "  Distinct municipalities: {}", overview.distinct_municipalities);

    if dataset.is_empty() {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Top {} bodies by value (R$ million)", top);
    for (rank, body) in dataset.top_bodies(top).iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {:>12.3}  {}", rank + 1, body.value_millions, body.body);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Share of value by municipality");
    for share in dataset.municipality_shares() {
        let _ = writeln!(
            out,
            "  {:>6.2}%  R$ {:>16.2}  {}",
            share.share * 100.0,
            share.value,
            share.municipality
        );
    }

    if details {
        let _ = writeln!(out);
        let _ = writeln!(out, "Contracts (newest first)");
        for contract in dataset.sorted_by_signing_date() {
            let date = contract
                .signing_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "----------".to_string());
            let _ = writeln!(
                out,
                "  {}  {:<2}  R$ {:>16.2}  {} / {} / {}",
                date,
                contract.uf().unwrap_or("-"),
                contract.global_value(),
                contract.body_name().unwrap_or("-"),
                contract.municipality_name().unwrap_or("-"),
                contract.modality_name().unwrap_or("-"),
            );
            if let Some(description) = contract.description() {
                let _ = writeln!(out, "      {}", truncate(description, DESCRIPTION_WIDTH));
            }
        }
    }

    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use pncp_lib::model::Record;
    use pncp_lib::model::fields;

    fn record(body: &str, municipality: &str, date: &str, value: f64) -> Record {
        Record::new()
            .set(fields::SIGNING_DATE, date)
            .set(fields::BODY_NAME, body)
            .set(fields::MUNICIPALITY_NAME, municipality)
            .set(fields::UF, "PE")
            .set(fields::MODALITY_NAME, "Pregão - Eletrônico")
            .set(fields::GLOBAL_VALUE, value)
            .set(fields::DESCRIPTION, "Implantação de plataforma de cidade inteligente")
    }

    fn dataset() -> Dataset {
        Dataset::from_records([
            record("Prefeitura de Recife", "Recife", "2023-03-01", 3_000_000.0),
            record("Prefeitura de Olinda", "Olinda", "2024-01-10", 1_000_000.0),
        ])
    }

    #[test]
    fn test_render_overview_and_groups() {
        let text = render(&dataset(), 10, false);

        assert!(text.contains("Records:                 2"));
        assert!(text.contains("Total value (R$ million): 4.000"));
        assert!(text.contains("Distinct bodies:         2"));
        assert!(text.contains("1.        3.000  Prefeitura de Recife"));
        assert!(text.contains(" 75.00%"));
        assert!(!text.contains("Contracts (newest first)"));
    }

    #[test]
    fn test_render_details_newest_first() {
        let text = render(&dataset(), 10, true);

        let olinda = text.find("2024-01-10").unwrap();
        let recife = text.find("2023-03-01").unwrap();
        assert!(olinda < recife);
        assert!(text.contains("Implantação de plataforma"));
    }

    #[test]
    fn test_render_empty_dataset_stops_after_overview() {
        let text = render(&Dataset::default(), 10, true);

        assert!(text.contains("Records:                 0"));
        assert!(!text.contains("Top"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("curto", 10), "curto");
        assert_eq!(truncate("descrição muito longa", 10), "descriç...");
    }
}
