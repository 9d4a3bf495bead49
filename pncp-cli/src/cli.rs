//! Command-line structure.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use pncp_lib::dataset::ContractFilter;
use rust_decimal::Decimal;

/// Fetch public-procurement contracts from the PNCP search API
///
/// Every command that needs data fetches the full result set first and
/// writes it to the export file.
#[derive(Parser)]
#[command(name = "pncp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file path (defaults to the cache directory)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch every page and write the full export
    Fetch(FetchArgs),

    /// Print metrics, top bodies and municipality shares for a filtered view
    Report(ReportArgs),

    /// List the values available to each filter
    Options,

    /// Describe the bidding modalities
    Glossary,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Export file (overrides `export_path` from the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Number of bodies in the top-by-value list
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Print the matching contracts, newest first
    #[arg(long)]
    pub details: bool,

    /// Write the filtered contracts to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Filters shared by the reporting commands. Repeat a flag to select several values.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Issuing body (órgão) name
    #[arg(long = "body")]
    pub bodies: Vec<String>,

    /// Municipality name
    #[arg(long = "municipality")]
    pub municipalities: Vec<String>,

    /// State code
    #[arg(long = "uf")]
    pub ufs: Vec<String>,

    /// Bidding modality name
    #[arg(long = "modality")]
    pub modalities: Vec<String>,

    /// Signing year
    #[arg(long = "year")]
    pub years: Vec<i32>,

    /// Minimum global value (R$, inclusive)
    #[arg(long)]
    pub min_value: Option<Decimal>,

    /// Maximum global value (R$, inclusive)
    #[arg(long)]
    pub max_value: Option<Decimal>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ContractFilter {
        ContractFilter {
            bodies: self.bodies.iter().cloned().collect(),
            municipalities: self.municipalities.iter().cloned().collect(),
            ufs: self.ufs.iter().cloned().collect(),
            modalities: self.modalities.iter().cloned().collect(),
            years: self.years.iter().copied().collect(),
            min_value: self.min_value,
            max_value: self.max_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_report_filters_parse() {
        let cli = Cli::parse_from([
            "pncp",
            "report",
            "--uf",
            "PE",
            "--uf",
            "PB",
            "--year",
            "2023",
            "--min-value",
            "1000.50",
            "--top",
            "5",
        ]);

        let Commands::Report(args) = cli.command else {
            panic!("expected the report command");
        };
        let filter = args.filters.to_filter();

        assert_eq!(args.top, 5);
        assert_eq!(filter.ufs.len(), 2);
        assert!(filter.years.contains(&2023));
        assert_eq!(filter.min_value, Some(Decimal::new(100050, 2)));
        assert_eq!(filter.max_value, None);
        assert!(filter.bodies.is_empty());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pncp", "fetch", "-vv", "--output", "out.csv"]);

        assert_eq!(cli.verbose, 2);
        let Commands::Fetch(args) = cli.command else {
            panic!("expected the fetch command");
        };
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_empty_filter_args() {
        assert!(FilterArgs::default().to_filter().is_empty());
    }
}
