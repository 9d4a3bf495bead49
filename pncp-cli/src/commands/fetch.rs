//! `pncp fetch`

use anyhow::Result;

use crate::cli::FetchArgs;
use crate::config::AppConfig;

pub async fn run(config: &AppConfig, args: FetchArgs) -> Result<()> {
    let path = args.output.unwrap_or_else(|| config.export_path());
    let dataset = super::load_dataset(config, &path).await?;

    println!("Wrote {} contracts to {}", dataset.len(), path.display());
    Ok(())
}
