//! Logger setup.

use std::fs;
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use simplelog::ColorChoice;
use simplelog::CombinedLogger;
use simplelog::ConfigBuilder;
use simplelog::LevelFilter;
use simplelog::SharedLogger;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

use crate::paths;

/// Maps `-v` repetitions to a terminal log level.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logs to stderr at the chosen level and to a file at debug level.
///
/// Without an explicit path the file is the rotated `latest.log` in the cache
/// directory. Only this workspace's crates are logged; HTTP internals are not.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let config = ConfigBuilder::new().add_filter_allow_str("pncp").build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level_for(verbosity),
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let path = match log_file {
        Some(path) => Some(path.to_path_buf()),
        None => paths::log_file().inspect(|latest| paths::rotate_logs(latest)),
    };

    if let Some(path) = path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let file = File::create(&path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
    }

    CombinedLogger::init(loggers).context("Failed to initialize logger")
}
