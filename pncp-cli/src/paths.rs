//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "br";
const ORGANIZATION: &str = "pncp";
const APPLICATION: &str = "pncp";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 10;

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the path to the default configuration file.
///
/// - Linux: `$XDG_CONFIG_HOME/pncp/config.toml` or `~/.config/pncp/config.toml`
/// - macOS: `~/Library/Application Support/br.pncp.pncp/config.toml`
/// - Windows: `C:\Users\<User>\AppData\Roaming\pncp\pncp\config\config.toml`
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join("latest.log"))
}

/// Rename an existing log to a timestamped name and prune old ones.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs(latest: &Path) {
    let Some(dir) = latest.parent() else { return };

    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(latest, dir.join(format!("{}.log", timestamp)));
    }

    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path() != latest && e.path().extension().is_some_and(|ext| ext == "log"))
        .collect();

    // Oldest first
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    if logs.len() > MAX_OLD_LOGS {
        for entry in logs.iter().take(logs.len() - MAX_OLD_LOGS) {
            let _ = fs::remove_file(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_logs_archives_latest() {
        let dir = tempfile::tempdir().unwrap();
        let latest = dir.path().join("latest.log");
        fs::write(&latest, "previous run").unwrap();

        rotate_logs(&latest);

        assert!(!latest.exists());
        let archived: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(archived.len(), 1);
    }

    #[test]
    fn test_rotate_logs_prunes_old_files() {
        let dir = tempfile::tempdir().unwrap();
        for n in 0..(MAX_OLD_LOGS + 3) {
            fs::write(dir.path().join(format!("old_{:02}.log", n)), "").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        rotate_logs(&dir.path().join("latest.log"));

        let remaining = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "log"))
            .count();
        assert_eq!(remaining, MAX_OLD_LOGS);
        assert!(dir.path().join("notes.txt").exists());
    }
}
