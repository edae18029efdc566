use dirs::home_dir;
use std::{env, fs, path::Path, path::PathBuf};

use tracing_subscriber::EnvFilter;

pub mod persistence;

const DEFAULT_DIR_NAME: &str = ".course_core";
const CATALOG_DIR: &str = "catalogs";
const BACKUP_DIR: &str = "backups";
const ATTENDANCE_DIR: &str = "attendance";
const STATE_FILE: &str = "state.json";

/// Returns the application-specific data directory, defaulting to `~/.course_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("COURSE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Absolute path to the managed catalogs directory.
pub fn catalogs_dir() -> PathBuf {
    app_data_dir().join(CATALOG_DIR)
}

/// Base directory for backup snapshots.
pub fn backups_root() -> PathBuf {
    app_data_dir().join(BACKUP_DIR)
}

/// Directory holding per-course attendance sheets.
pub fn attendance_dir() -> PathBuf {
    app_data_dir().join(ATTENDANCE_DIR)
}

/// Path to the shared state file (tracking the last opened catalog).
pub fn state_file() -> PathBuf {
    app_data_dir().join(STATE_FILE)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Installs the global tracing subscriber. Respects `RUST_LOG` when set.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("course_core=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
