//! Shared configuration paths.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.kuzkabuh/
//! ├── .env          # Tokens and credentials
//! └── leads/        # Stored leads (admin API)
//! ```
//!
//! `KUZKA_HOME` overrides the base directory.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

/// Environment variable for a custom data directory.
pub const DATA_DIR_ENV: &str = "KUZKA_HOME";

const DEFAULT_DATA_DIR: &str = ".kuzkabuh";

static DATA_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the data directory.
///
/// 1. `KUZKA_HOME` if set
/// 2. `~/.kuzkabuh` if the home directory is known
/// 3. `.kuzkabuh` in the current directory
pub fn data_dir() -> PathBuf {
    DATA_DIR_CACHE
        .get_or_init(|| {
            std::env::var(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_DATA_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
                })
        })
        .clone()
}

/// Path of the shared `.env` file.
pub fn env_file() -> PathBuf {
    data_dir().join(".env")
}

/// Directory the admin API keeps leads in.
pub fn leads_dir() -> PathBuf {
    data_dir().join("leads")
}

/// Loads environment files, first match wins per variable.
///
/// Order: `<data_dir>/.env`, then `.env.local` or `.env` in the working
/// directory. Variables already present in the process environment are
/// never overridden. Returns the files that were loaded.
pub fn load_env_files() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    let shared = env_file();
    if load_if_exists(&shared) {
        loaded.push(shared);
    }

    for local in [".env.local", ".env"] {
        let path = PathBuf::from(local);
        if load_if_exists(&path) {
            loaded.push(path);
            break;
        }
    }

    loaded
}

fn load_if_exists(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    match dotenvy::from_path(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Loaded env file");
            true
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Could not load env file");
            false
        }
    }
}
