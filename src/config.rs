//! Runtime configuration and storage paths

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the storage database path
pub const DB_ENV: &str = "PET_ADOPT_DB";

/// Environment variable overriding the administrator email
pub const ADMIN_EMAIL_ENV: &str = "PET_ADOPT_ADMIN_EMAIL";

/// Email of the administrator account unless overridden
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@petadopt.com";

/// Pets shown per catalog page
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file holding the key-value store
    pub db_path: PathBuf,
    /// Signed-in users with this email get the admin role
    pub admin_email: String,
    /// Catalog page size
    pub page_size: usize,
}

impl Config {
    /// Resolve configuration: explicit override, then environment, then platform default
    pub fn load(db_override: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_override {
            Some(path) => path,
            None => match env::var_os(DB_ENV) {
                Some(path) if !path.is_empty() => PathBuf::from(path),
                _ => default_db_path()?,
            },
        };

        let admin_email = env::var(ADMIN_EMAIL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());

        Ok(Self {
            db_path,
            admin_email,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Configuration pointing at an explicit database, used by tests
    pub fn with_db(db_path: PathBuf) -> Self {
        Self {
            db_path,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Get the default storage database path
/// - macOS: ~/Library/Application Support/pet-adopt/storage.db
/// - Linux: ~/.local/share/pet-adopt/storage.db
/// - Windows: %APPDATA%/pet-adopt/storage.db
pub fn default_db_path() -> Result<PathBuf> {
    let data = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data.join("pet-adopt").join("storage.db"))
}
