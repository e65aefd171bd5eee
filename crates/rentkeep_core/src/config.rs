//! Startup configuration.
//!
//! # Responsibility
//! - Resolve database location, tenant scope and logging options once.
//! - Hand the result to callers explicitly; there is no global config.
//!
//! # Invariants
//! - `db_path` is always set; the default lives under the user's documents
//!   folder (`Documents/airbnb_maintenance/maintenance.db`).
//! - `log_level` is one of `trace|debug|info|warn|error`.

use crate::logging::{default_log_level, normalize_level};
use crate::model::OwnerId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use uuid::Uuid;

const DEFAULT_DATA_DIR: &str = "airbnb_maintenance";
const DEFAULT_DB_FILE: &str = "maintenance.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither a documents folder nor a home directory could be found.
    NoDataDir,
    InvalidOwner(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => write!(
                f,
                "cannot locate a documents or home directory; pass a database path explicitly"
            ),
            Self::InvalidOwner(value) => write!(f, "owner must be a UUID, got `{value}`"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Optional values supplied by the caller (CLI flags, embedding app).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub owner: Option<String>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Tenant every query is scoped to; `None` means unscoped local use.
    pub owner: Option<OwnerId>,
    pub log_level: &'static str,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let db_path = match overrides.db_path {
            Some(path) => path,
            None => default_db_path()?,
        };

        let owner = overrides
            .owner
            .map(|raw| {
                Uuid::parse_str(raw.trim()).map_err(|_| ConfigError::InvalidOwner(raw.clone()))
            })
            .transpose()?;

        let log_level = match overrides.log_level {
            Some(level) => normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            owner,
            log_level,
            log_dir: overrides.log_dir,
        })
    }
}

/// Default database file location.
pub fn default_db_path() -> Result<PathBuf, ConfigError> {
    let documents = dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .ok_or(ConfigError::NoDataDir)?;
    Ok(documents.join(DEFAULT_DATA_DIR).join(DEFAULT_DB_FILE))
}
