//! CLI runtime configuration.
//!
//! # Responsibility
//! - Resolve database path, logging and display locale from the environment.
//!
//! # Invariants
//! - Missing variables fall back to defaults; malformed values are errors.

use chrono::Locale;
use std::path::PathBuf;

pub const ENV_DB: &str = "VAXTRACK_DB";
pub const ENV_LOG_DIR: &str = "VAXTRACK_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "VAXTRACK_LOG_LEVEL";
pub const ENV_LOCALE: &str = "VAXTRACK_LOCALE";

const DEFAULT_DB_FILE_NAME: &str = "vaxtrack.sqlite3";
const DEFAULT_LOCALE: &str = "en_US";

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    /// Logging stays off when unset.
    pub log_dir: Option<String>,
    pub log_level: String,
    pub locale: Locale,
}

impl CliConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup` instead of the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = non_empty(ENV_DB)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
        let log_level = non_empty(ENV_LOG_LEVEL)
            .unwrap_or_else(|| vaxtrack_core::default_log_level().to_string());
        let locale_name = non_empty(ENV_LOCALE).unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let locale = Locale::try_from(locale_name.trim())
            .map_err(|_| format!("unsupported locale `{locale_name}` in {ENV_LOCALE}"))?;

        Ok(Self {
            db_path,
            log_dir: non_empty(ENV_LOG_DIR),
            log_level,
            locale,
        })
    }
}
