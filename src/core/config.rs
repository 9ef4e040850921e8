//! Driver configuration
//!
//! Loaded from a TOML file; every key is optional.
//!
//! ```toml
//! path = "first.db"
//! default_currency = "PLN"
//! log_level = "debug"
//! ```

use crate::core::error::{LedgerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Ledger file to operate on
    pub path: PathBuf,

    /// Currency used when an appended transaction does not name one
    #[validate(length(min = 1, max = 3))]
    pub default_currency: String,

    /// Default tracing directive when `RUST_LOG` is unset
    #[validate(length(min = 1))]
    pub log_level: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            path: PathBuf::from("ledger.db"),
            default_currency: "PLN".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LedgerConfig =
            toml::from_str(text).map_err(|e| LedgerError::Config(e.to_string()))?;
        config
            .validate()
            .map_err(|e| LedgerError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
