//! Configuration management for ledgerbook
//!
//! This module handles loading, validation, and management of
//! ledgerbook configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

// ==================== Configuration Types ====================

/// Ledger snapshot location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding snapshot files
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Snapshot file name (`.yaml`, `.yml` or `.json`)
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            snapshot_file: default_snapshot_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_snapshot_file() -> String {
    "ledger.yaml".to_string()
}

/// Report derivation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Fiscal year start month (1-12), used when a period has no explicit start
    #[serde(default = "default_fiscal_start")]
    pub fiscal_year_start: u32,
    /// Infer account roles from account names when a record carries none
    #[serde(default = "default_false")]
    pub infer_roles: bool,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            fiscal_year_start: default_fiscal_start(),
            infer_roles: false,
        }
    }
}

fn default_fiscal_start() -> u32 {
    1
}

fn default_false() -> bool {
    false
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency code printed next to amounts
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: SymbolPosition::After,
        }
    }
}

fn default_currency() -> String {
    "GBP".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

fn default_decimal_sep() -> String {
    ".".to_string()
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    #[default]
    After,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub reporting: ReportingConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if !(1..=12).contains(&self.reporting.fiscal_year_start) {
            return Err(ConfigError::InvalidValue {
                field: "reporting.fiscal_year_start".to_string(),
                reason: "Fiscal year start must be between 1 and 12".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.data.snapshot_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.snapshot_file".to_string(),
                reason: "Snapshot file name must not be empty".to_string(),
            });
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.level".to_string(),
                    reason: format!("Unknown log level '{}'", other),
                })
            }
        }

        Ok(())
    }

    /// Default configuration file contents
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Full path of the ledger snapshot
    pub fn snapshot_path(&self) -> PathBuf {
        self.data.path.join(&self.data.snapshot_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reporting.fiscal_year_start, 1);
        assert!(!config.reporting.infer_roles);
        assert_eq!(config.snapshot_path(), PathBuf::from("./data/ledger.yaml"));
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.currency.decimal_places, 2);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = Config::from_yaml("reporting:\n  fiscal_year_start: 4\n").unwrap();
        assert_eq!(config.reporting.fiscal_year_start, 4);
        assert_eq!(config.data.snapshot_file, "ledger.yaml");
        assert_eq!(config.currency.symbol_position, SymbolPosition::After);
    }

    #[test]
    fn test_invalid_fiscal_start_rejected() {
        let err = Config::from_yaml("reporting:\n  fiscal_year_start: 13\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
        assert_eq!(
            err.to_details().field.as_deref(),
            Some("reporting.fiscal_year_start")
        );
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let err = Config::from_yaml("logging:\n  level: chatty\n").unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Config::from_yaml("reporting: [unclosed").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data:\n  path: /srv/books\n  snapshot_file: q1.json").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.snapshot_path(), PathBuf::from("/srv/books/q1.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/definitely/not/here.yaml").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
        assert!(!err.to_details().suggestions.is_empty());
    }
}
