//! piiscan configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default upload limit (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Main piiscan configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PiiScanConfig {
    /// Document intake configuration
    pub intake: IntakeConfig,

    /// Report output configuration
    pub report: ReportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl PiiScanConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `MAX_FILE_SIZE` and `ALLOWED_FILE_TYPES` from the environment.
    pub fn apply_env_overrides(&mut self) {
        let max_size = std::env::var("MAX_FILE_SIZE").ok();
        let allowed = std::env::var("ALLOWED_FILE_TYPES").ok();
        self.intake
            .apply_overrides(max_size.as_deref(), allowed.as_deref());
    }
}

/// Document intake configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Maximum document size in bytes
    pub max_file_size: u64,

    /// Media types accepted for scanning
    pub allowed_types: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_types: vec![
                "text/plain".to_string(),
                "text/markdown".to_string(),
                "text/csv".to_string(),
                "application/json".to_string(),
            ],
        }
    }
}

impl IntakeConfig {
    fn apply_overrides(&mut self, max_size: Option<&str>, allowed: Option<&str>) {
        // Non-numeric or zero sizes fall back to the configured limit.
        if let Some(size) = max_size.and_then(|s| s.trim().parse::<u64>().ok()) {
            if size > 0 {
                self.max_file_size = size;
            }
        }

        if let Some(list) = allowed {
            let types: Vec<String> = list
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            if !types.is_empty() {
                self.allowed_types = types;
            }
        }
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable grouped report
    #[default]
    Text,

    /// JSON findings with offsets
    Json,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format
    pub format: OutputFormat,

    /// Print the one-line summary after the report
    pub summary: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            summary: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the `piiscan` target
    pub level: String,

    /// Emit JSON log lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Default configuration file location (`<config_dir>/piiscan/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join("piiscan").join("config.toml"))
}
