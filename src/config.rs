//! Configuration management for the churn predictor

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

/// Prediction artifact configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the exported ONNX pipeline
    pub path: PathBuf,
    /// Class label meaning "will leave"
    pub positive_label: i64,
    /// Number of intra-op threads for ONNX Runtime
    pub intra_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("pipeline.onnx"),
            positive_label: 1,
            intra_threads: 1,
        }
    }
}

/// Batch prediction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Where processed data is written (overwritten on every run)
    pub output_path: PathBuf,
    /// Name of the appended verdict column
    pub label_column: String,
    /// Rows shown on screen; 0 shows the whole table
    pub preview_rows: usize,
    /// Column renames applied after header trimming
    pub column_renames: BTreeMap<String, String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let mut column_renames = BTreeMap::new();
        column_renames.insert("Departments".to_string(), "departments".to_string());

        Self {
            output_path: PathBuf::from("processed_data.csv"),
            label_column: "Predicted_target".to_string(),
            preview_rows: 20,
            column_renames,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, compact, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file, if present
    pub fn load() -> Result<Self> {
        Self::load_optional(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a file that must exist
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(path.as_ref(), true)
    }

    /// Load configuration from a file, falling back to defaults when it is missing
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(path.as_ref(), false)
    }

    fn build(path: &Path, required: bool) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path).required(required))
            .build()
            .with_context(|| format!("Failed to build configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
