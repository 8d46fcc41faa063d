//! Error types for churn prediction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, cleaning, predicting or writing employee data.
#[derive(Debug, Error)]
pub enum ChurnError {
    /// Failed to open or parse the input CSV.
    #[error("failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to write the output CSV.
    #[error("failed to write CSV {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Input file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A row has a different number of cells than the header.
    #[error("row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A required feature column is absent after normalization.
    #[error("required column '{column}' not found")]
    MissingColumn { column: String },

    /// A cell could not be parsed into its feature type.
    #[error("invalid {column} value '{value}' in row {row}: {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    /// The artifact could not be opened or initialized.
    #[error("failed to load model from {path}: {message}")]
    ModelLoad { path: PathBuf, message: String },

    /// The artifact rejected the input or produced unusable output.
    #[error("model inference failed: {message}")]
    Inference { message: String },

    /// The artifact returned a different number of labels than records.
    #[error("model returned {found} labels for {expected} records")]
    LabelCount { expected: usize, found: usize },
}

impl From<ort::Error> for ChurnError {
    fn from(err: ort::Error) -> Self {
        Self::Inference {
            message: err.to_string(),
        }
    }
}

/// Result type for churn operations.
pub type Result<T> = std::result::Result<T, ChurnError>;
