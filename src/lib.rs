//! Employee Churn Prediction Library
//!
//! Applies a pre-trained churn classification pipeline, exported to ONNX,
//! to one hand-entered employee or to a CSV file of employees.

pub mod batch;
pub mod config;
pub mod dataset;
pub mod display;
pub mod error;
pub mod feature_extractor;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod single;
pub mod types;

pub use batch::{BatchOutcome, BatchPredictor};
pub use config::AppConfig;
pub use dataset::Dataset;
pub use error::{ChurnError, Result};
pub use feature_extractor::FeatureExtractor;
pub use models::inference::{ChurnModel, InferenceEngine};
pub use single::{predict_single, SinglePrediction};
pub use types::{Department, EmployeeRecord, SalaryTier, Verdict};
