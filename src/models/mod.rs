//! Churn model loading and inference

pub mod inference;
pub mod loader;

pub use inference::{ChurnModel, InferenceEngine, PredictionResult};
pub use loader::{ModelLoader, OnnxPipeline};
