//! Single employee prediction

use crate::error::Result;
use crate::models::{ChurnModel, InferenceEngine};
use crate::types::{EmployeeRecord, Verdict};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Verdict for one hand-entered employee
#[derive(Debug, Clone, Serialize)]
pub struct SinglePrediction {
    /// Unique identifier for this request, echoed in logs
    pub request_id: String,
    pub predicted_at: DateTime<Utc>,
    pub record: EmployeeRecord,
    /// Raw class label from the model
    pub label: i64,
    pub verdict: Verdict,
}

/// Load the model and predict one record
pub fn predict_single<M, F>(
    record: EmployeeRecord,
    positive_label: i64,
    load_model: F,
) -> Result<SinglePrediction>
where
    M: ChurnModel,
    F: FnOnce() -> Result<M>,
{
    let request_id = Uuid::new_v4().to_string();

    let mut engine = InferenceEngine::with_model(load_model()?, positive_label);
    let result = engine.predict(&record)?;

    info!(
        request_id = %request_id,
        model = %engine.model_name(),
        label = result.label,
        verdict = %result.verdict,
        "Single prediction complete"
    );

    Ok(SinglePrediction {
        request_id,
        predicted_at: Utc::now(),
        record,
        label: result.label,
        verdict: result.verdict,
    })
}
