//! Churn inference engine

use crate::error::{ChurnError, Result};
use crate::feature_extractor::{FeatureExtractor, FeatureValue};
use crate::models::loader::{ModelInput, OnnxPipeline};
use crate::types::{EmployeeRecord, Verdict};
use ort::tensor::TensorElementType;
use ort::value::{DynValue, Tensor};
use tracing::debug;

/// Anything that can classify employee records.
///
/// Implementations must return exactly one label per record, in input order.
pub trait ChurnModel {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Predict class labels for a batch of records
    fn predict(&mut self, records: &[EmployeeRecord]) -> Result<Vec<i64>>;
}

impl<M: ChurnModel + ?Sized> ChurnModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict(&mut self, records: &[EmployeeRecord]) -> Result<Vec<i64>> {
        (**self).predict(records)
    }
}

/// Result of model inference for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionResult {
    /// Raw class label returned by the model
    pub label: i64,
    /// Label mapped against the positive class
    pub verdict: Verdict,
}

/// Runs a churn model and maps its labels to verdicts
pub struct InferenceEngine<M: ChurnModel> {
    model: M,
    positive_label: i64,
}

impl<M: ChurnModel> InferenceEngine<M> {
    /// Wrap an already constructed model
    pub fn with_model(model: M, positive_label: i64) -> Self {
        Self {
            model,
            positive_label,
        }
    }

    /// Get the model name
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Get the label treated as "will leave"
    pub fn positive_label(&self) -> i64 {
        self.positive_label
    }

    /// Predict a single record
    pub fn predict(&mut self, record: &EmployeeRecord) -> Result<PredictionResult> {
        let mut results = self.predict_batch(std::slice::from_ref(record))?;
        results.pop().ok_or(ChurnError::LabelCount {
            expected: 1,
            found: 0,
        })
    }

    /// Predict a batch of records, preserving order
    pub fn predict_batch(&mut self, records: &[EmployeeRecord]) -> Result<Vec<PredictionResult>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let labels = self.model.predict(records)?;
        if labels.len() != records.len() {
            return Err(ChurnError::LabelCount {
                expected: records.len(),
                found: labels.len(),
            });
        }

        debug!(
            model = %self.model.name(),
            records = records.len(),
            "Inference complete"
        );

        Ok(labels
            .into_iter()
            .map(|label| PredictionResult {
                label,
                verdict: Verdict::from_label(label, self.positive_label),
            })
            .collect())
    }
}

impl ChurnModel for OnnxPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&mut self, records: &[EmployeeRecord]) -> Result<Vec<i64>> {
        let extractor = FeatureExtractor::new();

        let mut inputs: Vec<(String, DynValue)> = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            let values = extractor
                .column_values(records, &input.name)
                .ok_or_else(|| ChurnError::Inference {
                    message: format!("pipeline expects unknown input '{}'", input.name),
                })?;
            inputs.push((input.name.clone(), column_tensor(input, &values)?));
        }

        let outputs = self.session.run(inputs)?;
        let output = outputs
            .get(self.label_output.as_str())
            .ok_or_else(|| ChurnError::Inference {
                message: format!("output '{}' missing from results", self.label_output),
            })?;

        let (_shape, data) = output.try_extract_tensor::<i64>()?;
        Ok(data.to_vec())
    }
}

/// Build a `[n, 1]` tensor for one pipeline input, converting to its element type
fn column_tensor(input: &ModelInput, values: &[FeatureValue]) -> Result<DynValue> {
    let shape = vec![values.len() as i64, 1_i64];
    let mismatch = || ChurnError::Inference {
        message: format!(
            "input '{}' expects {:?} values",
            input.name, input.element_type
        ),
    };

    let tensor = match input.element_type {
        TensorElementType::Float32 => {
            let data = values
                .iter()
                .map(|v| v.as_f64().map(|x| x as f32))
                .collect::<Option<Vec<f32>>>()
                .ok_or_else(mismatch)?;
            Tensor::from_array((shape, data))?.into_dyn()
        }
        TensorElementType::Float64 => {
            let data = values
                .iter()
                .map(FeatureValue::as_f64)
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(mismatch)?;
            Tensor::from_array((shape, data))?.into_dyn()
        }
        TensorElementType::Int64 => {
            let data = values
                .iter()
                .map(FeatureValue::as_i64)
                .collect::<Option<Vec<i64>>>()
                .ok_or_else(mismatch)?;
            Tensor::from_array((shape, data))?.into_dyn()
        }
        TensorElementType::Int32 => {
            let data = values
                .iter()
                .map(|v| v.as_i64().and_then(|x| i32::try_from(x).ok()))
                .collect::<Option<Vec<i32>>>()
                .ok_or_else(mismatch)?;
            Tensor::from_array((shape, data))?.into_dyn()
        }
        TensorElementType::String => {
            let data: Vec<String> = values.iter().map(FeatureValue::to_text).collect();
            Tensor::from_string_array((shape, data.as_slice()))?.into_dyn()
        }
        _ => return Err(mismatch()),
    };

    Ok(tensor)
}
