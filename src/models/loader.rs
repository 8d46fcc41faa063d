//! ONNX pipeline loader

use crate::error::{ChurnError, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::tensor::TensorElementType;
use ort::value::ValueType;
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, info};

/// One named graph input and the element type it expects
#[derive(Debug, Clone)]
pub struct ModelInput {
    pub name: String,
    pub element_type: TensorElementType,
}

/// Loaded ONNX pipeline with metadata
pub struct OnnxPipeline {
    /// Display name (file stem of the artifact)
    pub name: String,
    /// ONNX Runtime session
    pub session: Session,
    /// Graph inputs, one per training column
    pub inputs: Vec<ModelInput>,
    /// Output holding predicted class labels
    pub label_output: String,
}

/// Loader for the exported churn pipeline
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    intra_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with specified number of threads
    pub fn with_threads(intra_threads: usize) -> Result<Self> {
        ort::init().commit().map_err(|e| ChurnError::ModelLoad {
            path: Default::default(),
            message: format!("failed to initialize ONNX Runtime: {e}"),
        })?;
        debug!(intra_threads, "ONNX Runtime initialized");
        Ok(Self {
            intra_threads: intra_threads.max(1),
        })
    }

    /// Load the pipeline artifact from file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<OnnxPipeline> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(load_error(path, "file not found"));
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "pipeline".to_string());

        info!(model = %name, path = %path.display(), threads = self.intra_threads, "Loading ONNX pipeline");

        let session = Session::builder()
            .map_err(|e| load_error(path, e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_error(path, e))?
            .with_intra_threads(self.intra_threads)
            .map_err(|e| load_error(path, e))?
            .commit_from_file(path)
            .map_err(|e| load_error(path, e))?;

        let mut inputs = Vec::with_capacity(session.inputs.len());
        for input in &session.inputs {
            match &input.input_type {
                ValueType::Tensor { ty, .. } => inputs.push(ModelInput {
                    name: input.name.clone(),
                    element_type: *ty,
                }),
                other => {
                    return Err(load_error(
                        path,
                        format!("input '{}' is not a tensor ({other:?})", input.name),
                    ))
                }
            }
        }

        // Converted classifiers expose "label" next to "probabilities"
        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name == "label")
            .or_else(|| session.outputs.iter().find(|o| o.name.contains("label")))
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .ok_or_else(|| load_error(path, "graph has no outputs"))?;

        info!(
            model = %name,
            inputs = inputs.len(),
            output = %label_output,
            "Pipeline loaded successfully"
        );

        Ok(OnnxPipeline {
            name,
            session,
            inputs,
            label_output,
        })
    }
}

fn load_error(path: &Path, err: impl Display) -> ChurnError {
    ChurnError::ModelLoad {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
