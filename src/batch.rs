//! Batch prediction over an employee CSV file

use crate::config::BatchConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::feature_extractor::FeatureExtractor;
use crate::metrics::BatchMetrics;
use crate::models::{ChurnModel, InferenceEngine};
use crate::types::Verdict;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything a finished batch run produced
#[derive(Debug)]
pub struct BatchOutcome {
    /// Cleaned input with the verdict column appended
    pub dataset: Dataset,
    /// Where `dataset` was written
    pub output_path: PathBuf,
    pub metrics: BatchMetrics,
}

/// Reads, cleans, predicts and exports one employee file
pub struct BatchPredictor<'a> {
    config: &'a BatchConfig,
    positive_label: i64,
    extractor: FeatureExtractor,
}

impl<'a> BatchPredictor<'a> {
    pub fn new(config: &'a BatchConfig, positive_label: i64) -> Self {
        Self {
            config,
            positive_label,
            extractor: FeatureExtractor::new(),
        }
    }

    /// Trim column names, apply renames and drop duplicate rows.
    ///
    /// Returns the number of rows removed.
    pub fn clean(&self, dataset: &mut Dataset) -> usize {
        dataset.normalize_columns(&self.config.column_renames);
        dataset.drop_duplicates()
    }

    /// Run the whole batch flow.
    ///
    /// The model is only loaded once the input has been read and cleaned, and
    /// the output file is only written when every step before it succeeded.
    pub fn run<M, F>(&self, input: &Path, output: &Path, load_model: F) -> Result<BatchOutcome>
    where
        M: ChurnModel,
        F: FnOnce() -> Result<M>,
    {
        let mut metrics = BatchMetrics::new();

        let mut dataset = Dataset::read_csv(input)?;
        let rows_read = dataset.len();
        let dropped = self.clean(&mut dataset);
        metrics.record_cleaning(rows_read, dropped);
        info!(
            input = %input.display(),
            rows = rows_read,
            duplicates = dropped,
            "Input cleaned"
        );
        if dataset.is_empty() {
            warn!(input = %input.display(), "No rows to predict");
        }

        let load_start = Instant::now();
        let model = load_model()?;
        metrics.model_load_time = load_start.elapsed();
        let mut engine = InferenceEngine::with_model(model, self.positive_label);

        let positions = self.extractor.locate(dataset.headers())?;
        let records = dataset
            .rows()
            .iter()
            .enumerate()
            .map(|(idx, row)| self.extractor.parse_row(&positions, row, idx + 1))
            .collect::<Result<Vec<_>>>()?;
        debug!(records = records.len(), "Records extracted");

        let inference_start = Instant::now();
        let verdicts: Vec<Verdict> = engine
            .predict_batch(&records)?
            .into_iter()
            .map(|p| p.verdict)
            .collect();
        metrics.record_verdicts(&verdicts, inference_start.elapsed());

        let cells = verdicts.iter().map(|v| v.as_cell().to_string()).collect();
        dataset.set_column(&self.config.label_column, cells)?;

        dataset.write_csv(output)?;
        info!(output = %output.display(), rows = dataset.len(), "Processed data saved");

        Ok(BatchOutcome {
            dataset,
            output_path: output.to_path_buf(),
            metrics,
        })
    }
}
