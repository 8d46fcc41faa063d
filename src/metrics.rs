//! Counters and timing for a batch prediction run.

use crate::types::Verdict;
use std::time::{Duration, Instant};
use tracing::info;

/// Statistics collected while processing one batch file
#[derive(Debug, Clone)]
pub struct BatchMetrics {
    /// Data rows read from the input file
    pub rows_read: usize,
    /// Rows removed as exact duplicates
    pub duplicates_dropped: usize,
    /// Rows sent to the model
    pub rows_predicted: usize,
    /// Rows predicted to leave
    pub leave_count: usize,
    /// Rows predicted to stay
    pub stay_count: usize,
    /// Time spent loading the artifact
    pub model_load_time: Duration,
    /// Time spent inside the model
    pub inference_time: Duration,
    /// Start time for elapsed calculation
    start_time: Instant,
}

impl BatchMetrics {
    /// Create a new metrics collector; the clock starts now
    pub fn new() -> Self {
        Self {
            rows_read: 0,
            duplicates_dropped: 0,
            rows_predicted: 0,
            leave_count: 0,
            stay_count: 0,
            model_load_time: Duration::ZERO,
            inference_time: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    /// Record the outcome of input cleaning
    pub fn record_cleaning(&mut self, rows_read: usize, duplicates_dropped: usize) {
        self.rows_read = rows_read;
        self.duplicates_dropped = duplicates_dropped;
    }

    /// Record the verdicts produced for the batch
    pub fn record_verdicts(&mut self, verdicts: &[Verdict], inference_time: Duration) {
        self.rows_predicted = verdicts.len();
        self.leave_count = verdicts.iter().filter(|v| **v == Verdict::Leave).count();
        self.stay_count = verdicts.len() - self.leave_count;
        self.inference_time = inference_time;
    }

    /// Share of predicted rows expected to leave, in percent
    pub fn leave_rate(&self) -> f64 {
        if self.rows_predicted > 0 {
            (self.leave_count as f64 / self.rows_predicted as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Wall time since the run started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Emit the run summary as a structured log event
    pub fn log_summary(&self) {
        info!(
            rows_read = self.rows_read,
            duplicates_dropped = self.duplicates_dropped,
            rows_predicted = self.rows_predicted,
            leave = self.leave_count,
            stay = self.stay_count,
            leave_rate = format!("{:.1}%", self.leave_rate()),
            model_load_ms = self.model_load_time.as_millis() as u64,
            inference_ms = self.inference_time.as_millis() as u64,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Batch prediction summary"
        );
    }
}

impl Default for BatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}
