//! Feature extraction for churn pipeline inference.
//!
//! The trained pipeline takes one named input per training column, so
//! extraction produces column-oriented values keyed by those names rather
//! than a flat numeric vector. Categorical encoding happens inside the
//! pipeline, never here.

use crate::error::{ChurnError, Result};
use crate::types::record::{Department, EmployeeRecord, SalaryTier};

/// Training column names, in the order the form collects them.
pub const FEATURE_COLUMNS: [&str; 9] = [
    "satisfaction_level",
    "last_evaluation",
    "number_project",
    "average_montly_hours",
    "time_spend_company",
    "Work_accident",
    "promotion_last_5years",
    "departments",
    "salary",
];

/// A single cell of model input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Float(f64),
    Int(i64),
    Text(&'static str),
}

impl FeatureValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Text(s) => s.parse().ok(),
        }
    }

    /// Integer view of the value; floats must be integral
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FeatureValue::Int(v) => Some(*v),
            FeatureValue::Float(v) => integral(*v),
            FeatureValue::Text(s) => s.parse().ok(),
        }
    }

    /// String view of the value
    pub fn to_text(&self) -> String {
        match self {
            FeatureValue::Float(v) => v.to_string(),
            FeatureValue::Int(v) => v.to_string(),
            FeatureValue::Text(s) => (*s).to_string(),
        }
    }
}

/// Maps employee records to and from named pipeline inputs.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Collect one column across a batch of records.
    ///
    /// Returns `None` when `column` is not a training column.
    pub fn column_values(
        &self,
        records: &[EmployeeRecord],
        column: &str,
    ) -> Option<Vec<FeatureValue>> {
        if !FEATURE_COLUMNS.contains(&column) {
            return None;
        }
        records
            .iter()
            .map(|record| Self::value_of(record, column))
            .collect()
    }

    fn value_of(record: &EmployeeRecord, column: &str) -> Option<FeatureValue> {
        let value = match column {
            "satisfaction_level" => FeatureValue::Float(record.satisfaction_level),
            "last_evaluation" => FeatureValue::Float(record.last_evaluation),
            "number_project" => FeatureValue::Int(record.number_project),
            "average_montly_hours" => FeatureValue::Int(record.average_monthly_hours),
            "time_spend_company" => FeatureValue::Int(record.time_spent_company),
            "Work_accident" => FeatureValue::Int(record.work_accident),
            "promotion_last_5years" => FeatureValue::Int(record.promotion_last_5years),
            "departments" => FeatureValue::Text(record.departments.as_str()),
            "salary" => FeatureValue::Text(record.salary.as_str()),
            _ => return None,
        };
        Some(value)
    }

    /// Find the position of every training column in a header row.
    pub fn locate(&self, headers: &[String]) -> Result<[usize; 9]> {
        let mut positions = [0usize; 9];
        for (slot, name) in positions.iter_mut().zip(FEATURE_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ChurnError::MissingColumn {
                    column: name.to_string(),
                })?;
        }
        Ok(positions)
    }

    /// Build a record from a table row, given positions from [`Self::locate`].
    ///
    /// `row_number` is only used for error messages.
    pub fn parse_row(
        &self,
        positions: &[usize; 9],
        row: &[String],
        row_number: usize,
    ) -> Result<EmployeeRecord> {
        let cells: Vec<&str> = positions
            .iter()
            .map(|&pos| row.get(pos).map_or("", |s| s.trim()))
            .collect();

        Ok(EmployeeRecord {
            satisfaction_level: parse_float(cells[0], FEATURE_COLUMNS[0], row_number)?,
            last_evaluation: parse_float(cells[1], FEATURE_COLUMNS[1], row_number)?,
            number_project: parse_int(cells[2], FEATURE_COLUMNS[2], row_number)?,
            average_monthly_hours: parse_int(cells[3], FEATURE_COLUMNS[3], row_number)?,
            time_spent_company: parse_int(cells[4], FEATURE_COLUMNS[4], row_number)?,
            work_accident: parse_int(cells[5], FEATURE_COLUMNS[5], row_number)?,
            promotion_last_5years: parse_int(cells[6], FEATURE_COLUMNS[6], row_number)?,
            departments: parse_category::<Department>(cells[7], FEATURE_COLUMNS[7], row_number)?,
            salary: parse_category::<SalaryTier>(cells[8], FEATURE_COLUMNS[8], row_number)?,
        })
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(value: &str, column: &str, row: usize, reason: impl Into<String>) -> ChurnError {
    ChurnError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_float(value: &str, column: &str, row: usize) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(value, column, row, "expected a number")),
    }
}

fn parse_int(value: &str, column: &str, row: usize) -> Result<i64> {
    if let Ok(v) = value.parse::<i64>() {
        return Ok(v);
    }
    // Spreadsheet exports often write integers as "3.0"
    value
        .parse::<f64>()
        .ok()
        .and_then(integral)
        .ok_or_else(|| invalid(value, column, row, "expected an integer"))
}

/// Exact `i64` for an integral float inside the `i64` range
fn integral(v: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    let in_range = v >= i64::MIN as f64 && v < i64::MAX as f64;
    (v.fract() == 0.0 && in_range).then_some(v as i64)
}

fn parse_category<T>(value: &str, column: &str, row: usize) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|reason| invalid(value, column, row, reason))
}
