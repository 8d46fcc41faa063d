//! Type definitions for the churn predictor

pub mod record;
pub mod verdict;

pub use record::{Department, EmployeeRecord, SalaryTier};
pub use verdict::Verdict;
