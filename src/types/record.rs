//! Employee feature record consumed by the churn pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Department the employee works in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Department {
    #[serde(rename = "sales")]
    #[value(name = "sales")]
    Sales,
    #[serde(rename = "technical")]
    #[value(name = "technical")]
    Technical,
    #[serde(rename = "support")]
    #[value(name = "support")]
    Support,
    #[serde(rename = "IT")]
    #[value(name = "IT")]
    It,
    #[serde(rename = "product_mng")]
    #[value(name = "product_mng")]
    ProductMng,
    #[serde(rename = "marketing")]
    #[value(name = "marketing")]
    Marketing,
    #[serde(rename = "RandD")]
    #[value(name = "RandD")]
    RandD,
    #[serde(rename = "accounting")]
    #[value(name = "accounting")]
    Accounting,
    #[serde(rename = "hr")]
    #[value(name = "hr")]
    Hr,
    #[serde(rename = "management")]
    #[value(name = "management")]
    Management,
}

impl Department {
    /// All departments known to the trained pipeline, in form order
    pub const ALL: [Department; 10] = [
        Department::Sales,
        Department::Technical,
        Department::Support,
        Department::It,
        Department::ProductMng,
        Department::Marketing,
        Department::RandD,
        Department::Accounting,
        Department::Hr,
        Department::Management,
    ];

    /// Category string as seen by the pipeline
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Sales => "sales",
            Department::Technical => "technical",
            Department::Support => "support",
            Department::It => "IT",
            Department::ProductMng => "product_mng",
            Department::Marketing => "marketing",
            Department::RandD => "RandD",
            Department::Accounting => "accounting",
            Department::Hr => "hr",
            Department::Management => "management",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown department '{s}'"))
    }
}

/// Salary tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SalaryTier {
    Low,
    Medium,
    High,
}

impl SalaryTier {
    pub const ALL: [SalaryTier; 3] = [SalaryTier::Low, SalaryTier::Medium, SalaryTier::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryTier::Low => "low",
            SalaryTier::Medium => "medium",
            SalaryTier::High => "high",
        }
    }
}

impl fmt::Display for SalaryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SalaryTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SalaryTier::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown salary tier '{s}'"))
    }
}

/// One employee described by the nine features the pipeline was trained on.
///
/// Serialized field names match the training columns verbatim, including the
/// `average_montly_hours` spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Satisfaction score in [0, 1]
    pub satisfaction_level: f64,

    /// Last evaluation score in [0, 1]
    pub last_evaluation: f64,

    /// Number of projects assigned
    pub number_project: i64,

    /// Average monthly hours worked
    #[serde(rename = "average_montly_hours")]
    pub average_monthly_hours: i64,

    /// Tenure in years
    #[serde(rename = "time_spend_company")]
    pub time_spent_company: i64,

    /// Had a work accident (0 = no, 1 = yes)
    #[serde(rename = "Work_accident")]
    pub work_accident: i64,

    /// Promoted during the last five years (0 = no, 1 = yes)
    pub promotion_last_5years: i64,

    /// Department
    pub departments: Department,

    /// Salary tier
    pub salary: SalaryTier,
}

impl Default for EmployeeRecord {
    /// The form's starting position: every slider at its default.
    fn default() -> Self {
        Self {
            satisfaction_level: 0.5,
            last_evaluation: 0.5,
            number_project: 5,
            average_monthly_hours: 150,
            time_spent_company: 3,
            work_accident: 0,
            promotion_last_5years: 0,
            departments: Department::Sales,
            salary: SalaryTier::Low,
        }
    }
}
