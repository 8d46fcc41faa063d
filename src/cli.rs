//! Command-line arguments for the churn predictor.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use employee_churn::{Department, EmployeeRecord, SalaryTier};

#[derive(Parser)]
#[command(
    name = "churn",
    version,
    about = "Employee churn prediction",
    long_about = "Predict whether employees may leave the organization using a \
                  pre-trained pipeline exported to ONNX.\n\n\
                  Use `single` for one employee or `batch` for a CSV file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: config/config.toml when present).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Path to the ONNX pipeline (overrides config).
    #[arg(long, value_name = "PATH", global = true)]
    pub model: Option<PathBuf>,

    /// Log level (overrides config).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (overrides config).
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    /// Disable colored log output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Predict churn for a single employee.
    Single(SingleArgs),

    /// Predict churn for every employee in a CSV file.
    Batch(BatchArgs),
}

#[derive(Args)]
pub struct SingleArgs {
    /// Employee satisfaction level.
    #[arg(long, default_value_t = 0.5, value_parser = unit_interval)]
    pub satisfaction_level: f64,

    /// Last evaluation score.
    #[arg(long, default_value_t = 0.5, value_parser = unit_interval)]
    pub last_evaluation: f64,

    /// Number of projects assigned to.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(i64).range(1..=10))]
    pub number_project: i64,

    /// Average monthly hours worked.
    #[arg(long, default_value_t = 150, value_parser = clap::value_parser!(i64).range(50..=300))]
    pub average_monthly_hours: i64,

    /// Time spent at the company (years).
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(i64).range(1..=10))]
    pub time_spent_company: i64,

    /// Had a work accident (0 or 1).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=1))]
    pub work_accident: i64,

    /// Promotion in the last 5 years (0 or 1).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=1))]
    pub promotion_last_5years: i64,

    /// Department.
    #[arg(long, value_enum, default_value = "sales")]
    pub department: Department,

    /// Salary category.
    #[arg(long, value_enum, default_value = "low")]
    pub salary: SalaryTier,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SingleArgs {
    pub fn to_record(&self) -> EmployeeRecord {
        EmployeeRecord {
            satisfaction_level: self.satisfaction_level,
            last_evaluation: self.last_evaluation,
            number_project: self.number_project,
            average_monthly_hours: self.average_monthly_hours,
            time_spent_company: self.time_spent_company,
            work_accident: self.work_accident,
            promotion_last_5years: self.promotion_last_5years,
            departments: self.department,
            salary: self.salary,
        }
    }
}

#[derive(Args)]
pub struct BatchArgs {
    /// CSV file with one employee per row.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Where to write processed data (overrides config).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Rows to display after processing, 0 for all (overrides config).
    #[arg(long = "preview-rows", value_name = "N")]
    pub preview_rows: Option<usize>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevelArg::Error => "error",
            LogLevelArg::Warn => "warn",
            LogLevelArg::Info => "info",
            LogLevelArg::Debug => "debug",
            LogLevelArg::Trace => "trace",
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn unit_interval(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=1.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!("{parsed} is not in 0.0..=1.0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_defaults_match_form_defaults() {
        let cli = Cli::try_parse_from(["churn", "single"]).unwrap();
        let Command::Single(args) = cli.command else {
            panic!("expected single command");
        };
        assert_eq!(args.to_record(), EmployeeRecord::default());
    }

    #[test]
    fn test_single_rejects_out_of_range_values() {
        assert!(Cli::try_parse_from(["churn", "single", "--satisfaction-level", "1.5"]).is_err());
        assert!(Cli::try_parse_from(["churn", "single", "--number-project", "11"]).is_err());
        assert!(Cli::try_parse_from(["churn", "single", "--work-accident", "2"]).is_err());
        assert!(Cli::try_parse_from(["churn", "single", "--department", "finance"]).is_err());
    }

    #[test]
    fn test_single_accepts_category_names() {
        let cli = Cli::try_parse_from([
            "churn",
            "single",
            "--department",
            "RandD",
            "--salary",
            "high",
        ])
        .unwrap();
        let Command::Single(args) = cli.command else {
            panic!("expected single command");
        };
        assert_eq!(args.department, Department::RandD);
        assert_eq!(args.salary, SalaryTier::High);
    }

    #[test]
    fn test_batch_arguments() {
        let cli = Cli::try_parse_from([
            "churn",
            "--model",
            "models/churn.onnx",
            "batch",
            "employees.csv",
            "--preview-rows",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.model, Some(PathBuf::from("models/churn.onnx")));
        let Command::Batch(args) = cli.command else {
            panic!("expected batch command");
        };
        assert_eq!(args.input, PathBuf::from("employees.csv"));
        assert_eq!(args.preview_rows, Some(0));
        assert!(args.output.is_none());
    }
}
