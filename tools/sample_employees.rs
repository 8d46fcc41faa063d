//! Sample Employee Generator
//!
//! Writes a random employee CSV for trying out batch prediction.

use anyhow::{Context, Result};
use clap::Parser;
use employee_churn::{Department, SalaryTier};
use rand::Rng;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "sample_employees", about = "Generate a random employee CSV")]
struct Args {
    /// Output file
    #[arg(long, default_value = "employees.csv")]
    output: PathBuf,

    /// Number of distinct employees
    #[arg(long, default_value_t = 100)]
    count: usize,

    /// Probability that a row is repeated verbatim
    #[arg(long, default_value_t = 0.05)]
    duplicate_rate: f64,

    /// Probability that an employee looks like a leaver
    #[arg(long, default_value_t = 0.25)]
    leaver_rate: f64,

    /// Write the department header as "Departments " like raw HR exports do
    #[arg(long)]
    raw_headers: bool,
}

/// Employee row generator
struct EmployeeGenerator {
    rng: rand::rngs::ThreadRng,
    employee_counter: u64,
}

impl EmployeeGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
            employee_counter: 0,
        }
    }

    /// Generate an engaged employee
    fn generate_stayer(&mut self) -> Vec<String> {
        self.employee_counter += 1;
        vec![
            format!("emp_{:06}", self.employee_counter),
            format!("{:.2}", self.rng.gen_range(0.5..1.0)),
            format!("{:.2}", self.rng.gen_range(0.45..1.0)),
            self.rng.gen_range(2..=5).to_string(),
            self.rng.gen_range(140..=230).to_string(),
            self.rng.gen_range(1..=4).to_string(),
            u8::from(self.rng.gen_bool(0.2)).to_string(),
            u8::from(self.rng.gen_bool(0.05)).to_string(),
            self.random_department().to_string(),
            self.random_salary(&[0.4, 0.45, 0.15]).to_string(),
        ]
    }

    /// Generate an employee with a typical leaver profile
    fn generate_leaver(&mut self) -> Vec<String> {
        self.employee_counter += 1;
        vec![
            format!("emp_{:06}", self.employee_counter),
            format!("{:.2}", self.rng.gen_range(0.09..0.45)), // Low satisfaction
            format!("{:.2}", self.rng.gen_range(0.45..1.0)),
            self.rng.gen_range(2..=7).to_string(),
            self.rng.gen_range(130..=310).to_string(), // Under- or overworked
            self.rng.gen_range(3..=6).to_string(),
            u8::from(self.rng.gen_bool(0.05)).to_string(),
            "0".to_string(), // Not promoted
            self.random_department().to_string(),
            self.random_salary(&[0.6, 0.35, 0.05]).to_string(),
        ]
    }

    fn random_department(&mut self) -> Department {
        Department::ALL[self.rng.gen_range(0..Department::ALL.len())]
    }

    fn random_salary(&mut self, weights: &[f64; 3]) -> SalaryTier {
        let roll: f64 = self.rng.gen();
        if roll < weights[0] {
            SalaryTier::Low
        } else if roll < weights[0] + weights[1] {
            SalaryTier::Medium
        } else {
            SalaryTier::High
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sample_employees=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(
        output = %args.output.display(),
        count = args.count,
        duplicate_rate = args.duplicate_rate,
        leaver_rate = args.leaver_rate,
        "Generating sample employees"
    );

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let department_header = if args.raw_headers {
        "Departments "
    } else {
        "departments"
    };
    writer.write_record([
        "emp_id",
        "satisfaction_level",
        "last_evaluation",
        "number_project",
        "average_montly_hours",
        "time_spend_company",
        "Work_accident",
        "promotion_last_5years",
        department_header,
        "salary",
    ])?;

    let mut generator = EmployeeGenerator::new();
    let mut rng = rand::thread_rng();
    let mut leavers = 0;
    let mut duplicates = 0;

    for _ in 0..args.count {
        let row = if rng.gen_bool(args.leaver_rate.clamp(0.0, 1.0)) {
            leavers += 1;
            generator.generate_leaver()
        } else {
            generator.generate_stayer()
        };
        writer.write_record(&row)?;

        if rng.gen_bool(args.duplicate_rate.clamp(0.0, 1.0)) {
            duplicates += 1;
            writer.write_record(&row)?;
        }
    }
    writer.flush()?;

    info!(
        "Completed! Wrote {} employees ({} leaver profiles, {} duplicate rows) to {}",
        args.count,
        leavers,
        duplicates,
        args.output.display()
    );

    Ok(())
}
