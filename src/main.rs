//! Employee Churn Predictor - Main Entry Point
//!
//! Loads the exported churn pipeline and predicts either one employee from
//! command-line values or a whole CSV file.

use anyhow::{Context, Result};
use clap::Parser;
use employee_churn::{
    config::AppConfig,
    display,
    logging::init_logging,
    models::{ModelLoader, OnnxPipeline},
    predict_single, BatchPredictor,
};
use std::io::{self, IsTerminal};
use tracing::{error, info};

mod cli;

use crate::cli::{BatchArgs, Cli, Command, LogFormatArg, SingleArgs};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    };

    let with_ansi = !cli.no_color && io::stderr().is_terminal();
    if let Err(e) = init_logging(&config.logging, with_ansi) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }

    info!(model = %config.model.path.display(), "Starting Employee Churn Predictor");

    let exit_code = match &cli.command {
        Command::Single(args) => match run_single(&config, args) {
            Ok(()) => 0,
            Err(e) => {
                error!(error = %format!("{e:#}"), "Single prediction failed");
                eprintln!("error: {e:#}");
                1
            }
        },
        Command::Batch(args) => match run_batch(&config, args) {
            Ok(()) => 0,
            Err(e) => {
                error!(error = %format!("{e:#}"), "Batch prediction failed");
                eprintln!("Error processing file: {e:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Load configuration and apply command-line overrides
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    if let Some(model) = &cli.model {
        config.model.path = model.clone();
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level.as_str().to_string();
    }
    if let Some(format) = cli.log_format {
        config.logging.format = match format {
            LogFormatArg::Pretty => employee_churn::config::LogFormat::Pretty,
            LogFormatArg::Compact => employee_churn::config::LogFormat::Compact,
            LogFormatArg::Json => employee_churn::config::LogFormat::Json,
        };
    }
    if let Command::Batch(args) = &cli.command {
        if let Some(output) = &args.output {
            config.batch.output_path = output.clone();
        }
        if let Some(rows) = args.preview_rows {
            config.batch.preview_rows = rows;
        }
    }

    Ok(config)
}

/// Load the ONNX pipeline fresh for this request
fn load_pipeline(config: &AppConfig) -> employee_churn::Result<OnnxPipeline> {
    ModelLoader::with_threads(config.model.intra_threads)?.load(&config.model.path)
}

fn run_single(config: &AppConfig, args: &SingleArgs) -> Result<()> {
    let record = args.to_record();
    let prediction = predict_single(record, config.model.positive_label, || {
        load_pipeline(config)
    })
    .context("Prediction failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        println!("{}", display::single_message(&prediction));
    }
    Ok(())
}

fn run_batch(config: &AppConfig, args: &BatchArgs) -> Result<()> {
    let predictor = BatchPredictor::new(&config.batch, config.model.positive_label);
    let outcome = predictor.run(&args.input, &config.batch.output_path, || {
        load_pipeline(config)
    })?;

    println!("Processed Data:");
    println!(
        "{}",
        display::dataset_table(
            &outcome.dataset,
            &config.batch.label_column,
            config.batch.preview_rows
        )
    );
    let hidden = display::hidden_rows(&outcome.dataset, config.batch.preview_rows);
    if hidden > 0 {
        println!("... {hidden} more rows");
    }
    println!("{}", display::summary_table(&outcome.metrics));
    outcome.metrics.log_summary();

    println!(
        "Processed data saved as `{}`",
        outcome.output_path.display()
    );
    Ok(())
}
