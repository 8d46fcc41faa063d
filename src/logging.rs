//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs always go to stderr so stdout only carries prediction output.
//! `RUST_LOG` overrides the configured level.

use crate::config::{LogFormat, LoggingConfig};
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Targets raised to the configured level: the library and the `churn` binary.
const CRATE_TARGETS: [&str; 2] = ["employee_churn", "churn"];

/// Build the filter: `RUST_LOG` when set, otherwise the configured level for
/// this crate and `warn` for dependencies.
pub fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = level.trim().to_lowercase();
    let mut filter = EnvFilter::new("warn");
    for target in CRATE_TARGETS {
        filter = filter.add_directive(
            format!("{target}={level}")
                .parse()
                .with_context(|| format!("Invalid log level '{level}'"))?,
        );
    }
    Ok(filter)
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LoggingConfig, with_ansi: bool) -> Result<()> {
    let filter = build_env_filter(&config.level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().with_ansi(with_ansi).try_init(),
        LogFormat::Pretty => builder.pretty().with_ansi(with_ansi).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
