//! Logging and configuration setup shared by all commands

use crate::cli::args::Args;
use crate::config::OdfConfig;
use crate::lookup::ReferenceTable;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Structured logging to stderr; `RUST_LOG` takes precedence over flags
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("odf_toolbox={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// `--config` file, else the per-user file when present, else defaults
pub fn load_configuration(args: &Args) -> Result<OdfConfig> {
    match &args.config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            OdfConfig::from_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))
        }
        None => OdfConfig::load_default().context("Failed to load user configuration"),
    }
}

/// Reference table named on the command line or in the configuration,
/// else the built-in one
pub fn reference_table(override_path: Option<&Path>, config: &OdfConfig) -> Result<ReferenceTable> {
    match override_path.or(config.parameter_table.as_deref()) {
        Some(path) => ReferenceTable::from_path(path)
            .with_context(|| format!("Failed to read parameter table {}", path.display())),
        None => Ok(ReferenceTable::embedded().clone()),
    }
}
