//! Convert command: batch conversion into an output directory

use crate::cli::args::{Args, ConvertArgs};
use crate::config::OdfConfig;
use crate::processor::BatchProcessor;
use anyhow::{Context, Result, bail};
use tracing::info;

pub fn run_convert(args: &Args, convert_args: &ConvertArgs, config: OdfConfig) -> Result<()> {
    let config = apply_cli_overrides(config, convert_args);
    config.validate().context("Invalid conversion settings")?;

    info!(
        "Converting {} into {}",
        convert_args.input.display(),
        convert_args.output.display()
    );

    let mut processor =
        BatchProcessor::new(convert_args.input.clone(), convert_args.output.clone())
            .with_context(|| format!("Cannot convert {}", convert_args.input.display()))?
            .with_config(config);
    if !args.show_progress() {
        processor = processor.quiet();
    }

    let stats = processor.process().context("Conversion failed")?;
    info!(
        "Converted {} of {} files in {}ms",
        stats.files_processed,
        stats.total_files(),
        stats.processing_time_ms
    );

    if stats.files_failed > 0 {
        bail!(
            "{} of {} files could not be converted",
            stats.files_failed,
            stats.total_files()
        );
    }
    Ok(())
}

/// Command line flags win over configuration file values
pub fn apply_cli_overrides(mut config: OdfConfig, args: &ConvertArgs) -> OdfConfig {
    if let Some(version) = args.output_version {
        config = config.with_output_version(version);
    }
    if let Some(pattern) = &args.pattern {
        config = config.with_file_pattern(pattern.clone());
    }
    if let Some(analyst) = &args.analyst {
        config = config.with_analyst(analyst.clone());
    }
    if args.quality_flags {
        config = config.with_quality_flags();
    }
    if args.overwrite {
        config = config.with_overwrite();
    }
    if args.keep_names {
        config = config.keep_file_names();
    }
    if args.no_recursive {
        config = config.without_recursion();
    }
    config
}
