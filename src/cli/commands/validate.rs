//! Validate command: parse and update files without writing anything

use crate::cli::args::ValidateArgs;
use crate::config::OdfConfig;
use crate::processor::discovery::FileDiscovery;
use crate::processor::load_document;
use anyhow::{Result, bail};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

pub fn run_validate(args: &ValidateArgs, config: &OdfConfig) -> Result<()> {
    let files = collect_files(&args.inputs, config)?;
    if files.is_empty() {
        bail!("No files matching {} were found", config.file_pattern);
    }

    let mut failures = 0;
    for path in &files {
        match load_document(path) {
            Ok(document) => {
                debug!(
                    "{}: {} parameters, {} rows",
                    path.display(),
                    document.parameters().len(),
                    document.data().len()
                );
                println!("{} {}", "ok  ".bright_green(), path.display());
            }
            Err(err) => {
                failures += 1;
                println!("{} {}: {}", "FAIL".bright_red().bold(), path.display(), err);
            }
        }
    }

    println!(
        "\n{} {} checked, {} failed",
        "Validation:".bright_cyan(),
        files.len().to_string().bright_white(),
        failures.to_string().bright_white()
    );

    if failures > 0 {
        bail!("{} of {} files failed validation", failures, files.len());
    }
    Ok(())
}

fn collect_files(inputs: &[PathBuf], config: &OdfConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let discovery = FileDiscovery::new(input.clone(), &config.file_pattern, config.recursive)?;
        files.extend(discovery.discover()?);
    }
    Ok(files)
}
