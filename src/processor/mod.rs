//! Batch conversion of ODF files.
//!
//! Discovers files under an input path, then reads, edits, updates and
//! re-renders each one into an output directory. Every document gets its
//! own change log; a failing file is recorded and the batch moves on.

pub mod discovery;
pub mod encoding;

#[cfg(test)]
pub mod tests;

use self::discovery::FileDiscovery;
use self::encoding::{read_odf_file, write_odf_file};

use crate::change_log::ChangeLog;
use crate::config::OdfConfig;
use crate::document::OdfDocument;
use crate::error::{OdfError, Result};
use crate::models::ProcessingStats;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// Read and update a document without writing anything
pub fn load_document(path: &Path) -> Result<OdfDocument> {
    let text = read_odf_file(path)?;
    let lines: Vec<&str> = text.lines().collect();
    let mut document = OdfDocument::read(&lines)?;
    document.update()?;
    Ok(document)
}

/// Where a converted file went
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub output: PathBuf,
    pub rows: usize,
    pub changes: usize,
}

#[derive(Debug)]
pub struct BatchProcessor {
    input_path: PathBuf,
    output_path: PathBuf,
    config: OdfConfig,
    quiet: bool,
}

impl BatchProcessor {
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Result<Self> {
        if !input_path.exists() {
            return Err(OdfError::InputNotFound { path: input_path });
        }

        Ok(Self {
            input_path,
            output_path,
            config: OdfConfig::default(),
            quiet: false,
        })
    }

    pub fn with_config(mut self, config: OdfConfig) -> Self {
        self.config = config;
        self
    }

    /// Suppress the progress bar and console summary
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn config(&self) -> &OdfConfig {
        &self.config
    }

    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        FileDiscovery::new(
            self.input_path.clone(),
            &self.config.file_pattern,
            self.config.recursive,
        )?
        .discover()
    }

    /// Convert every discovered file
    pub fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        self.config.validate()?;

        if !self.quiet {
            println!("{}", "Starting ODF conversion".bright_green().bold());
            println!("  {} {}", "Input:".bright_cyan(), self.input_path.display());
            println!("  {} {}", "Output:".bright_cyan(), self.output_path.display());
            println!(
                "  {} {}",
                "Version:".bright_cyan(),
                self.config.output_version
            );
        }

        let files = self.discover()?;
        if !self.quiet {
            println!(
                "  {} {} files",
                "Found".bright_green(),
                files.len().to_string().bright_white().bold()
            );
        }

        let mut stats = ProcessingStats {
            output_path: self.output_path.clone(),
            ..Default::default()
        };

        if files.is_empty() {
            stats.processing_time_ms = start_time.elapsed().as_millis();
            return Ok(stats);
        }

        let pb = self.progress_bar(files.len());
        for path in &files {
            pb.set_message(
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );

            match self.process_file(path) {
                Ok(outcome) => {
                    debug!(
                        "Converted {} -> {} ({} rows, {} changes)",
                        path.display(),
                        outcome.output.display(),
                        outcome.rows,
                        outcome.changes
                    );
                    stats.files_processed += 1;
                    stats.total_rows += outcome.rows;
                }
                Err(err) => {
                    let failure = OdfError::ProcessingFailed {
                        path: path.clone(),
                        reason: err.to_string(),
                    };
                    warn!("{}", failure);
                    stats.files_failed += 1;
                    stats.failures.push((path.clone(), err.to_string()));
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        stats.processing_time_ms = start_time.elapsed().as_millis();
        if !self.quiet {
            print_summary(&stats);
        }
        Ok(stats)
    }

    /// Convert one file into the output directory
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let text = read_odf_file(path)?;
        let lines: Vec<&str> = text.lines().collect();
        let mut document = OdfDocument::read(&lines)?;

        let mut log = ChangeLog::new();
        if let Some(analyst) = &self.config.analyst {
            document
                .add_history()
                .add_process(format!("Processed by {analyst} with odf-toolbox"));
        }
        if self.config.add_quality_flags {
            document.add_quality_flags(&mut log)?;
            let quality = document.quality.get_or_insert_with(Default::default);
            quality.add_quality_codes();
            quality.add_qcff_info();
        }
        let changes = log.len();
        document.flush_change_log(&mut log);
        document.update()?;

        let file_name = if self.config.rename_from_file_spec {
            document.refresh_file_specification();
            document.to_file_name()
        } else {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| document.to_file_name())
        };

        let output = self.output_path.join(file_name);
        if output.exists() && !self.config.overwrite {
            return Err(OdfError::ProcessingFailed {
                path: output,
                reason: "output file already exists".to_string(),
            });
        }

        std::fs::create_dir_all(&self.output_path)?;
        write_odf_file(&output, &document.render(self.config.output_version))?;

        Ok(FileOutcome {
            output,
            rows: document.data().len(),
            changes,
        })
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
        for (path, reason) in &stats.failures {
            println!("    {} {}", path.display().to_string().red(), reason);
        }
    }
    println!(
        "  {} {}",
        "Total rows:".bright_cyan(),
        stats.total_rows.to_string().bright_white().bold()
    );
}
