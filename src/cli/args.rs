//! Command-line argument definitions for the ODF toolbox
//!
//! Global verbosity and configuration flags apply to every subcommand.
//! Flags given here override values loaded from the configuration file.

use crate::models::FileVersion;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Read, check and convert ODF oceanographic data files
#[derive(Debug, Clone, Parser)]
#[command(
    name = "odf-toolbox",
    version,
    about = "Read, check and convert ODF oceanographic data files",
    long_about = "Reads ODF (Ocean Data Format) files in either the comma-terminated v2 layout \
                  or the v3 layout, recomputes record counts and column statistics, records \
                  every edit in the file's history and writes the result in the requested \
                  version."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Configuration file; the per-user file is used when omitted
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert ODF files into an output directory
    Convert(ConvertArgs),
    /// Check that ODF files parse and are internally consistent
    Validate(ValidateArgs),
    /// Summarise the headers and columns of one ODF file
    Inspect(InspectArgs),
    /// Look up GF3 parameter codes in the reference table
    Lookup(LookupArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// ODF file or directory of ODF files
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory receiving the converted files
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: PathBuf,

    /// Wire version to write
    #[arg(long = "to", value_enum, value_name = "VERSION")]
    pub output_version: Option<FileVersion>,

    /// Glob matched against file names during discovery
    #[arg(long = "pattern", value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Add a quality flag column for every eligible parameter
    #[arg(long = "quality-flags")]
    pub quality_flags: bool,

    /// Analyst recorded in a new history entry
    #[arg(long = "analyst", value_name = "NAME")]
    pub analyst: Option<String>,

    /// Replace existing output files
    #[arg(long = "overwrite")]
    pub overwrite: bool,

    /// Keep input file names instead of the generated file specification
    #[arg(long = "keep-names")]
    pub keep_names: bool,

    /// Only convert files directly inside INPUT
    #[arg(long = "no-recursive")]
    pub no_recursive: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// ODF files or directories to check
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// ODF file to summarise
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the updated document in this version instead of a summary
    #[arg(long = "render", value_enum, value_name = "VERSION")]
    pub render: Option<FileVersion>,
}

#[derive(Debug, Clone, Parser)]
pub struct LookupArgs {
    /// Parameter codes such as TEMP or PSAL_01; all entries when omitted
    #[arg(value_name = "CODE")]
    pub codes: Vec<String>,

    /// Reference table to use instead of the built-in one
    #[arg(long = "table", value_name = "CSV")]
    pub table: Option<PathBuf>,
}

impl Args {
    /// Log level derived from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
