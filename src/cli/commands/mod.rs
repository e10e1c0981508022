//! Command implementations for the ODF toolbox CLI
//!
//! Each subcommand lives in its own module. Library errors are turned into
//! `anyhow` errors here, with context naming the file or path involved.

pub mod convert;
pub mod inspect;
pub mod lookup;
pub mod shared;
pub mod validate;

use crate::cli::args::{Args, Commands};
use anyhow::Result;
use tracing::debug;

/// Set up logging and configuration, then dispatch to the subcommand
pub fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    let config = shared::load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    match &args.command {
        Commands::Convert(convert_args) => convert::run_convert(&args, convert_args, config),
        Commands::Validate(validate_args) => validate::run_validate(validate_args, &config),
        Commands::Inspect(inspect_args) => inspect::run_inspect(inspect_args, &config),
        Commands::Lookup(lookup_args) => lookup::run_lookup(lookup_args, &config),
    }
}
