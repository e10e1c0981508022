//! Lookup command: describe parameter codes from the reference table

use super::shared::reference_table;
use crate::cli::args::LookupArgs;
use crate::config::OdfConfig;
use crate::lookup::{ParameterInfo, ParameterLookup};
use anyhow::Result;
use colored::*;

pub fn run_lookup(args: &LookupArgs, config: &OdfConfig) -> Result<()> {
    let table = reference_table(args.table.as_deref(), config)?;

    if args.codes.is_empty() {
        for info in table.entries() {
            print_entry(&info.code, info);
        }
        return Ok(());
    }

    for code in &args.codes {
        let info = table.lookup_or_unknown(code);
        print_entry(code, &info);
    }
    Ok(())
}

fn print_entry(code: &str, info: &ParameterInfo) {
    if info.is_unknown() {
        println!("{:<10} {}", code.bright_yellow(), "unknown code".bright_black());
        return;
    }

    println!(
        "{:<10} {:<40} {:<16} {}.{}",
        code.bright_white().bold(),
        info.description,
        info.units,
        info.print_field_width,
        info.print_decimal_places
    );
}
