//! Inspect command: print a summary of one document

use super::shared::reference_table;
use crate::cli::args::InspectArgs;
use crate::config::OdfConfig;
use crate::document::OdfDocument;
use crate::format::{format_fixed, format_repr};
use crate::header::{Extremum, ParameterHeader};
use crate::lookup::{ParameterLookup, ReferenceTable};
use crate::processor::load_document;
use anyhow::{Context, Result};
use colored::*;

pub fn run_inspect(args: &InspectArgs, config: &OdfConfig) -> Result<()> {
    let document = load_document(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    if let Some(version) = args.render {
        print!("{}", document.render(version));
        return Ok(());
    }

    let table = reference_table(None, config)?;
    print_summary(&document, &table);
    Ok(())
}

fn print_summary(document: &OdfDocument, table: &ReferenceTable) {
    println!(
        "{} {}",
        "File specification:".bright_cyan(),
        document.file_specification.bright_white().bold()
    );
    println!("  {} {}", "Source version:".bright_cyan(), document.source_version);
    println!(
        "  {} {} ({})",
        "Cruise:".bright_cyan(),
        document.cruise.cruise_number,
        document.cruise.organization
    );
    println!(
        "  {} {} {} {}/{}",
        "Event:".bright_cyan(),
        document.event.data_type,
        document.event.event_number,
        document.event.event_qualifier1,
        document.event.event_qualifier2
    );
    println!(
        "  {} {} to {}",
        "Time span:".bright_cyan(),
        document.event.start_date_time,
        document.event.end_date_time
    );
    println!(
        "  {} {}, {} calibrations, {} history blocks",
        "Records:".bright_cyan(),
        document.data().len(),
        document.record.num_calibration,
        document.histories.len()
    );

    println!("\n{}", "Parameters".bright_green().bold());
    for parameter in document.parameters() {
        let reference = table.lookup_or_unknown(&parameter.code);
        let description = if reference.is_unknown() {
            "not in reference table".bright_black().to_string()
        } else {
            reference.description
        };
        println!(
            "  {:<10} {:<6} {:<28} valid {:>6}  null {:>6}  range {} .. {}",
            parameter.code.bright_white(),
            parameter.param_type.as_str(),
            parameter.units,
            parameter.number_valid,
            parameter.number_null,
            extremum_text(parameter, &parameter.minimum_value),
            extremum_text(parameter, &parameter.maximum_value),
        );
        println!("  {:<10} {}", "", description);
    }
}

fn extremum_text(parameter: &ParameterHeader, value: &Extremum) -> String {
    match value {
        Extremum::Null => "-".to_string(),
        Extremum::Number(number) => match parameter.decimals() {
            Some(decimals) => format_fixed(*number, decimals),
            None => format_repr(*number),
        },
        Extremum::Date(date) => date.clone(),
    }
}
