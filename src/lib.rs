//! ODF Toolbox Library
//!
//! Reads, edits and writes ODF (Ocean Data Format) files, the plain-text
//! archive format for oceanographic instrument data.
//!
//! This library provides tools for:
//! - Parsing every header block kind with field-level error reporting
//! - Rendering documents in the v2 (comma-terminated) or v3 layout
//! - Editing headers and data columns with every change written to history
//! - Recomputing record counts and per-column statistics
//! - Looking up GF3 parameter codes
//! - Batch conversion of directories of ODF files

pub mod change_log;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod format;
pub mod header;
pub mod lookup;
pub mod models;
pub mod processor;
pub mod records;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use change_log::ChangeLog;
pub use config::OdfConfig;
pub use document::OdfDocument;
pub use error::{OdfError, Result};
pub use header::{HeaderKind, HeaderRecord, ParameterHeader};
pub use lookup::{ParameterInfo, ParameterLookup, ReferenceTable, lookup_parameter};
pub use models::{FileVersion, ParameterType, ProcessingStats};
pub use processor::BatchProcessor;
pub use records::{DataRecords, DataValue, PrintFormat};
