//! Error handling for ODF parsing, editing and serialization.
//!
//! Field-level coercion failures carry the header kind, field name and raw
//! value so malformed archive files can be located and corrected by hand.

use crate::header::HeaderKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(
        "Invalid value for {header} field {field}{}: '{value}' ({reason})",
        line_suffix(.line)
    )]
    Format {
        header: HeaderKind,
        field: String,
        value: String,
        reason: String,
        line: Option<usize>,
    },

    #[error("Malformed ODF structure: {reason}")]
    Structure { reason: String },

    #[error("Parameter and data columns are inconsistent: {reason}")]
    Consistency { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Input not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },
}

impl OdfError {
    pub fn format(
        header: HeaderKind,
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        OdfError::Format {
            header,
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            line: None,
        }
    }

    pub fn structure(reason: impl Into<String>) -> Self {
        OdfError::Structure {
            reason: reason.into(),
        }
    }

    pub fn consistency(reason: impl Into<String>) -> Self {
        OdfError::Consistency {
            reason: reason.into(),
        }
    }

    /// Attach a line number to a format error; other variants pass through.
    pub fn at_line(self, line_number: usize) -> Self {
        match self {
            OdfError::Format {
                header,
                field,
                value,
                reason,
                line: None,
            } => OdfError::Format {
                header,
                field,
                value,
                reason,
                line: Some(line_number),
            },
            other => other,
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" on line {line}"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, OdfError>;
