//! Core data types shared across the ODF toolbox.
//!
//! Wire-format version selection, parameter type tags and batch
//! processing statistics.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// ODF wire-format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum FileVersion {
    /// Legacy layout: comma-terminated header lines, fixed-width data rows
    #[serde(rename = "v2", alias = "2", alias = "2.0")]
    #[value(name = "v2", alias = "2")]
    V2,
    /// Comma-free header lines, explicit version field, CSV data rows
    #[default]
    #[serde(rename = "v3", alias = "3", alias = "3.0")]
    #[value(name = "v3", alias = "3")]
    V3,
}

impl FileVersion {
    /// Map an ODF_SPECIFICATION_VERSION value to a wire version
    pub fn from_specification(version: f64) -> Self {
        if version >= 3.0 {
            FileVersion::V3
        } else {
            FileVersion::V2
        }
    }
}

impl fmt::Display for FileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileVersion::V2 => write!(f, "2.0"),
            FileVersion::V3 => write!(f, "3.0"),
        }
    }
}

/// Declared type of a parameter (data column)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParameterType {
    /// Single precision float
    #[default]
    Sing,
    /// Double precision float
    Doub,
    /// Integer
    Inte,
    /// Date/time in canonical SYTM form
    Sytm,
    /// Free text
    Char,
    /// Any other tag found in a file, kept verbatim
    Other(String),
}

impl ParameterType {
    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::Sing => "SING",
            ParameterType::Doub => "DOUB",
            ParameterType::Inte => "INTE",
            ParameterType::Sytm => "SYTM",
            ParameterType::Char => "CHAR",
            ParameterType::Other(tag) => tag,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ParameterType::Sing | ParameterType::Doub | ParameterType::Inte
        )
    }

    /// Type tags are matched case-insensitively; unknown tags are kept
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "SING" => ParameterType::Sing,
            "DOUB" => ParameterType::Doub,
            "INTE" => ParameterType::Inte,
            "SYTM" => ParameterType::Sytm,
            "CHAR" => ParameterType::Char,
            other => ParameterType::Other(other.to_string()),
        }
    }
}

impl FromStr for ParameterType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing statistics for a batch run
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_rows: usize,
    pub output_path: PathBuf,
    pub failures: Vec<(PathBuf, String)>,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    pub fn total_files(&self) -> usize {
        self.files_processed + self.files_failed
    }
}
