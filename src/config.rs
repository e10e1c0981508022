//! Configuration for batch conversion runs.
//!
//! Settings come from defaults, an optional TOML file and command line
//! overrides applied through the `with_*` builders.

use crate::constants::DEFAULT_FILE_PATTERN;
use crate::error::{OdfError, Result};
use crate::models::FileVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the per-user configuration directory
pub const CONFIG_DIR_NAME: &str = "odf-toolbox";

/// File name looked up inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdfConfig {
    /// Wire version written by conversions
    pub output_version: FileVersion,

    /// Glob applied to file names during discovery
    pub file_pattern: String,

    /// Descend into subdirectories
    pub recursive: bool,

    /// Recorded in a history entry of every converted file
    pub analyst: Option<String>,

    /// Add a quality flag column for every eligible parameter
    pub add_quality_flags: bool,

    /// Name outputs after the regenerated file specification
    pub rename_from_file_spec: bool,

    /// Replace files already present in the output directory
    pub overwrite: bool,

    /// Replacement parameter reference table (CSV)
    pub parameter_table: Option<PathBuf>,
}

impl Default for OdfConfig {
    fn default() -> Self {
        Self {
            output_version: FileVersion::V3,
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            recursive: true,
            analyst: None,
            add_quality_flags: false,
            rename_from_file_spec: true,
            overwrite: false,
            parameter_table: None,
        }
    }
}

impl OdfConfig {
    /// Load a TOML configuration file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: OdfConfig = toml::from_str(&text).map_err(|e| OdfError::Configuration {
            message: format!("{}: {}", path.display(), e),
        })?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Per-user configuration path, e.g. `~/.config/odf-toolbox/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Per-user configuration if one exists, defaults otherwise
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_pattern.trim().is_empty() {
            return Err(OdfError::Configuration {
                message: "file_pattern must not be empty".to_string(),
            });
        }

        glob::Pattern::new(&self.file_pattern).map_err(|e| OdfError::Configuration {
            message: format!("invalid file_pattern '{}': {}", self.file_pattern, e),
        })?;

        if self.analyst.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err(OdfError::Configuration {
                message: "analyst must not be blank".to_string(),
            });
        }

        Ok(())
    }

    pub fn with_output_version(mut self, version: FileVersion) -> Self {
        self.output_version = version;
        self
    }

    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    /// Only process files directly inside the input directory
    pub fn without_recursion(mut self) -> Self {
        self.recursive = false;
        self
    }

    pub fn with_analyst(mut self, analyst: impl Into<String>) -> Self {
        self.analyst = Some(analyst.into());
        self
    }

    pub fn with_quality_flags(mut self) -> Self {
        self.add_quality_flags = true;
        self
    }

    /// Keep each input's file name instead of the generated specification
    pub fn keep_file_names(mut self) -> Self {
        self.rename_from_file_spec = false;
        self
    }

    pub fn with_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    pub fn with_parameter_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.parameter_table = Some(path.into());
        self
    }
}
