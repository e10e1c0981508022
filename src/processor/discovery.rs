//! File discovery for batch runs
//!
//! Walks an input directory and keeps the files whose names match the
//! configured glob, compared case-insensitively since archive files carry
//! both `.ODF` and `.odf` extensions.

use crate::error::{OdfError, Result};
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

#[derive(Debug)]
pub struct FileDiscovery {
    root: PathBuf,
    pattern: Pattern,
    recursive: bool,
}

impl FileDiscovery {
    pub fn new(root: PathBuf, pattern: &str, recursive: bool) -> Result<Self> {
        let pattern = Pattern::new(pattern).map_err(|e| OdfError::Configuration {
            message: format!("invalid file pattern '{}': {}", pattern, e),
        })?;
        Ok(Self {
            root,
            pattern,
            recursive,
        })
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.pattern.matches_with(name, MATCH_OPTIONS))
    }

    /// Matching files in path order. A root that is itself a file is
    /// returned as-is, whatever its name.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(OdfError::InputNotFound {
                path: self.root.clone(),
            });
        }

        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(max_depth) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), err);
                    continue;
                }
            };

            if entry.file_type().is_file() && self.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!(
            "Found {} files matching {} under {}",
            files.len(),
            self.pattern,
            self.root.display()
        );
        Ok(files)
    }
}
