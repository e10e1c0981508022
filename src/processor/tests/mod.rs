//! Batch processor tests
//!
//! Runs the processor over temporary directories seeded with the sample
//! files from `tests/data`.

pub mod error_handling;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(super) const CTD_V2: &str = include_str!("../../../tests/data/CTD_BCD2023666_001_1_DN.ODF");
pub(super) const MADCP_V3: &str =
    include_str!("../../../tests/data/MADCP_HUD2022001_1844_3072_3600.ODF");

/// `input/` holding both samples (the MADCP one in a sub-directory) and
/// an empty `output/` path
pub(super) fn create_input_tree(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let input = temp_dir.path().join("input");
    let nested = input.join("moorings");
    fs::create_dir_all(&nested).unwrap();

    fs::write(input.join("CTD_BCD2023666_001_1_DN.ODF"), CTD_V2).unwrap();
    fs::write(nested.join("madcp_hud2022001_1844_3072_3600.odf"), MADCP_V3).unwrap();
    fs::write(input.join("notes.txt"), "not an ODF file").unwrap();

    (input, temp_dir.path().join("output"))
}

pub(super) fn read_output(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
