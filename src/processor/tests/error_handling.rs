//! Failure handling tests

use super::{CTD_V2, create_input_tree};
use crate::config::OdfConfig;
use crate::error::OdfError;
use crate::processor::BatchProcessor;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_nonexistent_input_path() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nonexistent");

    let result = BatchProcessor::new(missing.clone(), temp_dir.path().join("out"));

    match result.unwrap_err() {
        OdfError::InputNotFound { path } => assert_eq!(path, missing),
        other => panic!("Expected InputNotFound error, got {other:?}"),
    }
}

#[test]
fn test_bad_file_does_not_stop_batch() {
    let temp_dir = TempDir::new().unwrap();
    let (input, output) = create_input_tree(&temp_dir);

    let broken = CTD_V2.replace("-- DATA --", "");
    fs::write(input.join("BROKEN.ODF"), broken).unwrap();

    let stats = BatchProcessor::new(input.clone(), output)
        .unwrap()
        .quiet()
        .process()
        .unwrap();

    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.failures[0].0, input.join("BROKEN.ODF"));
    assert!(stats.failures[0].1.contains("-- DATA --"));
}

#[test]
fn test_existing_output_requires_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let (input, output) = create_input_tree(&temp_dir);

    let processor = BatchProcessor::new(input.clone(), output.clone())
        .unwrap()
        .quiet();
    assert_eq!(processor.process().unwrap().files_processed, 2);

    let rerun = processor.process().unwrap();
    assert_eq!(rerun.files_processed, 0);
    assert_eq!(rerun.files_failed, 2);
    assert!(rerun.failures[0].1.contains("already exists"));

    let overwrite = BatchProcessor::new(input, output)
        .unwrap()
        .with_config(OdfConfig::default().with_overwrite())
        .quiet();
    assert_eq!(overwrite.process().unwrap().files_processed, 2);
}

#[test]
fn test_invalid_config_rejected_before_processing() {
    let temp_dir = TempDir::new().unwrap();
    let (input, output) = create_input_tree(&temp_dir);

    let result = BatchProcessor::new(input, output.clone())
        .unwrap()
        .with_config(OdfConfig::default().with_file_pattern(""))
        .quiet()
        .process();

    assert!(matches!(result, Err(OdfError::Configuration { .. })));
    assert!(!output.exists());
}
