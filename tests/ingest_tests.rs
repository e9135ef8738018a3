//! Integration tests for spectrum ingestion
//!
//! Tests cover:
//! - Each supported file layout and the layout it is read with
//! - Layout priority on files more than one layout accepts
//! - The row-count acceptance threshold
//! - Encoding detection on non-UTF-8 files
//! - Batch loading into a session with failures and duplicate names

mod common;

use common::layouts;
use common::{temp_dir, write_file};
use rusty_ftir::config::IngestConfig;
use rusty_ftir::data::loader::{
    attempt, load_bytes, load_file, load_files, Attempt, Rejection, DEFAULT_CANDIDATES,
};
use rusty_ftir::data::model::{DatasetName, Delimiter};
use rusty_ftir::data::name::extract_dataset_name;
use rusty_ftir::error::IngestError;
use rusty_ftir::state::Session;

fn assert_strictly_descending(wavenumbers: &[f64]) {
    for pair in wavenumbers.windows(2) {
        assert!(
            pair[0] > pair[1],
            "wavenumbers not strictly descending: {} then {}",
            pair[0],
            pair[1]
        );
    }
}

// ============================================
// Layout Tests
// ============================================

#[test]
fn test_instrument_layout_uses_first_candidate() {
    let parsed = load_bytes(layouts::instrument(15).as_bytes(), &IngestConfig::default())
        .expect("instrument export should load");

    assert_eq!(parsed.config, DEFAULT_CANDIDATES[0]);
    assert_eq!(parsed.series.len(), 15);
    let first = parsed.series.points()[0];
    assert_eq!(first.wavenumber, 4000.5);
    assert!((first.absorbance - 0.100).abs() < 1e-12);
}

#[test]
fn test_comma_layout_uses_second_candidate() {
    let parsed = load_bytes(
        layouts::comma_with_header(20).as_bytes(),
        &IngestConfig::default(),
    )
    .expect("comma file should load");

    assert_eq!(parsed.config, DEFAULT_CANDIDATES[1]);
    assert_eq!(parsed.series.len(), 20);
    // The header row is not numeric and never becomes a point
    assert_eq!(parsed.stats.missing, 1);
}

#[test]
fn test_tab_layout_uses_third_candidate() {
    let parsed = load_bytes(layouts::tabbed(20).as_bytes(), &IngestConfig::default())
        .expect("tab file should load");

    assert_eq!(parsed.config, DEFAULT_CANDIDATES[2]);
    assert_eq!(parsed.series.len(), 20);
}

#[test]
fn test_space_layout_resolves_auto_delimiter() {
    let parsed = load_bytes(layouts::spaced(20).as_bytes(), &IngestConfig::default())
        .expect("space separated file should load");

    // Fourth candidate, with the inferred delimiter recorded
    assert_eq!(parsed.config.delimiter, Delimiter::Whitespace);
    assert_eq!(parsed.config.decimal, DEFAULT_CANDIDATES[3].decimal);
    assert_eq!(parsed.config.skip_rows, 0);
    assert_eq!(parsed.series.len(), 20);
}

#[test]
fn test_pipe_layout_resolves_auto_delimiter() {
    let parsed = load_bytes(layouts::piped(20).as_bytes(), &IngestConfig::default())
        .expect("pipe separated file should load");

    assert_eq!(parsed.config.delimiter, Delimiter::Pipe);
    assert_eq!(parsed.config.skip_rows, DEFAULT_CANDIDATES[3].skip_rows);
    assert_eq!(parsed.series.len(), 20);
    assert_eq!(parsed.series.wavenumbers()[0], 4000.0);
}

#[test]
fn test_headerless_semicolon_layout_uses_last_candidate() {
    // With 12 rows, skipping two title lines leaves only 10 valid rows, so
    // the first candidate is rejected and the last one reads all 12.
    let parsed = load_bytes(
        layouts::semicolon_no_header(12).as_bytes(),
        &IngestConfig::default(),
    )
    .expect("headerless file should load");

    assert_eq!(parsed.config, DEFAULT_CANDIDATES[4]);
    assert_eq!(parsed.series.len(), 12);
}

#[test]
fn test_end_to_end_comma_file() {
    let mut text = String::from("X,Y\n");
    for i in 0..12 {
        text.push_str(&format!("{},{}\n", 3000 - i, 0.1 + i as f64 * 0.05));
    }

    let parsed = load_bytes(text.as_bytes(), &IngestConfig::default()).unwrap();

    assert_eq!(parsed.config, DEFAULT_CANDIDATES[1]);
    assert_eq!(parsed.series.len(), 12);
    let wavenumbers = parsed.series.wavenumbers();
    assert_eq!(wavenumbers.first(), Some(&3000.0));
    assert_eq!(wavenumbers.last(), Some(&2989.0));
    assert_strictly_descending(&wavenumbers);
}

#[test]
fn test_ascending_file_is_returned_descending() {
    let mut text = String::from("wavenumber,absorbance\n");
    for i in 0..30 {
        text.push_str(&format!("{},{}\n", 400 + 2 * i, i as f64 / 100.0));
    }

    let parsed = load_bytes(text.as_bytes(), &IngestConfig::default()).unwrap();

    assert_eq!(parsed.series.len(), 30);
    assert_strictly_descending(&parsed.series.wavenumbers());
    // Pairs travel together through the sort
    let first = parsed.series.points()[0];
    assert_eq!(first.wavenumber, 458.0);
    assert!((first.absorbance - 0.29).abs() < 1e-12);
}

// ============================================
// Priority and Threshold Tests
// ============================================

#[test]
fn test_first_matching_candidate_wins() {
    // Two comma title lines, then 11 ';'-style rows and 11 ','-style rows.
    // Both the first and the second candidate see 11 valid rows.
    let mut text = String::from("sample,PET\nwavenumber,absorbance\n");
    for i in 0..11 {
        text.push_str(&format!("{};0,5\n", 4000 - i));
    }
    for i in 0..11 {
        text.push_str(&format!("{}.0,0.5\n", 3000 - i));
    }

    assert!(matches!(
        attempt(&text, &DEFAULT_CANDIDATES[1], 10),
        Attempt::Accepted { .. }
    ));

    let parsed = load_bytes(text.as_bytes(), &IngestConfig::default()).unwrap();
    assert_eq!(parsed.config, DEFAULT_CANDIDATES[0]);
    assert_eq!(parsed.series.len(), 11);
    assert_eq!(parsed.series.wavenumbers()[0], 4000.0);
}

#[test]
fn test_ten_valid_rows_are_rejected() {
    let text = layouts::comma_with_header(10);

    match attempt(&text, &DEFAULT_CANDIDATES[1], 10) {
        Attempt::Rejected(Rejection::BelowThreshold { stats }) => assert_eq!(stats.parsed, 10),
        other => panic!("expected a threshold rejection, got {other:?}"),
    }

    let err = load_bytes(text.as_bytes(), &IngestConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::NoValidFormatFound { attempts: 5 }
    ));
}

#[test]
fn test_eleven_valid_rows_are_accepted() {
    let text = layouts::comma_with_header(11);
    let parsed = load_bytes(text.as_bytes(), &IngestConfig::default()).unwrap();
    assert_eq!(parsed.series.len(), 11);
}

#[test]
fn test_threshold_is_configurable() {
    let config = IngestConfig {
        validity_threshold: 2,
        ..IngestConfig::default()
    };
    let parsed = load_bytes(layouts::comma_with_header(3).as_bytes(), &config).unwrap();
    assert_eq!(parsed.series.len(), 3);
}

#[test]
fn test_empty_file_fails_every_candidate() {
    let err = load_bytes(b"", &IngestConfig::default()).unwrap_err();
    assert!(matches!(err, IngestError::NoValidFormatFound { .. }));
}

// ============================================
// Encoding Tests
// ============================================

#[test]
fn test_latin1_file_loads() {
    let text = layouts::instrument(15);
    let (bytes, _, unmappable) = encoding_rs::WINDOWS_1252.encode(&text);
    assert!(!unmappable);
    assert!(std::str::from_utf8(&bytes).is_err(), "fixture should not be UTF-8");

    let parsed = load_bytes(&bytes, &IngestConfig::default()).expect("latin-1 file should load");
    assert_eq!(parsed.config, DEFAULT_CANDIDATES[0]);
    assert_eq!(parsed.series.len(), 15);
}

#[test]
fn test_utf16_file_with_bom_loads() {
    let text = layouts::comma_with_header(15);
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));

    let parsed = load_bytes(&bytes, &IngestConfig::default()).expect("UTF-16 file should load");
    assert_eq!(parsed.encoding.name(), "UTF-16LE");
    assert_eq!(parsed.config, DEFAULT_CANDIDATES[1]);
    assert_eq!(parsed.series.len(), 15);
}

// ============================================
// File and Batch Tests
// ============================================

#[test]
fn test_load_file_names_dataset_from_path() {
    let dir = temp_dir();
    let path = write_file(dir.path(), "PET (2)_instrument.csv", layouts::instrument(20));

    let outcome = load_file(&path, &IngestConfig::default());

    assert_eq!(outcome.name, DatasetName::new("PET (2)"));
    assert_eq!(outcome.path, path);
    assert_eq!(outcome.result.unwrap().series.len(), 20);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = temp_dir();
    let outcome = load_file(&dir.path().join("absent.csv"), &IngestConfig::default());
    assert!(matches!(outcome.result, Err(IngestError::Io { .. })));
}

#[test]
fn test_batch_load_first_file_wins() {
    let dir = temp_dir();
    let paths = vec![
        write_file(dir.path(), "sample_a.csv", layouts::comma_with_header(20)),
        dir.path().join("missing.csv"),
        write_file(dir.path(), "sample_b.txt", layouts::tabbed(30)),
        write_file(dir.path(), "notes.txt", "just some notes\nnothing numeric\n"),
        write_file(dir.path(), "other.txt", layouts::spaced(25)),
    ];

    let outcomes = load_files(&paths, &IngestConfig::default());
    assert_eq!(outcomes.len(), paths.len());
    for (outcome, path) in outcomes.iter().zip(&paths) {
        assert_eq!(&outcome.path, path, "outcomes must keep input order");
    }

    let mut session = Session::default();
    let summary = session.ingest(outcomes);

    assert_eq!(
        summary.loaded,
        vec![DatasetName::new("sample"), DatasetName::new("other")]
    );
    assert_eq!(summary.duplicates, vec![DatasetName::new("sample")]);
    assert_eq!(summary.failed.len(), 2);
    assert_eq!(summary.to_string(), "2 loaded, 2 failed (1 duplicates skipped)");

    // The earlier file's data is the one kept
    let sample = session.get(&DatasetName::new("sample")).unwrap();
    assert_eq!(sample.path, paths[0]);
    assert_eq!(sample.series.len(), 20);
    assert_ne!(session.datasets()[0].color, session.datasets()[1].color);
}

// ============================================
// Name Extraction Tests
// ============================================

#[test]
fn test_names_from_typical_paths() {
    let cases = [
        ("/data/PET (2)_run3.csv", "PET (2)"),
        ("Amostra (12.5).txt", "Amostra (12.5)"),
        ("sample_run1(2).txt", "sample (2)"),
        ("Polyethylene_film.csv", "Polyethylene"),
        ("plain.txt", "plain"),
    ];
    for (path, expected) in cases {
        assert_eq!(
            extract_dataset_name(path).as_str(),
            expected,
            "name extracted from {path}"
        );
    }
}

#[test]
fn test_names_are_stable_when_reapplied() {
    for path in ["Amostra (2.5).txt", "PET (2)_run3.csv", "sample_run1(2).txt"] {
        let once = extract_dataset_name(path);
        let twice = extract_dataset_name(once.as_str());
        assert_eq!(twice, once, "name of {path} changed when re-extracted");
    }
}
