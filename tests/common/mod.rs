//! Shared fixtures for the integration tests
//!
//! Spectra are built in memory and written to a temporary directory so every
//! test controls the exact bytes the loader sees.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create a fresh temporary directory, removed when the guard is dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to `dir/name` and return the full path.
pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("Failed to write fixture '{}': {}", path.display(), e));
    path
}

pub fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Two well separated unit-width bumps on a flat floor.
pub fn two_bumps(n: usize, first: f64, second: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            gaussian(x, first, 8.0, 1.0) + gaussian(x, second, 8.0, 1.0)
        })
        .collect()
}

/// Text files in each of the supported layouts
pub mod layouts {
    use std::fmt::Write as _;

    /// Two title lines, ';' columns and ',' decimals.
    pub fn instrument(rows: usize) -> String {
        let mut text = String::from("Spectrum export\nNúmero de onda;Absorbância\n");
        for i in 0..rows {
            let _ = writeln!(text, "{},5;0,{}", 4000 - i, 100 + i);
        }
        text
    }

    /// One header line, ',' columns and '.' decimals.
    pub fn comma_with_header(rows: usize) -> String {
        let mut text = String::from("wavenumber,absorbance\n");
        for i in 0..rows {
            let _ = writeln!(text, "{}.0,0.{}", 4000 - i, 100 + i);
        }
        text
    }

    pub fn tabbed(rows: usize) -> String {
        let mut text = String::new();
        for i in 0..rows {
            let _ = writeln!(text, "{}.0\t0.{}", 4000 - i, 100 + i);
        }
        text
    }

    pub fn spaced(rows: usize) -> String {
        let mut text = String::new();
        for i in 0..rows {
            let _ = writeln!(text, "{}.0   0.{}", 4000 - i, 100 + i);
        }
        text
    }

    pub fn piped(rows: usize) -> String {
        let mut text = String::new();
        for i in 0..rows {
            let _ = writeln!(text, "{}.0|0.{}", 4000 - i, 100 + i);
        }
        text
    }

    /// ';' columns and ',' decimals without any title line.
    pub fn semicolon_no_header(rows: usize) -> String {
        let mut text = String::new();
        for i in 0..rows {
            let _ = writeln!(text, "{},5;0,{}", 4000 - i, 100 + i);
        }
        text
    }
}
