use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ParseConfig – one candidate file layout
// ---------------------------------------------------------------------------

/// Column separator tried by the format sniffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Semicolon,
    Comma,
    Tab,
    Pipe,
    /// Inferred per file from a sample of its rows.
    Auto,
    /// Runs of spaces and/or tabs.
    Whitespace,
}

impl Delimiter {
    /// The single byte used by the CSV reader, `None` for `Auto`/`Whitespace`.
    pub fn as_byte(self) -> Option<u8> {
        match self {
            Delimiter::Semicolon => Some(b';'),
            Delimiter::Comma => Some(b','),
            Delimiter::Tab => Some(b'\t'),
            Delimiter::Pipe => Some(b'|'),
            Delimiter::Auto | Delimiter::Whitespace => None,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Semicolon => write!(f, "';'"),
            Delimiter::Comma => write!(f, "','"),
            Delimiter::Tab => write!(f, "tab"),
            Delimiter::Pipe => write!(f, "'|'"),
            Delimiter::Auto => write!(f, "auto"),
            Delimiter::Whitespace => write!(f, "whitespace"),
        }
    }
}

/// Character used as the decimal separator inside numeric cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalMarker {
    Comma,
    Dot,
}

impl fmt::Display for DecimalMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalMarker::Comma => write!(f, "','"),
            DecimalMarker::Dot => write!(f, "'.'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParseConfig {
    pub delimiter: Delimiter,
    pub decimal: DecimalMarker,
    pub skip_rows: usize,
}

impl ParseConfig {
    pub const fn new(delimiter: Delimiter, decimal: DecimalMarker, skip_rows: usize) -> Self {
        Self {
            delimiter,
            decimal,
            skip_rows,
        }
    }
}

impl fmt::Display for ParseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sep={} decimal={} skip={}",
            self.delimiter, self.decimal, self.skip_rows
        )
    }
}

// ---------------------------------------------------------------------------
// DatasetName – session-wide key of a loaded file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DatasetName(String);

impl DatasetName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DatasetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Series – validated (wavenumber, absorbance) pairs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumPoint {
    pub wavenumber: f64,
    pub absorbance: f64,
}

/// A validated spectrum: every value finite, sorted by wavenumber from high
/// to low.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    points: Vec<SpectrumPoint>,
}

impl Series {
    /// Build a series, dropping non-finite pairs and sorting by descending
    /// wavenumber. The sort is stable so equal wavenumbers keep file order.
    pub fn from_points(points: impl IntoIterator<Item = SpectrumPoint>) -> Self {
        let mut points: Vec<SpectrumPoint> = points
            .into_iter()
            .filter(|p| p.wavenumber.is_finite() && p.absorbance.is_finite())
            .collect();
        points.sort_by(|a, b| b.wavenumber.total_cmp(&a.wavenumber));
        Self { points }
    }

    pub fn points(&self) -> &[SpectrumPoint] {
        &self.points
    }

    pub fn wavenumbers(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.wavenumber).collect()
    }

    pub fn absorbances(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.absorbance).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ProcessedSeries – baseline-corrected and smoothed copy of a Series
// ---------------------------------------------------------------------------

/// Shares the wavenumber axis of its source; `intensity[i]` pairs with
/// `wavenumber[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSeries {
    pub wavenumber: Vec<f64>,
    pub intensity: Vec<f64>,
}

impl ProcessedSeries {
    /// Resolve a peak/valley index to `(wavenumber, intensity)`.
    pub fn point(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.wavenumber.get(index)?, *self.intensity.get(index)?))
    }

    pub fn len(&self) -> usize {
        self.intensity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intensity.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Features – detected peak and valley positions
// ---------------------------------------------------------------------------

/// Indices into a [`ProcessedSeries`], ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Features {
    pub peaks: Vec<usize>,
    pub valleys: Vec<usize>,
}
