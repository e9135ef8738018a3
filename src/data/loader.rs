use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::encoding::{decode, detect_encoding, EncodingGuess, EncodingSource};
use super::model::{DatasetName, DecimalMarker, Delimiter, ParseConfig, Series, SpectrumPoint};
use super::name::extract_dataset_name;
use crate::config::IngestConfig;
use crate::error::IngestError;

/// Layouts tried for every file, most common first.
pub const DEFAULT_CANDIDATES: [ParseConfig; 5] = [
    // Instrument export: two title lines, ';' columns, ',' decimals
    ParseConfig::new(Delimiter::Semicolon, DecimalMarker::Comma, 2),
    ParseConfig::new(Delimiter::Comma, DecimalMarker::Dot, 0),
    ParseConfig::new(Delimiter::Tab, DecimalMarker::Dot, 0),
    ParseConfig::new(Delimiter::Auto, DecimalMarker::Dot, 0),
    ParseConfig::new(Delimiter::Semicolon, DecimalMarker::Comma, 0),
];

/// Delimiters considered when a layout asks for `Delimiter::Auto`, in order
/// of preference on ties.
const AUTO_DELIMITERS: [Delimiter; 5] = [
    Delimiter::Comma,
    Delimiter::Tab,
    Delimiter::Semicolon,
    Delimiter::Pipe,
    Delimiter::Whitespace,
];

/// Rows inspected when inferring a delimiter.
const AUTO_SAMPLE_ROWS: usize = 20;

// ---------------------------------------------------------------------------
// Per-attempt results
// ---------------------------------------------------------------------------

/// What happened to one row of a candidate layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Both wavenumber and absorbance converted.
    Parsed,
    /// The row fits the table but at least one of the two cells is not a number.
    Missing,
    /// The row has more fields than the table width and was dropped.
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    pub parsed: usize,
    pub missing: usize,
    pub skipped: usize,
}

impl RowStats {
    fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Parsed => self.parsed += 1,
            RowOutcome::Missing => self.missing += 1,
            RowOutcome::Skipped => self.skipped += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Nothing left after skipping header rows.
    NoRows,
    /// `Delimiter::Auto` found no separator splitting rows into 2+ fields.
    NoDelimiter,
    TooFewColumns { width: usize },
    BelowThreshold { stats: RowStats },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    Accepted {
        series: Series,
        /// The layout with `Auto` resolved to the delimiter actually used.
        config: ParseConfig,
        stats: RowStats,
    },
    Rejected(Rejection),
}

/// A successfully ingested file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub series: Series,
    pub config: ParseConfig,
    pub encoding: EncodingGuess,
    pub stats: RowStats,
}

/// Result of loading one path. Failures are data, never panics.
#[derive(Debug)]
pub struct LoadOutcome {
    pub path: PathBuf,
    pub name: DatasetName,
    pub result: Result<ParsedFile, IngestError>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a single spectrum file: detect its encoding, then try every
/// candidate layout until one yields enough numeric rows.
pub fn load_file(path: &Path, config: &IngestConfig) -> LoadOutcome {
    let name = extract_dataset_name(path);
    let result = std::fs::read(path)
        .map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|bytes| load_bytes(&bytes, config));

    match &result {
        Ok(parsed) => log::info!(
            "Loaded {name} ({} points) with {} [{}]",
            parsed.series.len(),
            parsed.config,
            parsed.encoding.name()
        ),
        Err(e) => log::warn!("Could not read {name}: {e}"),
    }

    LoadOutcome {
        path: path.to_path_buf(),
        name,
        result,
    }
}

/// Load many files in parallel. The returned outcomes are in input order.
pub fn load_files<P: AsRef<Path> + Sync>(paths: &[P], config: &IngestConfig) -> Vec<LoadOutcome> {
    paths
        .par_iter()
        .map(|p| load_file(p.as_ref(), config))
        .collect()
}

/// Ingest raw file contents.
pub fn load_bytes(bytes: &[u8], config: &IngestConfig) -> Result<ParsedFile, IngestError> {
    let prefix = &bytes[..bytes.len().min(config.prefix_len)];
    let encoding = detect_encoding(prefix);
    if encoding.source == EncodingSource::Fallback {
        log::warn!("encoding undetermined, decoding as {}", encoding.name());
    }
    let text = decode(bytes, &encoding);

    let (series, used, stats) = sniff(&text, config)?;
    Ok(ParsedFile {
        series,
        config: used,
        encoding,
        stats,
    })
}

/// Try each candidate layout in order and keep the first accepted one.
pub fn sniff(
    text: &str,
    config: &IngestConfig,
) -> Result<(Series, ParseConfig, RowStats), IngestError> {
    for candidate in &config.candidates {
        match attempt(text, candidate, config.validity_threshold) {
            Attempt::Accepted {
                series,
                config,
                stats,
            } => return Ok((series, config, stats)),
            Attempt::Rejected(reason) => {
                log::debug!("layout {candidate} rejected: {reason:?}");
            }
        }
    }
    Err(IngestError::NoValidFormatFound {
        attempts: config.candidates.len(),
    })
}

/// Parse `text` with one layout and decide whether it is plausible.
///
/// The first row after the skipped header lines fixes the table width. Rows
/// with more fields are skipped, shorter rows have their missing cells
/// treated as non-numeric. The layout is accepted when more than `threshold`
/// rows have a numeric value in both of the first two columns.
pub fn attempt(text: &str, config: &ParseConfig, threshold: usize) -> Attempt {
    let body = skip_lines(text, config.skip_rows);

    let delimiter = match config.delimiter {
        Delimiter::Auto => match infer_delimiter(body) {
            Some(d) => d,
            None => return Attempt::Rejected(Rejection::NoDelimiter),
        },
        other => other,
    };

    let rows = split_rows(body, delimiter);
    let width = match rows.first() {
        Some(first) => first.len(),
        None => return Attempt::Rejected(Rejection::NoRows),
    };
    if width < 2 {
        return Attempt::Rejected(Rejection::TooFewColumns { width });
    }

    let mut stats = RowStats::default();
    let mut points = Vec::new();
    for row in &rows {
        if row.len() > width {
            stats.record(RowOutcome::Skipped);
            continue;
        }
        let wavenumber = parse_number(&row[0], config.decimal);
        let absorbance = row.get(1).and_then(|c| parse_number(c, config.decimal));
        match (wavenumber, absorbance) {
            (Some(wavenumber), Some(absorbance)) => {
                stats.record(RowOutcome::Parsed);
                points.push(SpectrumPoint {
                    wavenumber,
                    absorbance,
                });
            }
            _ => stats.record(RowOutcome::Missing),
        }
    }

    if stats.parsed <= threshold {
        return Attempt::Rejected(Rejection::BelowThreshold { stats });
    }

    log::debug!(
        "layout {config} parsed {} rows ({} missing, {} skipped)",
        stats.parsed,
        stats.missing,
        stats.skipped
    );
    Attempt::Accepted {
        series: Series::from_points(points),
        config: ParseConfig { delimiter, ..*config },
        stats,
    }
}

// ---------------------------------------------------------------------------
// Tokenising helpers
// ---------------------------------------------------------------------------

/// Slice off the first `n` lines.
fn skip_lines(text: &str, n: usize) -> &str {
    let offset: usize = text.split_inclusive('\n').take(n).map(str::len).sum();
    &text[offset..]
}

fn is_blank(fields: &[String]) -> bool {
    fields.iter().all(|f| f.trim().is_empty())
}

/// Split into rows of fields, ignoring blank lines.
fn split_rows(body: &str, delimiter: Delimiter) -> Vec<Vec<String>> {
    let Some(byte) = delimiter.as_byte() else {
        return body
            .lines()
            .map(|line| line.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|fields| !fields.is_empty())
            .collect();
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(byte)
        .from_reader(body.as_bytes());

    reader
        .records()
        // A malformed record is dropped like any other unusable line.
        .filter_map(|record| record.ok())
        .map(|record| record.iter().map(str::to_string).collect::<Vec<_>>())
        .filter(|fields| !is_blank(fields))
        .collect()
}

fn field_count(line: &str, delimiter: Delimiter) -> usize {
    match delimiter.as_byte() {
        Some(b) => line.split(b as char).count(),
        None => line.split_whitespace().count(),
    }
}

/// Pick the delimiter that splits the sampled rows into the most consistent
/// number of fields (at least two).
fn infer_delimiter(body: &str) -> Option<Delimiter> {
    let sample: Vec<&str> = body
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(AUTO_SAMPLE_ROWS)
        .collect();

    let mut best: Option<(Delimiter, usize)> = None;
    for delimiter in AUTO_DELIMITERS {
        let counts: Vec<usize> = sample.iter().map(|l| field_count(l, delimiter)).collect();
        let Some(mode) = modal_count(&counts) else {
            continue;
        };
        if mode < 2 {
            continue;
        }
        let agreeing = counts.iter().filter(|&&c| c == mode).count();
        if best.map_or(true, |(_, score)| agreeing > score) {
            best = Some((delimiter, agreeing));
        }
    }
    best.map(|(d, _)| d)
}

/// Most frequent value; the larger value wins ties.
fn modal_count(counts: &[usize]) -> Option<usize> {
    let mut sorted = counts.to_vec();
    sorted.sort_unstable();
    let mut best: Option<(usize, usize)> = None;
    for chunk in sorted.chunk_by(|a, b| a == b) {
        let (value, freq) = (chunk[0], chunk.len());
        if best.map_or(true, |(_, f)| freq >= f) {
            best = Some((value, freq));
        }
    }
    best.map(|(value, _)| value)
}

/// Convert one cell. With a comma decimal marker the comma is translated to
/// a dot; plain dot notation is still accepted.
fn parse_number(cell: &str, decimal: DecimalMarker) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    let value: f64 = match decimal {
        DecimalMarker::Dot => cell.parse().ok()?,
        DecimalMarker::Comma if cell.contains(',') => cell.replace(',', ".").parse().ok()?,
        DecimalMarker::Comma => cell.parse().ok()?,
    };
    value.is_finite().then_some(value)
}
