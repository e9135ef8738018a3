use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Ingestion errors – reported per file, never fatal to a batch
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no known layout matched after {attempts} attempts")]
    NoValidFormatFound { attempts: usize },
}

// ---------------------------------------------------------------------------
// Processing errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProcessError {
    #[error("series of length {len} is too short, need more than {required} points")]
    InsufficientSeriesLength { len: usize, required: usize },

    #[error("invalid value for {name}: '{value}'")]
    InvalidParameter { name: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
