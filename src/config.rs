use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::encoding::DEFAULT_PREFIX_LEN;
use crate::data::loader::DEFAULT_CANDIDATES;
use crate::data::model::ParseConfig;
use crate::error::ConfigError;
use crate::signal::peaks::PeakParams;

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// All tunables of the ingestion and processing pipeline.
///
/// Every field has a default, so a JSON file only needs the values it
/// changes:
///
/// ```json
/// { "processing": { "smoothing_window": 15 }, "peaks": { "prominence": 0.02 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub ingest: IngestConfig,
    pub processing: ProcessingConfig,
    pub peaks: PeakParams,
}

impl PipelineConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Bytes read for encoding detection.
    pub prefix_len: usize,
    /// A layout is accepted when strictly more rows than this parse.
    pub validity_threshold: usize,
    /// Layouts tried in order; the first accepted one wins.
    pub candidates: Vec<ParseConfig>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            prefix_len: DEFAULT_PREFIX_LEN,
            validity_threshold: 10,
            candidates: DEFAULT_CANDIDATES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub baseline_order: usize,
    pub smoothing_window: usize,
    pub smoothing_order: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            baseline_order: 2,
            smoothing_window: 11,
            smoothing_order: 2,
        }
    }
}
