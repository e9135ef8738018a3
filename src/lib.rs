//! Ingestion, cleaning and peak detection for FTIR spectra exported as text.
//!
//! ```no_run
//! use rusty_ftir::config::PipelineConfig;
//! use rusty_ftir::data::loader::load_file;
//! use rusty_ftir::signal::{detect_features, process_series};
//!
//! let config = PipelineConfig::default();
//! let outcome = load_file("PET (2).csv".as_ref(), &config.ingest);
//! if let Ok(parsed) = outcome.result {
//!     let processed = process_series(&parsed.series, &config.processing);
//!     let features = detect_features(&processed, &config.peaks);
//!     println!("{}: {} peaks", outcome.name, features.peaks.len());
//! }
//! ```

pub mod analysis;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod signal;
pub mod state;
