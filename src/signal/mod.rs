/// Signal layer: baseline removal, smoothing and feature detection.
///
/// ```text
///   Series (absorbance)
///        │
///        ▼
///   ┌──────────┐
///   │ baseline  │  subtract polynomial drift
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  smooth   │  Savitzky–Golay → ProcessedSeries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  peaks    │  maxima / minima → Features
///   └──────────┘
/// ```

pub mod baseline;
pub mod normalize;
pub mod peaks;
pub mod polyfit;
pub mod smooth;

use crate::config::ProcessingConfig;
use crate::data::model::{Features, ProcessedSeries, Series};
use peaks::PeakParams;

/// Baseline-correct then smooth the absorbance of `series`. The result keeps
/// the wavenumber axis and length of the input.
pub fn process_series(series: &Series, config: &ProcessingConfig) -> ProcessedSeries {
    let corrected = baseline::correct(&series.absorbances(), config.baseline_order);
    let intensity =
        smooth::savitzky_golay(&corrected, config.smoothing_window, config.smoothing_order);
    ProcessedSeries {
        wavenumber: series.wavenumbers(),
        intensity,
    }
}

/// Peaks and valleys of a processed series.
pub fn detect_features(processed: &ProcessedSeries, params: &PeakParams) -> Features {
    peaks::detect(&processed.intensity, params)
}
