//! Output adapters: the peak table as CSV, an interactive HTML chart and a
//! static image of the same chart.

pub mod html;
pub mod image;
pub mod peaks_csv;

use crate::signal::normalize::min_max;

/// Values as drawn on a chart, rescaled to [0, 1] when asked.
fn display_values(values: Vec<f64>, normalize: bool) -> Vec<f64> {
    if !normalize {
        return values;
    }
    min_max(&values).unwrap_or(values)
}
