//! Local maxima / minima with prominence and separation constraints.
//!
//! # Algorithm
//!
//! 1. Candidates are strict local maxima; a flat top counts once, at the
//!    middle of the plateau, when both of its neighbours are lower.
//! 2. Prominence: from the candidate walk outwards on each side until a
//!    strictly higher sample or the end of the series, remembering the lowest
//!    sample seen. Prominence is the height above the higher of the two
//!    minima.
//! 3. Candidates below the prominence threshold are dropped.
//! 4. Separation: candidates are visited by decreasing prominence; each kept
//!    candidate removes every remaining one closer than `min_separation`
//!    samples.
//!
//! SciPy's `find_peaks(distance=...)` ranks by height and applies the
//! distance before the prominence filter. Here separation ranks by
//! prominence and runs last, so a tall narrow spike cannot evict a broad,
//! more prominent band.

use serde::{Deserialize, Serialize};

use crate::data::model::Features;
use crate::error::ProcessError;

/// Thresholds for [`find_peaks`] and [`detect`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakParams {
    /// Minimum prominence, in intensity units.
    pub prominence: f64,
    /// Minimum index distance between two reported peaks.
    pub min_separation: usize,
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            prominence: 0.01,
            min_separation: 5,
        }
    }
}

impl PeakParams {
    pub fn new(prominence: f64, min_separation: usize) -> Result<Self, ProcessError> {
        if !prominence.is_finite() || prominence <= 0.0 {
            return Err(ProcessError::InvalidParameter {
                name: "prominence",
                value: prominence.to_string(),
            });
        }
        if min_separation == 0 {
            return Err(ProcessError::InvalidParameter {
                name: "min_separation",
                value: min_separation.to_string(),
            });
        }
        Ok(Self {
            prominence,
            min_separation,
        })
    }

    /// Parse user-entered text, e.g. from a form or the command line.
    pub fn parse(prominence: &str, min_separation: &str) -> Result<Self, ProcessError> {
        let prom = prominence
            .trim()
            .parse::<f64>()
            .map_err(|_| ProcessError::InvalidParameter {
                name: "prominence",
                value: prominence.to_string(),
            })?;
        let sep = min_separation
            .trim()
            .parse::<usize>()
            .map_err(|_| ProcessError::InvalidParameter {
                name: "min_separation",
                value: min_separation.to_string(),
            })?;
        Self::new(prom, sep)
    }
}

/// A detected maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub index: usize,
    pub height: f64,
    pub prominence: f64,
}

/// Indices of the local maxima of `y` that satisfy `params`, ascending.
pub fn find_peaks(y: &[f64], params: &PeakParams) -> Vec<usize> {
    find_peaks_detailed(y, params)
        .into_iter()
        .map(|p| p.index)
        .collect()
}

/// Like [`find_peaks`], keeping height and prominence.
pub fn find_peaks_detailed(y: &[f64], params: &PeakParams) -> Vec<Peak> {
    let peaks: Vec<Peak> = local_maxima(y)
        .into_iter()
        .map(|index| Peak {
            index,
            height: y[index],
            prominence: prominence(y, index),
        })
        .filter(|p| p.prominence >= params.prominence)
        .collect();

    select_by_separation(peaks, params.min_separation)
}

/// Peaks of `y` and peaks of `-y` (the valleys of `y`).
pub fn detect(y: &[f64], params: &PeakParams) -> Features {
    let inverted: Vec<f64> = y.iter().map(|v| -v).collect();
    Features {
        peaks: find_peaks(y, params),
        valleys: find_peaks(&inverted, params),
    }
}

fn local_maxima(y: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if y.len() < 3 {
        return maxima;
    }

    let last = y.len() - 1;
    let mut i = 1;
    while i < last {
        if y[i - 1] < y[i] {
            let mut ahead = i + 1;
            while ahead < last && y[ahead] == y[i] {
                ahead += 1;
            }
            if y[ahead] < y[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    maxima
}

fn prominence(y: &[f64], peak: usize) -> f64 {
    let height = y[peak];

    let mut left_min = height;
    for &v in y[..peak].iter().rev() {
        if v > height {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = height;
    for &v in &y[peak + 1..] {
        if v > height {
            break;
        }
        right_min = right_min.min(v);
    }

    height - left_min.max(right_min)
}

fn select_by_separation(peaks: Vec<Peak>, min_separation: usize) -> Vec<Peak> {
    if min_separation <= 1 || peaks.len() < 2 {
        return peaks;
    }

    let mut priority: Vec<usize> = (0..peaks.len()).collect();
    priority.sort_by(|&a, &b| {
        peaks[b]
            .prominence
            .total_cmp(&peaks[a].prominence)
            .then(peaks[b].height.total_cmp(&peaks[a].height))
            .then(peaks[a].index.cmp(&peaks[b].index))
    });

    let mut keep = vec![true; peaks.len()];
    for &i in &priority {
        if !keep[i] {
            continue;
        }
        // `peaks` is ordered by index, so neighbours are contiguous.
        for j in (0..i).rev() {
            if peaks[i].index - peaks[j].index >= min_separation {
                break;
            }
            keep[j] = false;
        }
        for j in i + 1..peaks.len() {
            if peaks[j].index - peaks[i].index >= min_separation {
                break;
            }
            keep[j] = false;
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(p))
        .collect()
}
