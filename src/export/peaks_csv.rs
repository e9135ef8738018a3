use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::DatasetAnalysis;

/// One line of the exported peak table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakRow {
    #[serde(rename = "Amostra")]
    pub sample: String,
    #[serde(rename = "Wavenumber")]
    pub wavenumber: f64,
    #[serde(rename = "Intensidade")]
    pub intensity: f64,
}

/// Flatten the peaks of every analysis, dataset by dataset.
pub fn peak_rows(analyses: &[DatasetAnalysis<'_>]) -> Vec<PeakRow> {
    analyses
        .iter()
        .flat_map(|a| {
            a.peak_points()
                .into_iter()
                .map(|(wavenumber, intensity)| PeakRow {
                    sample: a.dataset.name.to_string(),
                    wavenumber,
                    intensity,
                })
        })
        .collect()
}

/// Write the peak table as CSV with headers `Amostra,Wavenumber,Intensidade`.
pub fn write_peaks(path: &Path, rows: &[PeakRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing peak row")?;
    }
    writer.flush().context("flushing peak CSV")?;
    Ok(())
}
