use crate::config::ProcessingConfig;
use crate::data::model::{Features, ProcessedSeries};
use crate::signal::peaks::PeakParams;
use crate::signal::{detect_features, process_series};
use crate::state::LoadedDataset;

/// A loaded dataset together with its processed series and features.
#[derive(Debug, Clone)]
pub struct DatasetAnalysis<'a> {
    pub dataset: &'a LoadedDataset,
    pub processed: ProcessedSeries,
    pub features: Features,
}

impl<'a> DatasetAnalysis<'a> {
    pub fn run(
        dataset: &'a LoadedDataset,
        processing: &ProcessingConfig,
        peaks: &PeakParams,
    ) -> Self {
        let processed = process_series(&dataset.series, processing);
        let features = detect_features(&processed, peaks);
        Self {
            dataset,
            processed,
            features,
        }
    }

    /// `(wavenumber, processed intensity)` of every peak.
    pub fn peak_points(&self) -> Vec<(f64, f64)> {
        self.features
            .peaks
            .iter()
            .filter_map(|&i| self.processed.point(i))
            .collect()
    }

    /// `(wavenumber, raw absorbance)` of every peak, for markers drawn on the
    /// unprocessed trace.
    pub fn raw_peak_points(&self) -> Vec<(f64, f64)> {
        let points = self.dataset.series.points();
        self.features
            .peaks
            .iter()
            .filter_map(|&i| points.get(i).map(|p| (p.wavenumber, p.absorbance)))
            .collect()
    }
}
