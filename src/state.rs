use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use crate::color::{ColorCycle, Rgb8};
use crate::data::loader::{LoadOutcome, ParsedFile};
use crate::data::model::{DatasetName, ParseConfig, Series};

// ---------------------------------------------------------------------------
// Session registry
// ---------------------------------------------------------------------------

/// One dataset held by the session.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub name: DatasetName,
    pub path: PathBuf,
    pub series: Series,
    /// Layout the file was read with.
    pub layout: ParseConfig,
    /// Assigned once, at insertion, and never changed.
    pub color: Rgb8,
}

/// Counts reported after a batch load.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub loaded: Vec<DatasetName>,
    /// Names already present in the session; the later file was discarded.
    pub duplicates: Vec<DatasetName>,
    pub failed: Vec<(PathBuf, String)>,
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} loaded, {} failed",
            self.loaded.len(),
            self.failed.len()
        )?;
        if !self.duplicates.is_empty() {
            write!(f, " ({} duplicates skipped)", self.duplicates.len())?;
        }
        Ok(())
    }
}

/// All datasets loaded in a run, in load order, with their colours and the
/// current selection.
#[derive(Debug, Default)]
pub struct Session {
    datasets: Vec<LoadedDataset>,
    index: BTreeMap<DatasetName, usize>,
    selection: BTreeSet<DatasetName>,
    colors: ColorCycle,
}

impl Session {
    /// Add a parsed file. Returns `false`, leaving the session untouched, if
    /// a dataset with the same name is already loaded.
    pub fn insert(&mut self, name: DatasetName, path: PathBuf, parsed: ParsedFile) -> bool {
        if self.index.contains_key(&name) {
            return false;
        }
        let color = self.colors.next_color();
        self.index.insert(name.clone(), self.datasets.len());
        self.datasets.push(LoadedDataset {
            name,
            path,
            series: parsed.series,
            layout: parsed.config,
            color,
        });
        true
    }

    /// Merge batch results in their given order, so the first file with a
    /// given name wins however the batch was scheduled.
    pub fn ingest(&mut self, outcomes: Vec<LoadOutcome>) -> LoadSummary {
        let mut summary = LoadSummary::default();
        for outcome in outcomes {
            match outcome.result {
                Ok(parsed) => {
                    if self.insert(outcome.name.clone(), outcome.path, parsed) {
                        summary.loaded.push(outcome.name);
                    } else {
                        log::info!("{} already loaded, skipping duplicate", outcome.name);
                        summary.duplicates.push(outcome.name);
                    }
                }
                Err(e) => summary.failed.push((outcome.path, e.to_string())),
            }
        }
        summary
    }

    pub fn get(&self, name: &DatasetName) -> Option<&LoadedDataset> {
        self.index.get(name).map(|&i| &self.datasets[i])
    }

    pub fn datasets(&self) -> &[LoadedDataset] {
        &self.datasets
    }

    pub fn names(&self) -> impl Iterator<Item = &DatasetName> {
        self.datasets.iter().map(|d| &d.name)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Toggle a dataset in or out of the selection. Unknown names are ignored.
    pub fn toggle_selection(&mut self, name: &DatasetName) {
        if !self.index.contains_key(name) {
            return;
        }
        if !self.selection.remove(name) {
            self.selection.insert(name.clone());
        }
    }

    pub fn select_all(&mut self) {
        self.selection = self.index.keys().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.selection.clear();
    }

    /// Selected datasets in load order.
    pub fn selected(&self) -> Vec<&LoadedDataset> {
        self.datasets
            .iter()
            .filter(|d| self.selection.contains(&d.name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoding::EncodingGuess;
    use crate::data::loader::{RowStats, DEFAULT_CANDIDATES};
    use crate::data::model::SpectrumPoint;
    use crate::error::IngestError;

    fn parsed(offset: f64) -> ParsedFile {
        ParsedFile {
            series: Series::from_points((0..12).map(|i| SpectrumPoint {
                wavenumber: 1000.0 + i as f64,
                absorbance: offset,
            })),
            config: DEFAULT_CANDIDATES[1],
            encoding: EncodingGuess::fallback(),
            stats: RowStats::default(),
        }
    }

    fn outcome(name: &str, result: Result<ParsedFile, IngestError>) -> LoadOutcome {
        LoadOutcome {
            path: PathBuf::from(format!("{name}.csv")),
            name: DatasetName::new(name),
            result,
        }
    }

    #[test]
    fn first_load_wins() {
        let mut session = Session::default();
        let summary = session.ingest(vec![
            outcome("a", Ok(parsed(1.0))),
            outcome("b", Err(IngestError::NoValidFormatFound { attempts: 5 })),
            outcome("a", Ok(parsed(2.0))),
        ]);

        assert_eq!(summary.loaded, vec![DatasetName::new("a")]);
        assert_eq!(summary.duplicates, vec![DatasetName::new("a")]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.to_string(), "1 loaded, 1 failed (1 duplicates skipped)");

        let kept = session.get(&DatasetName::new("a")).unwrap();
        assert_eq!(kept.series.absorbances()[0], 1.0);
    }

    #[test]
    fn colors_are_assigned_in_load_order() {
        let mut session = Session::default();
        session.insert(DatasetName::new("x"), "x.csv".into(), parsed(0.0));
        session.insert(DatasetName::new("y"), "y.csv".into(), parsed(0.0));
        let colors: Vec<Rgb8> = session.datasets().iter().map(|d| d.color).collect();
        assert_ne!(colors[0], colors[1]);

        // rejected duplicate must not consume a colour
        session.insert(DatasetName::new("x"), "x2.csv".into(), parsed(0.0));
        session.insert(DatasetName::new("z"), "z.csv".into(), parsed(0.0));
        let mut cycle = ColorCycle::default();
        let expected: Vec<Rgb8> = (0..3).map(|_| cycle.next_color()).collect();
        let actual: Vec<Rgb8> = session.datasets().iter().map(|d| d.color).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn selection_follows_load_order() {
        let mut session = Session::default();
        for n in ["c", "a", "b"] {
            session.insert(DatasetName::new(n), format!("{n}.csv").into(), parsed(0.0));
        }
        session.toggle_selection(&DatasetName::new("b"));
        session.toggle_selection(&DatasetName::new("c"));
        session.toggle_selection(&DatasetName::new("missing"));
        let names: Vec<&str> = session.selected().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);

        session.toggle_selection(&DatasetName::new("c"));
        assert_eq!(session.selected().len(), 1);

        session.select_all();
        assert_eq!(session.selected().len(), 3);
        session.select_none();
        assert!(session.selected().is_empty());
    }
}
