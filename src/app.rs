use anyhow::{bail, Context, Result};

use rusty_ftir::analysis::DatasetAnalysis;
use rusty_ftir::config::PipelineConfig;
use rusty_ftir::data::loader::load_files;
use rusty_ftir::data::model::DatasetName;
use rusty_ftir::export::html::{write_chart, ChartOptions};
use rusty_ftir::export::image::write_image;
use rusty_ftir::export::peaks_csv::{peak_rows, write_peaks};
use rusty_ftir::signal::peaks::PeakParams;
use rusty_ftir::state::Session;

use crate::Cli;

// ---------------------------------------------------------------------------
// Command-line front end
// ---------------------------------------------------------------------------

pub struct RustyFtirApp {
    pub state: Session,
    pub config: PipelineConfig,
}

impl RustyFtirApp {
    /// Resolve the pipeline configuration: defaults, then the JSON file, then
    /// individual flags.
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        if cli.prominence.is_some() || cli.distance.is_some() {
            let prominence = cli
                .prominence
                .clone()
                .unwrap_or_else(|| config.peaks.prominence.to_string());
            let distance = cli
                .distance
                .clone()
                .unwrap_or_else(|| config.peaks.min_separation.to_string());
            config.peaks = PeakParams::parse(&prominence, &distance)?;
        } else {
            config.peaks = PeakParams::new(config.peaks.prominence, config.peaks.min_separation)
                .context("invalid peak parameters in config")?;
        }

        Ok(Self {
            state: Session::default(),
            config,
        })
    }

    pub fn run(&mut self, cli: &Cli) -> Result<()> {
        let outcomes = load_files(&cli.files, &self.config.ingest);
        let summary = self.state.ingest(outcomes);
        for (path, reason) in &summary.failed {
            log::error!("{}: {reason}", path.display());
        }
        println!("{summary}");

        if self.state.is_empty() {
            bail!("no new valid file was loaded");
        }

        self.select(&cli.only);
        let analyses: Vec<DatasetAnalysis<'_>> = self
            .state
            .selected()
            .into_iter()
            .map(|d| DatasetAnalysis::run(d, &self.config.processing, &self.config.peaks))
            .collect();

        print_peak_table(&analyses);

        if let Some(path) = &cli.export_peaks {
            let rows = peak_rows(&analyses);
            if rows.is_empty() {
                log::warn!("no peaks detected in the selected samples, nothing exported");
            } else {
                write_peaks(path, &rows)?;
                println!("Peaks exported to {}", path.display());
            }
        }

        let options = ChartOptions {
            title: cli.title.clone(),
            logo: cli.logo.clone(),
            show_processed: cli.processed,
            normalize: cli.normalize,
        };

        if let Some(path) = &cli.image {
            write_image(path, &analyses, &options)?;
            println!("Image written to {}", path.display());
        }

        if let Some(path) = &cli.html {
            write_chart(path, &analyses, &options)?;
            println!("Chart written to {}", path.display());
            if cli.open {
                open::that(path).with_context(|| format!("opening {}", path.display()))?;
            }
        }

        Ok(())
    }

    /// Select the named datasets, or all of them when no name is given.
    fn select(&mut self, only: &[String]) {
        if only.is_empty() {
            self.state.select_all();
            return;
        }
        self.state.select_none();
        for name in only {
            let name = DatasetName::new(name.as_str());
            if self.state.get(&name).is_some() {
                self.state.toggle_selection(&name);
            } else {
                log::warn!("no dataset named '{name}'");
            }
        }
    }
}

fn print_peak_table(analyses: &[DatasetAnalysis<'_>]) {
    println!("{:<30} {:>16} {:>12}", "Amostra", "Position (cm⁻¹)", "Intensity");
    for analysis in analyses {
        for (wavenumber, intensity) in analysis.peak_points() {
            println!(
                "{:<30} {:>16.2} {:>12.4}",
                analysis.dataset.name.as_str(),
                wavenumber,
                intensity
            );
        }
    }
}
