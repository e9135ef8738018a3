mod app;

use std::path::PathBuf;

use clap::Parser;

use app::RustyFtirApp;

/// Load FTIR spectra from text exports, detect their peaks and export the
/// results.
#[derive(Debug, Parser)]
#[command(name = "rusty-ftir", version, about)]
pub struct Cli {
    /// Spectrum files (.csv, .txt, ...)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// JSON file overriding pipeline defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum peak prominence
    #[arg(long)]
    pub prominence: Option<String>,

    /// Minimum index distance between peaks
    #[arg(long)]
    pub distance: Option<String>,

    /// Restrict output to these dataset names (repeatable)
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,

    /// Write the peak table to this CSV file
    #[arg(long, value_name = "CSV")]
    pub export_peaks: Option<PathBuf>,

    /// Write an interactive chart to this HTML file
    #[arg(long, value_name = "HTML")]
    pub html: Option<PathBuf>,

    /// Write a static chart to this PNG or SVG file
    #[arg(long, value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Chart title
    #[arg(long, default_value = "FTIR spectra")]
    pub title: String,

    /// Image placed as a watermark on the chart
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Draw the processed trace next to the raw one
    #[arg(long)]
    pub processed: bool,

    /// Rescale chart traces to [0, 1]
    #[arg(long)]
    pub normalize: bool,

    /// Open the chart in the default browser
    #[arg(long)]
    pub open: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut app = RustyFtirApp::new(&cli)?;
    app.run(&cli)
}
