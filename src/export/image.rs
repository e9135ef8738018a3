//! Static chart export with `plotters`.
//!
//! The format follows the file extension: `.svg` or `.png`. Text (title,
//! axis labels, legend) is only written to SVG; no font rasteriser is built
//! in, so PNG output carries the traces, axes and peak markers alone.

use std::ops::Range;
use std::path::Path;

use anyhow::{bail, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::display_values;
use super::html::ChartOptions;
use crate::analysis::DatasetAnalysis;
use crate::color::{lighten, Rgb8, PEAK_COLOR};

const IMAGE_SIZE: (u32, u32) = (1600, 900);
const GRID_COLOR: RGBColor = RGBColor(0xE5, 0xE5, 0xE5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ImageFormat::Png),
            "svg" => Some(ImageFormat::Svg),
            _ => None,
        }
    }
}

/// One polyline of the chart. Wavenumbers are stored negated so the axis
/// runs from high to low.
struct Trace {
    label: String,
    color: RGBColor,
    points: Vec<(f64, f64)>,
}

/// Render the chart to `path` as PNG or SVG.
pub fn write_image(
    path: &Path,
    analyses: &[DatasetAnalysis<'_>],
    options: &ChartOptions,
) -> Result<()> {
    let Some(format) = ImageFormat::from_path(path) else {
        bail!(
            "unsupported image format for {} (expected .png or .svg)",
            path.display()
        );
    };

    let (traces, markers) = layers(analyses, options);
    if traces.iter().all(|t| t.points.is_empty()) {
        bail!("no spectrum to draw");
    }
    if options.logo.is_some() {
        log::debug!("logo is only embedded in the HTML chart");
    }

    let drawn = match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
            draw(root, &traces, &markers, options, false)
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
            draw(root, &traces, &markers, options, true)
        }
    };
    drawn.with_context(|| format!("writing {}", path.display()))
}

fn plot_color(color: Rgb8) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}

/// Line traces and peak marker positions, in the same layering as the HTML
/// chart.
fn layers(
    analyses: &[DatasetAnalysis<'_>],
    options: &ChartOptions,
) -> (Vec<Trace>, Vec<(f64, f64)>) {
    let mut traces = Vec::new();
    let mut markers = Vec::new();

    for analysis in analyses {
        let name = analysis.dataset.name.as_str();
        let color = analysis.dataset.color;
        let x = analysis.dataset.series.wavenumbers();
        let raw = display_values(analysis.dataset.series.absorbances(), options.normalize);

        markers.extend(
            analysis
                .features
                .peaks
                .iter()
                .filter_map(|&i| Some((-*x.get(i)?, *raw.get(i)?))),
        );

        let raw_color = if options.show_processed {
            lighten(color, 0.35)
        } else {
            color
        };
        traces.push(Trace {
            label: name.to_string(),
            color: plot_color(raw_color),
            points: x.iter().zip(&raw).map(|(w, a)| (-w, *a)).collect(),
        });

        if options.show_processed {
            let processed = display_values(analysis.processed.intensity.clone(), options.normalize);
            traces.push(Trace {
                label: format!("{name} (processed)"),
                color: plot_color(color),
                points: x.iter().zip(&processed).map(|(w, v)| (-w, *v)).collect(),
            });
        }
    }

    (traces, markers)
}

/// `[min, max]` of the finite values, widened by `margin` of the span.
fn padded_range(values: impl Iterator<Item = f64>, margin: f64) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if hi - lo <= f64::EPSILON {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = (hi - lo) * margin;
    (lo - pad)..(hi + pad)
}

fn draw<DB>(
    root: DrawingArea<DB, Shift>,
    traces: &[Trace],
    markers: &[(f64, f64)],
    options: &ChartOptions,
    labelled: bool,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let points = || traces.iter().flat_map(|t| t.points.iter());
    let x_range = padded_range(points().map(|p| p.0), 0.0);
    let y_range = padded_range(points().map(|p| p.1), 0.05);

    // Without label areas plotters draws no tick labels, hence no text.
    let mut builder = ChartBuilder::on(&root);
    builder.margin(25);
    if labelled {
        builder
            .caption(&options.title, ("sans-serif", 32))
            .set_label_area_size(LabelAreaPosition::Left, 80)
            .set_label_area_size(LabelAreaPosition::Bottom, 60);
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

    let y_title = if options.normalize {
        "Absorbance (normalized)"
    } else {
        "Absorbance"
    };
    let wavenumber_label = |x: &f64| format!("{:.0}", -x);
    let mut mesh = chart.configure_mesh();
    mesh.light_line_style(&GRID_COLOR);
    if labelled {
        mesh.x_desc("Wavenumber (cm⁻¹)")
            .y_desc(y_title)
            .x_label_formatter(&wavenumber_label);
    }
    mesh.draw()?;

    for trace in traces {
        let color = trace.color;
        chart
            .draw_series(LineSeries::new(
                trace.points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(trace.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(2))
            });
    }

    let peak_color = plot_color(PEAK_COLOR);
    chart
        .draw_series(
            markers
                .iter()
                .map(|&p| Cross::new(p, 6, peak_color.stroke_width(2))),
        )?
        .label("Peaks")
        .legend(move |(x, y)| Cross::new((x + 12, y), 6, peak_color.stroke_width(2)));

    if labelled {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
