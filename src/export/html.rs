use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

use super::display_values;
use crate::analysis::DatasetAnalysis;
use crate::color::{lighten, to_hex, PEAK_COLOR};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const GRID_COLOR: &str = "#E5E5E5";

/// Presentation options for the interactive chart.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub title: String,
    /// Image embedded as a watermark in the lower right corner.
    pub logo: Option<PathBuf>,
    /// Also draw the baseline-corrected, smoothed trace.
    pub show_processed: bool,
    /// Rescale every trace to [0, 1].
    pub normalize: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "FTIR spectra".to_string(),
            logo: None,
            show_processed: false,
            normalize: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Figure construction
// ---------------------------------------------------------------------------

/// Build the Plotly figure (`{ data, layout }`) for the given analyses.
pub fn figure(analyses: &[DatasetAnalysis<'_>], options: &ChartOptions) -> Value {
    let mut traces = Vec::new();

    for analysis in analyses {
        let name = analysis.dataset.name.as_str();
        let x = analysis.dataset.series.wavenumbers();
        let raw = display_values(analysis.dataset.series.absorbances(), options.normalize);

        let raw_color = if options.show_processed {
            lighten(analysis.dataset.color, 0.35)
        } else {
            analysis.dataset.color
        };
        traces.push(json!({
            "type": "scatter",
            "mode": "lines",
            "name": name,
            "x": x,
            "y": raw,
            "line": { "color": to_hex(raw_color), "width": 2 },
        }));

        if options.show_processed {
            let processed = display_values(analysis.processed.intensity.clone(), options.normalize);
            traces.push(json!({
                "type": "scatter",
                "mode": "lines",
                "name": format!("{name} (processed)"),
                "x": x,
                "y": processed,
                "line": { "color": to_hex(analysis.dataset.color), "width": 2 },
            }));
        }

        let (px, py): (Vec<f64>, Vec<f64>) = analysis
            .features
            .peaks
            .iter()
            .filter_map(|&i| Some((*x.get(i)?, *raw.get(i)?)))
            .unzip();
        traces.push(json!({
            "type": "scatter",
            "mode": "markers",
            "name": format!("Peaks {name}"),
            "x": px,
            "y": py,
            "marker": { "symbol": "x", "size": 8, "color": to_hex(PEAK_COLOR) },
            "showlegend": true,
        }));
    }

    let y_title = if options.normalize {
        "Absorbance (normalized)"
    } else {
        "Absorbance"
    };
    let mut layout = json!({
        "title": { "text": options.title, "x": 0.5, "font": { "size": 20, "color": "black" } },
        "legend": {
            "orientation": "h",
            "y": 1.02,
            "x": 0.5,
            "xanchor": "center",
            "bgcolor": "rgba(255,255,255,0.8)",
        },
        "xaxis": {
            "title": { "text": "Wavenumber (cm⁻¹)" },
            "autorange": "reversed",
            "showline": true,
            "linewidth": 1,
            "linecolor": "black",
            "mirror": true,
            "showgrid": true,
            "gridwidth": 1,
            "gridcolor": GRID_COLOR,
        },
        "yaxis": {
            "title": { "text": y_title },
            "showline": true,
            "linewidth": 1,
            "linecolor": "black",
            "mirror": true,
            "showgrid": true,
            "gridwidth": 1,
            "gridcolor": GRID_COLOR,
        },
        "paper_bgcolor": "white",
        "plot_bgcolor": "white",
        "font": { "color": "black" },
        "margin": { "l": 60, "r": 40, "t": 80, "b": 60 },
    });

    if let Some(logo) = options.logo.as_deref() {
        match logo_image(logo) {
            Ok(image) => layout["images"] = json!([image]),
            Err(e) => log::warn!("Logo not embedded: {e:#}"),
        }
    }

    json!({ "data": traces, "layout": layout })
}

/// Layout image entry with the file inlined as a data URI.
fn logo_image(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "gif" => "image/gif",
        _ => "image/png",
    };
    Ok(json!({
        "source": format!("data:{mime};base64,{}", STANDARD.encode(bytes)),
        "xref": "paper",
        "yref": "paper",
        "x": 1,
        "y": 0,
        "sizex": 0.15,
        "sizey": 0.15,
        "xanchor": "right",
        "yanchor": "bottom",
        "opacity": 0.6,
        "layer": "above",
    }))
}

// ---------------------------------------------------------------------------
// HTML output
// ---------------------------------------------------------------------------

/// A standalone HTML page rendering `figure` with Plotly.
pub fn render_html(title: &str, figure: &Value) -> String {
    // Keep "</script>" inside strings from closing the script element.
    let payload = figure.to_string().replace("</", "<\\/");
    let title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
<style>html, body, #chart {{ width: 100%; height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="chart"></div>
<script>
const figure = {payload};
Plotly.newPlot("chart", figure.data, figure.layout, {{ responsive: true }});
</script>
</body>
</html>
"#
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Build and write the chart page.
pub fn write_chart(
    path: &Path,
    analyses: &[DatasetAnalysis<'_>],
    options: &ChartOptions,
) -> Result<()> {
    let page = render_html(&options.title, &figure(analyses, options));
    std::fs::write(path, page).with_context(|| format!("writing {}", path.display()))
}
