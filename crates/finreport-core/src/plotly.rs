use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::charts::{Chart, ChartKind, ChartSink};
use crate::error::SinkError;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartFormat {
    /// Standalone page that loads plotly.js.
    #[default]
    Html,
    /// Bare Plotly figure JSON.
    Json,
    /// Skip chart output.
    None,
}

impl ChartFormat {
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ChartFormat::Html => Some("html"),
            ChartFormat::Json => Some("json"),
            ChartFormat::None => None,
        }
    }
}

/// Plotly figure (`{"data": [...], "layout": {...}}`) for a chart.
pub fn figure_json(chart: &Chart) -> Value {
    let data: Vec<Value> = chart
        .series
        .iter()
        .map(|series| match chart.kind {
            ChartKind::Line => json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": series.name,
                "x": series.years(),
                "y": series.values(),
            }),
            ChartKind::Bar => {
                let mut trace = json!({
                    "type": "bar",
                    "name": series.name,
                    "x": series.years(),
                    "y": series.values(),
                });
                if let Some(scale) = chart.color_scale {
                    trace["marker"] = json!({
                        "color": series.values(),
                        "colorscale": scale.as_str(),
                        "showscale": true,
                    });
                }
                if chart.show_values {
                    trace["texttemplate"] = json!("%{y:.2f}");
                    trace["textposition"] = json!("auto");
                }
                trace
            }
        })
        .collect();

    let mut layout = json!({
        "title": { "text": chart.title },
        "xaxis": { "title": { "text": chart.x_label }, "type": "category" },
        "yaxis": { "title": { "text": chart.y_label } },
    });

    if let Some(line) = chart.reference_line {
        let dash = if line.dashed { "dash" } else { "solid" };
        layout["shapes"] = json!([{
            "type": "line",
            "xref": "paper",
            "x0": 0,
            "x1": 1,
            "y0": line.y,
            "y1": line.y,
            "line": {
                "color": "black",
                "dash": dash,
            },
        }]);
    }

    json!({ "data": data, "layout": layout })
}

fn html_page(title: &str, figure: &Value) -> String {
    let title = escape_html(title);
    // `<\/` keeps a `</script>` inside a string literal from closing the script element.
    let figure = figure.to_string().replace("</", "<\\/");
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
const figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout);
</script>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Writes each chart as `<slug>.html` or `<slug>.json` under `output_dir`.
#[derive(Debug)]
pub struct PlotlyFileSink {
    output_dir: PathBuf,
    format: ChartFormat,
    written: Vec<PathBuf>,
}

impl PlotlyFileSink {
    pub fn new(output_dir: impl Into<PathBuf>, format: ChartFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            written: Vec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ChartSink for PlotlyFileSink {
    fn render(&mut self, chart: &Chart) -> Result<(), SinkError> {
        let Some(extension) = self.format.extension() else {
            return Ok(());
        };

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.{extension}", chart.slug));
        let figure = figure_json(chart);

        let contents = match self.format {
            ChartFormat::Json => serde_json::to_string_pretty(&figure)?,
            _ => html_page(&chart.title, &figure),
        };
        fs::write(&path, contents)?;

        info!(chart = chart.slug, path = %path.display(), "chart written");
        self.written.push(path);
        Ok(())
    }
}
