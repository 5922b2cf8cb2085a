use finreport_parser::{ColumnLayout, ColumnRole};
use polars::prelude::*;
use serde::Serialize;

use crate::error::SinkError;
use crate::metrics::{PROFIT_MARGIN_PCT, REVENUE_GROWTH_PCT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Lines with markers, one per series.
    Line,
    /// One bar per year, coloured by value.
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorScale {
    Viridis,
    RdBu,
}

impl ColorScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScale::Viridis => "Viridis",
            ColorScale::RdBu => "RdBu",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    /// `(year, value)`; `None` marks an undefined value.
    pub points: Vec<(i32, Option<f64>)>,
}

impl ChartSeries {
    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|(year, _)| *year).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|(_, value)| *value).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub y: f64,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// File-name friendly identifier.
    pub slug: &'static str,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub series: Vec<ChartSeries>,
    pub color_scale: Option<ColorScale>,
    /// Print each value on its bar.
    pub show_values: bool,
    pub reference_line: Option<ReferenceLine>,
}

pub trait ChartSink {
    fn render(&mut self, chart: &Chart) -> Result<(), SinkError>;
}

/// Turns a unit annotation such as `million_usd` into `Million USD`.
pub fn unit_label(unit: Option<&str>) -> String {
    let Some(unit) = unit else {
        return "Amount".to_string();
    };

    unit.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            if word.len() <= 3 {
                word.to_uppercase()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn series(df: &DataFrame, name: &str, column: &str) -> Result<ChartSeries, PolarsError> {
    let years = df.column("year")?.i32()?;
    let values = df.column(column)?.f64()?;

    let points = (0..df.height())
        .filter_map(|idx| years.get(idx).map(|year| (year, values.get(idx))))
        .collect();

    Ok(ChartSeries {
        name: name.to_string(),
        points,
    })
}

/// The three report charts for a table carrying the derived metric columns.
pub fn build_charts(df: &DataFrame, layout: &ColumnLayout) -> Result<Vec<Chart>, PolarsError> {
    let amount_unit = layout
        .unit(ColumnRole::Revenue)
        .or_else(|| layout.unit(ColumnRole::Profit));

    let revenue_vs_profit = Chart {
        slug: "revenue_vs_profit",
        title: "Revenue vs Profit Over Time".to_string(),
        x_label: "Year".to_string(),
        y_label: unit_label(amount_unit),
        kind: ChartKind::Line,
        series: vec![
            series(df, "Revenue", "revenue")?,
            series(df, "Profit", "profit")?,
        ],
        color_scale: None,
        show_values: false,
        reference_line: None,
    };

    let profit_margin = Chart {
        slug: "profit_margin",
        title: "Profit Margin Over Time".to_string(),
        x_label: "Year".to_string(),
        y_label: "Profit Margin (%)".to_string(),
        kind: ChartKind::Bar,
        series: vec![series(df, "Profit Margin (%)", PROFIT_MARGIN_PCT)?],
        color_scale: Some(ColorScale::Viridis),
        show_values: true,
        reference_line: None,
    };

    let revenue_growth = Chart {
        slug: "revenue_growth",
        title: "Year-over-Year Revenue Growth (%)".to_string(),
        x_label: "Year".to_string(),
        y_label: "Growth Rate (%)".to_string(),
        kind: ChartKind::Bar,
        series: vec![series(df, "Revenue Growth (%)", REVENUE_GROWTH_PCT)?],
        color_scale: Some(ColorScale::RdBu),
        show_values: true,
        reference_line: Some(ReferenceLine {
            y: 0.0,
            dashed: true,
        }),
    };

    Ok(vec![revenue_vs_profit, profit_margin, revenue_growth])
}
