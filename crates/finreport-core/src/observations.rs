use polars::prelude::*;
use serde::Serialize;

use crate::metrics::{PROFIT_MARGIN_PCT, REVENUE_GROWTH_PCT};

pub const SUMMARY_HEADER: &str = "Summary Observations:";

/// A selected row: its year and the metric value there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremum {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum ProfitTrend {
    Increased { start: f64, end: f64 },
    NoIncrease { start: f64, end: f64 },
}

impl ProfitTrend {
    /// Strictly greater end profit counts as an increase.
    pub fn between(start: f64, end: f64) -> Self {
        if end > start {
            ProfitTrend::Increased { start, end }
        } else {
            ProfitTrend::NoIncrease { start, end }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observations {
    pub peak_growth: Option<Extremum>,
    pub trough_margin: Option<Extremum>,
    pub profit_trend: ProfitTrend,
}

impl Observations {
    /// The three numbered observation lines.
    pub fn lines(&self) -> Vec<String> {
        let growth = match self.peak_growth {
            Some(Extremum { year, value }) => {
                format!("1. Highest revenue growth: {year} with {value:.2}%.")
            }
            None => "1. Highest revenue growth: not available (no comparable years).".to_string(),
        };

        let margin = match self.trough_margin {
            Some(Extremum { year, value }) => {
                format!("2. Lowest profit margin: {year} at {value:.2}%.")
            }
            None => "2. Lowest profit margin: not available (no year with revenue).".to_string(),
        };

        let trend = match self.profit_trend {
            ProfitTrend::Increased { start, end } => format!(
                "3. Net profit increased from {}M to {}M.",
                format_amount(start),
                format_amount(end)
            ),
            ProfitTrend::NoIncrease { .. } => {
                "3. Profit did not show an overall increase.".to_string()
            }
        };

        vec![growth, margin, trend]
    }

    /// Observation lines preceded by a blank line and the summary header.
    pub fn block(&self) -> Vec<String> {
        let mut block = vec![String::new(), SUMMARY_HEADER.to_string()];
        block.extend(self.lines());
        block
    }
}

/// Prints whole amounts with one decimal place (`20.0`), everything else as-is.
///
/// A float column always renders this way, even when every profit in the file is a whole
/// number, so `20.0M` rather than `20M`.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Index and value of the largest defined value. Ties keep the earliest index.
pub fn arg_max<I>(values: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    select(values, |candidate, best| candidate > best)
}

/// Index and value of the smallest defined value. Ties keep the earliest index.
pub fn arg_min<I>(values: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    select(values, |candidate, best| candidate < best)
}

fn select<I, F>(values: I, replaces: F) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
    F: Fn(f64, f64) -> bool,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in values.into_iter().enumerate() {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            continue;
        };
        match best {
            Some((_, current)) if !replaces(value, current) => {}
            _ => best = Some((idx, value)),
        }
    }
    best
}

/// Computes the three observations from a table carrying the derived metric columns.
pub fn summarize(df: &DataFrame) -> Result<Observations, PolarsError> {
    let years = df.column("year")?.i32()?;
    let profit = df.column("profit")?.f64()?;
    let growth = df.column(REVENUE_GROWTH_PCT)?.f64()?;
    let margin = df.column(PROFIT_MARGIN_PCT)?.f64()?;

    let at_year = |(idx, value): (usize, f64)| years.get(idx).map(|year| Extremum { year, value });

    let peak_growth = arg_max(growth.into_iter()).and_then(at_year);
    let trough_margin = arg_min(margin.into_iter()).and_then(at_year);

    let last = df.height().checked_sub(1).ok_or_else(|| {
        PolarsError::NoData("profit trend needs at least one row".into())
    })?;
    let start = profit.get(0).unwrap_or(0.0);
    let end = profit.get(last).unwrap_or(0.0);

    Ok(Observations {
        peak_growth,
        trough_margin,
        profit_trend: ProfitTrend::between(start, end),
    })
}
