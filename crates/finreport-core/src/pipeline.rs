use std::fs;

use finreport_parser::{parse_financial_report, FinancialTable};
use polars::prelude::DataFrame;
use tracing::{info, instrument};

use crate::charts::{build_charts, Chart, ChartSink};
use crate::config::AnalysisConfig;
use crate::error::{PipelineError, Result};
use crate::metrics::apply_derived_metrics;
use crate::observations::{summarize, Observations};
use crate::table::ValidatedTable;
use crate::text::TextSink;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Input table with the derived metric columns appended.
    pub table: DataFrame,
    pub observations: Observations,
    pub charts: Vec<Chart>,
}

/// Derived metrics, observations and chart definitions for a validated table.
pub fn run_pipeline(table: &ValidatedTable) -> Result<PipelineReport> {
    let enriched = apply_derived_metrics(table.df())?;
    let observations = summarize(&enriched)?;
    let charts = build_charts(&enriched, &table.table().layout)?;

    Ok(PipelineReport {
        table: enriched,
        observations,
        charts,
    })
}

/// Reads and parses the configured input. The file is read fully before parsing starts.
pub fn load_table(config: &AnalysisConfig) -> Result<FinancialTable> {
    if !config.input.exists() {
        return Err(PipelineError::MissingInputFile(config.input.clone()));
    }

    let content = fs::read_to_string(&config.input)?;
    let table = parse_financial_report(&content, &config.parse_options()?)?;
    Ok(table)
}

/// Runs the whole analysis and hands the results to the sinks.
///
/// Nothing reaches either sink unless loading, validation and the metric computations all
/// succeed.
#[instrument(skip_all, fields(input = %config.input.display()))]
pub fn run_analysis(
    config: &AnalysisConfig,
    charts: &mut dyn ChartSink,
    text: &mut dyn TextSink,
) -> Result<PipelineReport> {
    let table = load_table(config)?;
    let validated = ValidatedTable::new(table, config.year_order)?;
    let report = run_pipeline(&validated)?;

    for chart in &report.charts {
        charts.render(chart)?;
    }
    text.emit(&report.observations.block())?;

    info!(rows = report.table.height(), "analysis complete");
    Ok(report)
}
