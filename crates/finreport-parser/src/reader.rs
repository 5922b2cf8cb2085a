use csv::ReaderBuilder;
use polars::prelude::*;
use tracing::{debug, info};

use crate::coerce::{coerce_money, parse_year};
use crate::errors::ParserError;
use crate::model::{CoercionReport, ColumnRole, FinancialTable, ParseOptions};
use crate::schema::{normalize_headers, resolve_columns};

/// Parses the full text of a delimited report into a [`FinancialTable`].
///
/// Rows keep file order. Money cells go through [`coerce_money`] with the configured policy;
/// years must parse.
pub fn parse_financial_report(
    content: &str,
    options: &ParseOptions,
) -> Result<FinancialTable, ParserError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(content.as_bytes());

    let raw_headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ParserError::EmptyData);
    }

    let labels = normalize_headers(&raw_headers)?;
    let layout = resolve_columns(&labels)?;
    debug!(?labels, "resolved report columns");

    let mut years: Vec<i32> = Vec::new();
    let mut revenue: Vec<f64> = Vec::new();
    let mut expenses: Vec<f64> = Vec::new();
    let mut profit: Vec<f64> = Vec::new();
    let mut coercions = CoercionReport::default();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let line_index = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(row_idx + 2);
        let cell = |role: ColumnRole| record.get(layout.get(role).index).unwrap_or("");

        years.push(parse_year(cell(ColumnRole::Year), line_index)?);

        let mut money = |role: ColumnRole| {
            coerce_money(cell(role), role, line_index, options.coercion, &mut coercions)
        };
        revenue.push(money(ColumnRole::Revenue)?);
        expenses.push(money(ColumnRole::Expenses)?);
        profit.push(money(ColumnRole::Profit)?);
    }

    let df = DataFrame::new(vec![
        Series::new(ColumnRole::Year.canonical_name().into(), years).into(),
        Series::new(ColumnRole::Revenue.canonical_name().into(), revenue).into(),
        Series::new(ColumnRole::Expenses.canonical_name().into(), expenses).into(),
        Series::new(ColumnRole::Profit.canonical_name().into(), profit).into(),
    ])?;

    info!(
        rows = df.height(),
        coerced_cells = coercions.total(),
        "parsed financial report"
    );

    Ok(FinancialTable {
        df,
        layout,
        coercions,
    })
}
