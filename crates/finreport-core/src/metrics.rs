use polars::prelude::*;

pub const REVENUE_GROWTH_PCT: &str = "revenue_growth_pct";
pub const PROFIT_MARGIN_PCT: &str = "profit_margin_pct";

const PERCENT: f64 = 100.0;

/// Period-over-period change in percent. `None` when the previous value is zero or the
/// quotient overflows.
pub fn growth_pct(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * PERCENT).filter(|value| value.is_finite())
}

/// Profit as a percentage of revenue. `None` when revenue is zero or the quotient overflows.
pub fn margin_pct(profit: f64, revenue: f64) -> Option<f64> {
    if revenue == 0.0 {
        return None;
    }
    Some(profit / revenue * PERCENT).filter(|value| value.is_finite())
}

/// Appends `revenue_growth_pct` and `profit_margin_pct` to a report table.
///
/// Rows are compared in their current order. The first row never has a growth value and any
/// division by zero or overflowing quotient is stored as null rather than an IEEE infinity.
pub fn apply_derived_metrics(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    let len = df.height();

    let revenue = df.column("revenue")?.f64()?;
    let profit = df.column("profit")?.f64()?;

    let mut growth: Vec<Option<f64>> = Vec::with_capacity(len);
    let mut margin: Vec<Option<f64>> = Vec::with_capacity(len);

    for idx in 0..len {
        let current = revenue.get(idx);
        let previous = idx.checked_sub(1).and_then(|prev| revenue.get(prev));

        growth.push(match (previous, current) {
            (Some(previous), Some(current)) => growth_pct(previous, current),
            _ => None,
        });
        margin.push(match (profit.get(idx), current) {
            (Some(profit), Some(revenue)) => margin_pct(profit, revenue),
            _ => None,
        });
    }

    let mut output = df.clone();
    output.hstack_mut(&mut [
        Series::new(REVENUE_GROWTH_PCT.into(), growth).into(),
        Series::new(PROFIT_MARGIN_PCT.into(), margin).into(),
    ])?;

    Ok(output)
}
