use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::errors::ParserError;
use crate::model::{CoercedCell, CoercionPolicy, CoercionReport, ColumnRole};

/// Parses a money cell. Cells that are empty, unparsable or non-finite become `0.0` under
/// [`CoercionPolicy::ZeroFill`] and are recorded in `report`.
pub fn coerce_money(
    raw: &str,
    role: ColumnRole,
    line_index: usize,
    policy: CoercionPolicy,
    report: &mut CoercionReport,
) -> Result<f64, ParserError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => return Ok(value),
        _ => {}
    }

    match policy {
        CoercionPolicy::ZeroFill => {
            warn!(
                column = %role,
                line = line_index,
                value = trimmed,
                "non-numeric cell coerced to 0"
            );
            report.cells.push(CoercedCell {
                line_index,
                role,
                raw: trimmed.to_string(),
            });
            Ok(0.0)
        }
        CoercionPolicy::Strict => Err(ParserError::DataRow {
            line_index,
            message: format!("column '{role}' value '{trimmed}' is not a finite number"),
        }),
    }
}

/// Parses a four-digit calendar year, the way `%Y` would.
pub fn parse_year(raw: &str, line_index: usize) -> Result<i32, ParserError> {
    let trimmed = raw.trim();
    let invalid = || ParserError::InvalidYear {
        line_index,
        value: trimmed.to_string(),
    };

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let year: i32 = trimmed.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|date| date.year())
        .ok_or_else(invalid)
}
