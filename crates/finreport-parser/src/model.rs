use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// The four columns every report must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Year,
    Revenue,
    Expenses,
    Profit,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 4] = [
        ColumnRole::Year,
        ColumnRole::Revenue,
        ColumnRole::Expenses,
        ColumnRole::Profit,
    ];

    /// Column name used in the table DataFrame.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            ColumnRole::Year => "year",
            ColumnRole::Revenue => "revenue",
            ColumnRole::Expenses => "expenses",
            ColumnRole::Profit => "profit",
        }
    }

    /// Leading tokens a normalized header may start with for this role.
    pub(crate) fn tokens(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::Year => &["year"],
            ColumnRole::Revenue => &["revenue"],
            ColumnRole::Expenses => &["expenses", "expense"],
            ColumnRole::Profit => &["profit"],
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// What to do with a money cell that does not hold a finite number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Replace the cell with `0.0` and keep the row.
    #[default]
    ZeroFill,
    /// Reject the file.
    Strict,
}

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub delimiter: u8,
    pub coercion: CoercionPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            coercion: CoercionPolicy::default(),
        }
    }
}

/// Where a role was found in the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColumn {
    pub role: ColumnRole,
    pub index: usize,
    pub label: String,
    /// Text inside the trailing parentheses, e.g. `million_usd`.
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnLayout {
    pub year: ResolvedColumn,
    pub revenue: ResolvedColumn,
    pub expenses: ResolvedColumn,
    pub profit: ResolvedColumn,
}

impl ColumnLayout {
    pub fn get(&self, role: ColumnRole) -> &ResolvedColumn {
        match role {
            ColumnRole::Year => &self.year,
            ColumnRole::Revenue => &self.revenue,
            ColumnRole::Expenses => &self.expenses,
            ColumnRole::Profit => &self.profit,
        }
    }

    pub fn unit(&self, role: ColumnRole) -> Option<&str> {
        self.get(role).unit.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoercedCell {
    pub line_index: usize,
    pub role: ColumnRole,
    pub raw: String,
}

/// Cells replaced by zero while reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoercionReport {
    pub cells: Vec<CoercedCell>,
}

impl CoercionReport {
    pub fn total(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn count_for(&self, role: ColumnRole) -> usize {
        self.cells.iter().filter(|cell| cell.role == role).count()
    }
}

/// A parsed report: one row per year in file order.
#[derive(Debug, Clone)]
pub struct FinancialTable {
    pub df: DataFrame,
    pub layout: ColumnLayout,
    pub coercions: CoercionReport,
}

impl FinancialTable {
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn years(&self) -> Result<Vec<i32>, PolarsError> {
        let years = self.df.column(ColumnRole::Year.canonical_name())?.i32()?;
        Ok(years.into_iter().flatten().collect())
    }
}
