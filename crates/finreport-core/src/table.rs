use std::collections::HashSet;

use finreport_parser::FinancialTable;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PipelineError, Result};

/// How to treat years that are not strictly ascending. Rows are never reordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Keep file order and log what looks wrong.
    #[default]
    PassThrough,
    /// Refuse tables with decreasing or repeated years.
    Reject,
}

/// Year sequence problems found in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YearOrdering {
    /// `(previous, next)` pairs where the year went backwards.
    pub decreasing: Vec<(i32, i32)>,
    pub duplicates: Vec<i32>,
}

impl YearOrdering {
    pub fn inspect(years: &[i32]) -> Self {
        let mut seen = HashSet::with_capacity(years.len());
        let mut ordering = YearOrdering::default();

        for &year in years {
            if !seen.insert(year) && !ordering.duplicates.contains(&year) {
                ordering.duplicates.push(year);
            }
        }
        for pair in years.windows(2) {
            if pair[1] < pair[0] {
                ordering.decreasing.push((pair[0], pair[1]));
            }
        }

        ordering
    }

    pub fn is_ascending(&self) -> bool {
        self.decreasing.is_empty() && self.duplicates.is_empty()
    }

    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.decreasing.is_empty() {
            let pairs: Vec<String> = self
                .decreasing
                .iter()
                .map(|(prev, next)| format!("{prev} -> {next}"))
                .collect();
            parts.push(format!("decreasing at {}", pairs.join(", ")));
        }
        if !self.duplicates.is_empty() {
            let years: Vec<String> = self.duplicates.iter().map(i32::to_string).collect();
            parts.push(format!("repeated {}", years.join(", ")));
        }
        parts.join("; ")
    }
}

/// A report table that is large enough to compare consecutive years.
#[derive(Debug, Clone)]
pub struct ValidatedTable {
    table: FinancialTable,
    ordering: YearOrdering,
}

impl ValidatedTable {
    pub const MIN_ROWS: usize = 2;

    pub fn new(table: FinancialTable, policy: OrderingPolicy) -> Result<Self> {
        let found = table.height();
        if found < Self::MIN_ROWS {
            return Err(PipelineError::InsufficientRows {
                required: Self::MIN_ROWS,
                found,
            });
        }

        let ordering = YearOrdering::inspect(&table.years()?);
        if !ordering.is_ascending() {
            let description = ordering.describe();
            match policy {
                OrderingPolicy::PassThrough => {
                    warn!(issues = %description, "growth figures follow file order, years are not ascending");
                }
                OrderingPolicy::Reject => return Err(PipelineError::UnorderedYears(description)),
            }
        }

        Ok(Self { table, ordering })
    }

    pub fn df(&self) -> &DataFrame {
        &self.table.df
    }

    pub fn table(&self) -> &FinancialTable {
        &self.table
    }

    pub fn ordering(&self) -> &YearOrdering {
        &self.ordering
    }
}
