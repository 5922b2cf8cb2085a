use polars::prelude::PolarsError;
use thiserror::Error;

use crate::model::ColumnRole;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("required column '{0}' not found in header row")]
    MissingColumn(ColumnRole),

    #[error("headers {first} and {second} both normalize to '{label}'")]
    DuplicateColumn {
        label: String,
        first: usize,
        second: usize,
    },

    #[error("columns '{first}' and '{second}' both look like the {role} column")]
    AmbiguousColumn {
        role: ColumnRole,
        first: String,
        second: String,
    },

    #[error("data row {line_index} has invalid year '{value}'")]
    InvalidYear { line_index: usize, value: String },

    #[error("data row {line_index} invalid: {message}")]
    DataRow { line_index: usize, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error("file did not contain a header row")]
    EmptyData,
}
