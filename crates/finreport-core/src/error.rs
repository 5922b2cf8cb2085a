// crates/finreport-core/src/error.rs

use std::path::PathBuf;

use finreport_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("input file not found: {}", .0.display())]
    MissingInputFile(PathBuf),

    #[error("need at least {required} rows to compare years, found {found}")]
    InsufficientRows { required: usize, found: usize },

    #[error("years are not strictly ascending: {0}")]
    UnorderedYears(String),

    #[error("Report parsing failed: {0}")]
    Parser(#[from] ParserError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Output sink failed: {0}")]
    Sink(#[from] SinkError),
}

/// Failures from the chart and text sinks.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
