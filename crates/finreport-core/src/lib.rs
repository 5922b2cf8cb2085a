pub mod charts;
pub mod config;
pub mod error;
pub mod metrics;
pub mod observations;
pub mod pipeline;
pub mod plotly;
pub mod table;
pub mod text;

pub use config::AnalysisConfig;
pub use error::{PipelineError, Result, SinkError};
pub use pipeline::{load_table, run_analysis, run_pipeline, PipelineReport};
pub use table::{OrderingPolicy, ValidatedTable};
