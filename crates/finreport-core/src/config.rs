use std::fs;
use std::path::{Path, PathBuf};

use finreport_parser::{CoercionPolicy, ParseOptions};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::plotly::ChartFormat;
use crate::table::OrderingPolicy;

pub const DEFAULT_INPUT: &str = "dummy_financial_report.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "charts";

/// Settings for one analysis run. Every field has a default, so a config file only needs the
/// keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub delimiter: char,
    pub coercion: CoercionPolicy,
    pub year_order: OrderingPolicy,
    pub chart_format: ChartFormat,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            delimiter: ',',
            coercion: CoercionPolicy::ZeroFill,
            year_order: OrderingPolicy::PassThrough,
            chart_format: ChartFormat::Html,
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(contents)?;
        config.parse_options()?;
        Ok(config)
    }

    pub fn parse_options(&self) -> Result<ParseOptions> {
        if !self.delimiter.is_ascii() || self.delimiter == '"' {
            return Err(PipelineError::InvalidConfig(format!(
                "delimiter must be a single ASCII character other than '\"', got {:?}",
                self.delimiter
            )));
        }

        Ok(ParseOptions {
            delimiter: self.delimiter as u8,
            coercion: self.coercion,
        })
    }
}
