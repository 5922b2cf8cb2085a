use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use finreport_core::plotly::{ChartFormat, PlotlyFileSink};
use finreport_core::text::WriterSink;
use finreport_core::{run_analysis, AnalysisConfig, OrderingPolicy, PipelineError};
use finreport_parser::CoercionPolicy;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod preview;

/// Yearly revenue, expense and profit analysis
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Delimited report file [default: dummy_financial_report.csv]
    input: Option<PathBuf>,

    /// TOML file with analysis settings; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory that receives the chart files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Field delimiter of the input file
    #[arg(short, long)]
    delimiter: Option<char>,

    /// How charts are written
    #[arg(long, value_enum)]
    chart_format: Option<ChartFormatArg>,

    /// Fail on non-numeric money cells instead of reading them as zero
    #[arg(long)]
    strict: bool,

    /// Fail when years are not strictly ascending
    #[arg(long)]
    reject_unordered: bool,

    /// Print the table with derived metrics after the observations
    #[arg(long)]
    print_table: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChartFormatArg {
    Html,
    Json,
    #[value(name = "none")]
    Skip,
}

impl From<ChartFormatArg> for ChartFormat {
    fn from(value: ChartFormatArg) -> Self {
        match value {
            ChartFormatArg::Html => ChartFormat::Html,
            ChartFormatArg::Json => ChartFormat::Json,
            ChartFormatArg::Skip => ChartFormat::None,
        }
    }
}

impl Cli {
    fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => AnalysisConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(format) = self.chart_format {
            config.chart_format = format.into();
        }
        if self.strict {
            config.coercion = CoercionPolicy::Strict;
        }
        if self.reject_unordered {
            config.year_order = OrderingPolicy::Reject;
        }

        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(PipelineError::MissingInputFile(path)) = err.downcast_ref::<PipelineError>()
            {
                println!("❌ File not found: {}", path.display());
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.analysis_config()?;
    info!(
        input = %config.input.display(),
        output_dir = %config.output_dir.display(),
        chart_format = ?config.chart_format,
        "starting analysis"
    );

    let mut charts = PlotlyFileSink::new(&config.output_dir, config.chart_format);
    let mut text = WriterSink::stdout();
    let report = run_analysis(&config, &mut charts, &mut text)?;

    if cli.print_table {
        let table = preview::render_table(&report.table).context("failed to render table")?;
        println!("\n{table}");
    }

    info!(charts = charts.written().len(), "done");
    Ok(())
}
