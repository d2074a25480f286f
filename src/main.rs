use std::path::PathBuf;

use absence_tools::config::{DEFAULT_OUTPUT_FILE, MonthLabels, SummaryConfig, WindowMode};
use absence_tools::report;
use absence_tools::{Result, SummaryError};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| SummaryError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Summarize(args) => execute_summarize(args),
        Command::DefaultConfig(args) => execute_default_config(args),
    }
}

fn execute_summarize(args: SummarizeArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(SummaryError::MissingInput(args.input));
    }

    let mut config = match &args.config {
        Some(path) => SummaryConfig::from_json_file(path)?,
        None => SummaryConfig::default(),
    };
    args.apply_overrides(&mut config)?;
    config.validate()?;

    let report = report::summarize_file(&args.input, &args.output, &config)?;
    report.diagnostics.log();

    if let Some(path) = &args.diagnostics {
        report.write_diagnostics(path)?;
    }
    Ok(())
}

fn execute_default_config(args: DefaultConfigArgs) -> Result<()> {
    let json = serde_json::to_string_pretty(&SummaryConfig::default())?;
    match args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Summarise employee absence days per month with trailing-window totals."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the absence summary workbook from a leave export.
    Summarize(SummarizeArgs),
    /// Print the default configuration as JSON.
    DefaultConfig(DefaultConfigArgs),
}

#[derive(clap::Args)]
struct SummarizeArgs {
    /// Input file path (.xlsx, .xlsm or .csv).
    #[arg(long)]
    input: PathBuf,

    /// Output workbook path.
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Optional JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worksheet to read from a workbook input. Defaults to the first sheet.
    #[arg(long)]
    sheet: Option<String>,

    /// How the last 3 / last 6 month totals are computed.
    #[arg(long, value_enum)]
    window_mode: Option<WindowModeKind>,

    /// Reference date for rolling windows (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<String>,

    /// Header style of the month columns.
    #[arg(long, value_enum)]
    month_labels: Option<MonthLabelsKind>,

    /// Absence type to count. Repeat to build the allow-list; replaces the
    /// configured list.
    #[arg(long = "absence-type")]
    absence_types: Vec<String>,

    /// Write the diagnostics report as JSON to this path.
    #[arg(long)]
    diagnostics: Option<PathBuf>,
}

#[derive(clap::Args)]
struct DefaultConfigArgs {
    /// Write to this path instead of standard output.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum WindowModeKind {
    Calendar,
    Rolling,
}

impl From<WindowModeKind> for WindowMode {
    fn from(kind: WindowModeKind) -> Self {
        match kind {
            WindowModeKind::Calendar => WindowMode::Calendar,
            WindowModeKind::Rolling => WindowMode::Rolling,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MonthLabelsKind {
    Abbreviated,
    Numeric,
}

impl From<MonthLabelsKind> for MonthLabels {
    fn from(kind: MonthLabelsKind) -> Self {
        match kind {
            MonthLabelsKind::Abbreviated => MonthLabels::Abbreviated,
            MonthLabelsKind::Numeric => MonthLabels::Numeric,
        }
    }
}

impl SummarizeArgs {
    fn apply_overrides(&self, config: &mut SummaryConfig) -> Result<()> {
        if let Some(sheet) = &self.sheet {
            config.sheet = Some(sheet.clone());
        }
        if let Some(mode) = self.window_mode {
            config.window_mode = mode.into();
        }
        if let Some(labels) = self.month_labels {
            config.month_labels = labels.into();
        }
        if let Some(as_of) = &self.as_of {
            let date = NaiveDate::parse_from_str(as_of.trim(), "%Y-%m-%d")
                .map_err(|_| SummaryError::InvalidDate(as_of.clone()))?;
            config.as_of = Some(date);
        }
        if !self.absence_types.is_empty() {
            config.absence_types = self.absence_types.clone();
        }
        Ok(())
    }
}
