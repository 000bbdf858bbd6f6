//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ricap_cli::config::ConfigOverrides;
use ricap_cli::types::OutputFormat;
use ricap_ingest::KeywordLayout;

#[derive(Parser)]
#[command(
    name = "ricap",
    version,
    about = "Keyword coding of child and adolescent psychiatry notes",
    long_about = "Code free-text clinical notes against keyword tables.\n\n\
                  Selects a main illness per admission and discharge diagnosis and\n\
                  one-hot encodes illnesses, referral reasons and symptoms."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow note text in trace-level logs. Note text is PHI.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify a note CSV and write the coded table.
    Classify(ClassifyArgs),

    /// List the categories of the keyword tables.
    Categories(KeywordArgs),
}

/// Where the keyword tables come from.
#[derive(Args, Clone)]
pub struct KeywordArgs {
    /// Config file (default: ./ricap.toml when present).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the keyword tables (env: RICAP_KEYWORDS_DIR).
    #[arg(long = "keywords-dir", value_name = "DIR")]
    pub keywords_dir: Option<PathBuf>,

    /// Illness keyword table.
    #[arg(long = "illness", value_name = "CSV")]
    pub illness: Option<PathBuf>,

    /// Referral reason keyword table.
    #[arg(long = "referral", value_name = "CSV")]
    pub referral: Option<PathBuf>,

    /// Symptom keyword table.
    #[arg(long = "symptom", value_name = "CSV")]
    pub symptom: Option<PathBuf>,

    /// Keyword table layout.
    #[arg(long = "layout", value_enum)]
    pub layout: Option<LayoutArg>,
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Note CSV with ref_reason, chief_complaint, admission_diagnosis and
    /// discharge_diagnosis columns.
    #[arg(value_name = "NOTES_CSV")]
    pub notes: PathBuf,

    #[command(flatten)]
    pub keywords: KeywordArgs,

    /// Ignore keyword; repeat to build the list. Replaces the default list.
    #[arg(long = "ignore", value_name = "KEYWORD")]
    pub ignore: Vec<String>,

    /// Referral category used when no referral reason matches.
    #[arg(long = "fallback", value_name = "NAME")]
    pub fallback: Option<String>,

    /// Output directory for result files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Result files to write.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormatArg,

    /// Classify and summarize without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl KeywordArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            keywords_dir: self.keywords_dir.clone(),
            illness: self.illness.clone(),
            referral: self.referral.clone(),
            symptom: self.symptom.clone(),
            layout: self.layout.map(KeywordLayout::from),
            ..ConfigOverrides::default()
        }
    }
}

impl ClassifyArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            ignore: (!self.ignore.is_empty()).then(|| self.ignore.clone()),
            referral_fallback: self.fallback.clone(),
            ..self.keywords.overrides()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    Columns,
    Rows,
}

impl From<LayoutArg> for KeywordLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Columns => KeywordLayout::Columns,
            LayoutArg::Rows => KeywordLayout::Rows,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Json,
    Both,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Both => OutputFormat::Both,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
