//! CLI argument definitions for the dealer training analyzer.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use dtc_cli::logging::{LogConfig, LogFormat};
use dtc_model::MappingKind;

#[derive(Parser)]
#[command(
    name = "dtc",
    version,
    about = "Dealer training compliance - check personnel against role training requirements",
    long_about = "Check dealership personnel against the after-sales and sales training\n\
                  requirements of their positions.\n\n\
                  Reads CSV tables from the resource directory and name mappings from the\n\
                  mapping directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: ./dtc.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding raw.csv, dealers.csv, after/ and sales/.
    #[arg(long = "resources", value_name = "DIR", global = true)]
    pub resources: Option<PathBuf>,

    /// Directory holding the mapping CSV files.
    #[arg(long = "mappings", value_name = "DIR", global = true)]
    pub mappings: Option<PathBuf>,

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

    /// Allow personnel names and codes to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

impl Cli {
    /// Logging setup implied by the flags.
    ///
    /// `--log-level` beats `-v`/`-q`; either one disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let explicit_level = self.log_level.map(LevelFilter::from);
        LogConfig {
            level_filter: explicit_level.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit_level.is_none() && !self.verbosity.is_present(),
            with_ansi: self.ansi_logs(),
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            log_data: self.log_data,
            ..LogConfig::default()
        }
    }

    /// ANSI in logs only when colour is forced, or auto with stderr as a terminal.
    fn ansi_logs(&self) -> bool {
        match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List dealers with their code and authorized vehicle categories.
    Dealers,

    /// List the personnel of a dealer.
    Roster(DealerArgs),

    /// Show sales and after-sales progress of a dealer.
    Summary(SummaryArgs),

    /// Show the training analysis of one person in one position.
    Person(PersonArgs),

    /// Export per-criterion results as one CSV file per dealer.
    Export(ExportArgs),

    /// Inspect or edit the name mappings.
    #[command(subcommand)]
    Mappings(MappingsCommand),
}

#[derive(Args)]
pub struct DealerArgs {
    /// Dealer name as it appears in the personnel table.
    #[arg(value_name = "DEALER")]
    pub dealer: String,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[arg(value_name = "DEALER")]
    pub dealer: String,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct PersonArgs {
    #[arg(value_name = "DEALER")]
    pub dealer: String,

    /// Personnel code.
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Raw position title as listed by `roster`.
    #[arg(value_name = "POSITION")]
    pub position: String,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Export a single dealer (default: every dealer).
    #[arg(long = "dealer", value_name = "DEALER")]
    pub dealer: Option<String>,

    /// Output directory for the CSV files.
    #[arg(long = "output", value_name = "DIR")]
    pub output: PathBuf,
}

#[derive(Subcommand)]
pub enum MappingsCommand {
    /// List raw values of one mapping kind with their current mapping.
    List {
        /// position, vehicle, company, course, dealer-rename or bdc-to-smc.
        #[arg(value_name = "KIND")]
        kind: MappingKind,

        /// Only list values without a mapping.
        #[arg(long = "unmapped")]
        unmapped: bool,

        /// Only list raw values containing this text (case-insensitive).
        #[arg(long = "filter", value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Add or replace one mapping entry and save the table.
    Set {
        #[arg(value_name = "KIND")]
        kind: MappingKind,
        #[arg(value_name = "RAW")]
        raw: String,
        #[arg(value_name = "STANDARD")]
        standard: String,
    },

    /// Remove one mapping entry and save the table.
    Remove {
        #[arg(value_name = "KIND")]
        kind: MappingKind,
        #[arg(value_name = "RAW")]
        raw: String,
    },
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
