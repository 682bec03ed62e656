//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabflow",
    version,
    about = "Apply configurable column transformations to CSV tables",
    long_about = "Apply an ordered pipeline of column transformations, described in a JSON\n\
                  definition, to a CSV table.\n\n\
                  Supported operations: rename_column, sum_columns, count_letter, drop_columns."
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

    /// Log output format (pretty for humans, json for machine parsing).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a pipeline over a CSV table.
    Run(RunArgs),

    /// Build a pipeline and report problems without running it.
    Check(CheckArgs),

    /// List the supported operation kinds.
    Kinds,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Pipeline definition (JSON array of records).
    #[arg(value_name = "PIPELINE")]
    pub pipeline: PathBuf,

    /// Input table (CSV with a header row).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the transformed CSV (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Stop at the first step that fails instead of skipping it.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Print the first N rows of the result.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Pipeline definition (JSON array of records).
    #[arg(value_name = "PIPELINE")]
    pub pipeline: PathBuf,

    /// Check the column plan against this CSV's header.
    #[arg(long = "input", value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Print the bound pipeline as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
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
