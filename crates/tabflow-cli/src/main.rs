//! tabflow CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tabflow_cli::commands::{RunRequest, check_pipeline, list_kinds, run_pipeline};
use tabflow_cli::logging::{LogConfig, LogFormat, init_logging};
use tabflow_core::FailurePolicy;
use tabflow_output::{definition_json, write_csv};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{CheckArgs, Cli, Command, LogFormatArg, LogLevelArg, RunArgs};
use crate::summary::{print_kinds, print_operations, print_plan_issues, print_run_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Run(args) => run(args),
        Command::Check(args) => check(args),
        Command::Kinds => {
            print_kinds(&list_kinds());
            Ok(0)
        }
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(args: &RunArgs) -> Result<i32> {
    let request = RunRequest {
        pipeline: args.pipeline.clone(),
        input: args.input.clone(),
        output: args.output.clone(),
        failure_policy: if args.fail_fast {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        },
    };
    let mut report = run_pipeline(&request)?;

    if request.output.is_none() {
        write_csv(&mut report.table, io::stdout().lock()).context("write CSV to stdout")?;
    }
    print_run_summary(&report);
    if let Some(rows) = args.preview {
        eprintln!("{}", report.table.head(Some(rows)));
    }
    Ok(0)
}

/// Exit code 1 when the column plan has issues.
fn check(args: &CheckArgs) -> Result<i32> {
    let outcome = check_pipeline(&args.pipeline, args.input.as_deref())?;
    if args.json {
        let records = outcome
            .pipeline
            .to_records()
            .context("convert pipeline to records")?;
        println!("{}", definition_json(&records)?);
        for issue in &outcome.issues {
            eprintln!("{issue}");
        }
    } else {
        print_operations(&outcome);
        print_plan_issues(&outcome);
    }
    Ok(if outcome.is_clean() { 0 } else { 1 })
}

/// Build logging configuration from CLI flags.
///
/// `--log-level` beats `-v/-q`, and either beats `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config
}
