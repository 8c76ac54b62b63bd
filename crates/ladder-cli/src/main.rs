//! `ladder`: format resolution and team legality from the command line.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use ladder_cli::commands::{
    announce, list_formats, load_catalog, resolve_format, to_json, validate_file,
};
use ladder_cli::logging::{LogConfig, LogFormat, init_logging};
use ladder_standards::StandardsConfig;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_announcements, print_formats, print_ruleset, print_validation};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = StandardsConfig {
        data_dir: cli.data_dir.clone(),
    };
    let catalog = load_catalog(&config)?;
    match &cli.command {
        Command::Formats => {
            print_formats(&list_formats(&catalog));
            Ok(0)
        }
        Command::Resolve(args) => {
            let report = resolve_format(&catalog, &args.format)?;
            if args.json {
                println!("{}", to_json(&report)?);
            } else {
                print_ruleset(&report);
            }
            Ok(0)
        }
        Command::Validate(args) => {
            let report = validate_file(&catalog, &args.format, &args.team_file)?;
            if args.json {
                println!("{}", to_json(&report)?);
            } else {
                print_validation(&report);
            }
            Ok(if report.is_legal() { 0 } else { 1 })
        }
        Command::Announce(args) => {
            print_announcements(&announce(&catalog, &args.format)?);
            Ok(0)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
