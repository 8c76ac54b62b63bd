//! CLI argument definitions for the `ladder` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ladder",
    version,
    about = "Resolve battle formats and check team legality",
    long_about = "Resolve battle formats into their effective rulesets and check teams\n\
                  against them.\n\n\
                  Formats, rulesets, and banlists come from the compiled-in data unless\n\
                  --data-dir or LADDER_DATA_DIR points at replacement files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory with species/moves/items/abilities CSVs and formats.toml.
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// List every format with its kind, generation, and load status.
    Formats,

    /// Show the effective ruleset of a format.
    Resolve(ResolveArgs),

    /// Check a team file against a format.
    Validate(ValidateArgs),

    /// Print the messages a match in this format starts with.
    Announce(AnnounceArgs),
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Format name or id, e.g. "[Gen 9] OU" or gen9ou.
    #[arg(value_name = "FORMAT")]
    pub format: String,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Format name or id.
    #[arg(value_name = "FORMAT")]
    pub format: String,

    /// Team as a JSON array of sets or as export text.
    #[arg(value_name = "TEAM_FILE")]
    pub team_file: PathBuf,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct AnnounceArgs {
    /// Format name or id.
    #[arg(value_name = "FORMAT")]
    pub format: String,
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
