//! CLI argument definitions for the SICI toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sici_core::Mode;

#[derive(Parser)]
#[command(
    name = "sici",
    version,
    about = "SICI toolkit - parse, validate and check Serial Item and Contribution Identifiers",
    long_about = "Parse, validate and serialize Serial Item and Contribution Identifiers\n\
                  (ANSI/NISO Z39.56).\n\n\
                  Validation is advisory: non-conforming identifiers are still parsed and\n\
                  canonicalized, with every violation reported per segment and attribute."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Parse identifiers and report validity, round-trip fidelity and
    /// conformance problems.
    Parse(ParseArgs),

    /// Compute the check character for identifier prefixes.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Identifiers to parse.
    #[arg(value_name = "SICI")]
    pub identifiers: Vec<String>,

    /// Read additional identifiers from a file, one per line.
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Operating mode. Strict mode treats empty input, unsupported
    /// versions and non-conforming results as errors.
    #[arg(long = "mode", value_enum, default_value = "lax")]
    pub mode: ModeArg,

    /// Emit results as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Identifier prefixes (everything before the final hyphen).
    #[arg(value_name = "PREFIX", required = true)]
    pub prefixes: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Strict,
    Lax,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Strict => Mode::Strict,
            ModeArg::Lax => Mode::Lax,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
