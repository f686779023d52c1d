//! Defines the command-line arguments for the example harness.
//!
//! Every argument is optional: a bare invocation from the repository root
//! runs `./franz` over `examples/` with the built-in exclusion rules.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use termcolor::ColorChoice;

use crate::discovery::DEFAULT_EXTENSION;
use crate::execution::DEFAULT_INTERPRETER;
use crate::harness::DEFAULT_EXAMPLES_DIR;

#[derive(Debug, Parser)]
#[command(
    name = "franz-examples",
    version,
    about = "Run every Franz example through the interpreter and report pass/fail."
)]
pub struct HarnessArgs {
    /// Directory searched recursively for example files.
    #[arg(long = "examples", value_name = "DIR", env = "FRANZ_EXAMPLES_DIR", default_value = DEFAULT_EXAMPLES_DIR)]
    pub examples_dir: PathBuf,

    /// Interpreter executable; receives each example path as its only argument.
    #[arg(long, value_name = "PATH", env = "FRANZ_INTERPRETER", default_value = DEFAULT_INTERPRETER)]
    pub interpreter: PathBuf,

    /// Extension of example files, without the dot.
    #[arg(long, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Seconds each example may run before it is killed.
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Skip examples with this exact file name (repeatable).
    #[arg(long = "skip", value_name = "NAME", action = ArgAction::Append)]
    pub skip_files: Vec<String>,

    /// Skip examples whose path contains this text (repeatable).
    #[arg(long = "skip-pattern", value_name = "TEXT", action = ArgAction::Append)]
    pub skip_patterns: Vec<String>,

    /// YAML file replacing the built-in exclusion rules.
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// When to colour outcome markers.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Raise diagnostic logging on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}
