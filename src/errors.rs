//! Harness error taxonomy.
//!
//! Only configuration problems and failures of the harness itself live here.
//! A failing or hanging example is an [`Outcome`](crate::outcome::Outcome),
//! never an error.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Everything that can abort a harness run.
#[derive(Error, Diagnostic, Debug)]
pub enum HarnessError {
    #[error("examples directory '{}' does not exist or is not a directory", path.display())]
    #[diagnostic(
        code(franz_examples::config::missing_corpus),
        help("run from the repository root or pass --examples <DIR>")
    )]
    MissingCorpus { path: PathBuf },

    #[error("examples directory '{}' cannot be read", path.display())]
    #[diagnostic(
        code(franz_examples::config::unreadable_corpus),
        help("check the directory's permissions")
    )]
    UnreadableCorpus {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("interpreter '{}' not found", path.display())]
    #[diagnostic(
        code(franz_examples::config::missing_interpreter),
        help("build the interpreter first or pass --interpreter <PATH>")
    )]
    InterpreterNotFound { path: PathBuf },

    #[error("failed to read rule file '{}'", path.display())]
    #[diagnostic(code(franz_examples::config::rule_file))]
    RuleFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("rule file '{}' is not valid YAML", path.display())]
    #[diagnostic(
        code(franz_examples::config::rule_file_format),
        help("expected a mapping with optional `skip_files` and `skip_patterns` string lists")
    )]
    RuleFileFormat {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("timeout must be greater than zero")]
    #[diagnostic(code(franz_examples::config::timeout))]
    InvalidTimeout,

    #[error("failed to start interpreter '{}'", interpreter.display())]
    #[diagnostic(code(franz_examples::exec::spawn))]
    Spawn {
        interpreter: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("lost track of the interpreter process for '{}'", path.display())]
    #[diagnostic(code(franz_examples::exec::wait))]
    Wait {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start the async runtime")]
    #[diagnostic(code(franz_examples::runtime))]
    Runtime {
        #[source]
        source: io::Error,
    },

    #[error("interrupted")]
    #[diagnostic(code(franz_examples::interrupted))]
    Interrupted,

    #[error("failed to write report")]
    #[diagnostic(code(franz_examples::output))]
    Output {
        #[source]
        source: io::Error,
    },
}

impl HarnessError {
    /// Process exit status for a run aborted by this error.
    ///
    /// `0` and `1` stay reserved for completed runs.
    pub fn exit_status(&self) -> u8 {
        match self {
            HarnessError::Interrupted => 130,
            _ => 2,
        }
    }
}

impl From<io::Error> for HarnessError {
    fn from(source: io::Error) -> Self {
        HarnessError::Output { source }
    }
}
