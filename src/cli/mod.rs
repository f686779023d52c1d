//! The example harness command-line interface.
//!
//! Parses arguments, assembles a [`HarnessConfig`], drives the run on a
//! single-threaded runtime and turns the result into a process exit code.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use termcolor::StandardStream;

use crate::errors::HarnessError;
use crate::execution::Interpreter;
use crate::harness::{Harness, HarnessConfig};
use crate::outcome::RunSummary;
use crate::policy::ExclusionRules;
use crate::report::Reporter;
use crate::rules::load_rules;

pub mod args;
pub mod logging;

use args::HarnessArgs;

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = HarnessArgs::parse();
    logging::init_tracing(args.verbose);

    match execute(args) {
        Ok(summary) => summary.exit_code(),
        Err(e) => {
            let status = e.exit_status();
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::from(status)
        }
    }
}

fn execute(args: HarnessArgs) -> Result<RunSummary, HarnessError> {
    let color = args.color.choice();
    let config = build_config(args)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| HarnessError::Runtime { source })?;

    let harness = Harness::new(config);
    let mut reporter = Reporter::new(StandardStream::stdout(color));
    runtime.block_on(harness.run(&mut reporter))
}

/// Resolves flags, environment and rule file into one configuration value.
pub fn build_config(args: HarnessArgs) -> Result<HarnessConfig, HarnessError> {
    let mut rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => ExclusionRules::builtin(),
    };
    rules.extend_files(args.skip_files);
    rules.extend_patterns(args.skip_patterns);

    Ok(HarnessConfig {
        examples_dir: args.examples_dir,
        extension: args.extension,
        interpreter: Interpreter::new(args.interpreter, Duration::from_secs(args.timeout)),
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(argv: &[&str]) -> HarnessArgs {
        HarnessArgs::try_parse_from(std::iter::once("franz-examples").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn skip_flags_extend_builtin_rules() {
        let config = build_config(parse(&["--skip", "slow.franz", "--skip-pattern", "wip"])).unwrap();
        assert!(config.rules.skip_files().iter().any(|f| f == "cube.franz"));
        assert!(config.rules.skip_files().iter().any(|f| f == "slow.franz"));
        assert_eq!(config.rules.skip_patterns(), ["failing", "circular", "wip"]);
    }

    #[test]
    fn rule_file_replaces_builtin_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        fs::write(&path, "skip_files: [only.franz]\n").unwrap();

        let path = path.to_string_lossy().into_owned();
        let config = build_config(parse(&["--rules", &path, "--skip-pattern", "wip"])).unwrap();
        assert_eq!(config.rules.skip_files(), ["only.franz"]);
        assert_eq!(config.rules.skip_patterns(), ["wip"]);
    }

    #[test]
    fn timeout_flag_sets_budget() {
        let config = build_config(parse(&["--timeout", "3", "--interpreter", "sh"])).unwrap();
        assert_eq!(config.interpreter.timeout(), Duration::from_secs(3));
        assert_eq!(config.interpreter.program(), std::path::Path::new("sh"));
    }
}
