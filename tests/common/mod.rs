//! Shared fixtures: throwaway example corpora run under `/bin/sh`.
//!
//! Example files are shell snippets, so `exit 2` fails, `exec sleep 30`
//! hangs and `touch <marker>` proves an example was actually executed.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use franz_examples::execution::Interpreter;
use franz_examples::harness::{Harness, HarnessConfig};
use franz_examples::outcome::RunSummary;
use franz_examples::policy::ExclusionRules;
use franz_examples::report::Reporter;
use franz_examples::HarnessError;
use tempfile::TempDir;
use termcolor::NoColor;

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir(dir.path().join("examples")).expect("create examples dir");
        Self { dir }
    }

    pub fn examples(&self) -> PathBuf {
        self.dir.path().join("examples")
    }

    /// A path outside the corpus, for marker files.
    pub fn scratch(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn add(&self, rel: &str, body: &str) -> PathBuf {
        let path = self.examples().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create example subdir");
        }
        fs::write(&path, body).expect("write example");
        path
    }

    /// An example that records that it ran by creating `marker`.
    pub fn add_marking(&self, rel: &str, marker: &Path) -> PathBuf {
        self.add(rel, &format!("touch '{}'\nexit 0\n", marker.display()))
    }

    pub fn config(&self, rules: ExclusionRules, timeout: Duration) -> HarnessConfig {
        HarnessConfig {
            examples_dir: self.examples(),
            interpreter: Interpreter::new("sh", timeout),
            rules,
            ..HarnessConfig::default()
        }
    }
}

/// Runs the harness and returns the summary together with the plain-text log.
pub async fn run(config: HarnessConfig) -> Result<(RunSummary, String), HarnessError> {
    let mut reporter = Reporter::new(NoColor::new(Vec::new()));
    let summary = Harness::new(config).run(&mut reporter).await?;
    let log = String::from_utf8(reporter.into_inner().into_inner()).expect("utf-8 log");
    Ok((summary, log))
}

pub fn lines_starting_with<'a>(log: &'a str, prefix: &str) -> Vec<&'a str> {
    log.lines().filter(|line| line.starts_with(prefix)).collect()
}
