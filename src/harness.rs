//! The sequential discover -> filter -> execute -> record pipeline.

use std::path::PathBuf;

use termcolor::WriteColor;
use tracing::{debug, info};

use crate::discovery::{Candidate, Corpus, DEFAULT_EXTENSION};
use crate::errors::HarnessError;
use crate::execution::{Interpreter, Interrupt};
use crate::outcome::{Outcome, RunSummary};
use crate::policy::{ExclusionRules, Verdict};
use crate::report::Reporter;

/// Default location of the example corpus.
pub const DEFAULT_EXAMPLES_DIR: &str = "examples";

/// Everything one run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub examples_dir: PathBuf,
    pub extension: String,
    pub interpreter: Interpreter,
    pub rules: ExclusionRules,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            examples_dir: PathBuf::from(DEFAULT_EXAMPLES_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            interpreter: Interpreter::default(),
            rules: ExclusionRules::builtin(),
        }
    }
}

pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Runs every discovered example once, in discovery order.
    ///
    /// Configuration problems are reported before any outcome. After that,
    /// individual examples can only fail, never abort the run. A Ctrl-C at
    /// any point after the banner aborts without a summary.
    pub async fn run<W: WriteColor>(&self, reporter: &mut Reporter<W>) -> Result<RunSummary, HarnessError> {
        self.config.interpreter.verify()?;
        let corpus = Corpus::open(&self.config.examples_dir, self.config.extension.as_str())?;

        let mut interrupt = Interrupt::install();
        reporter.banner()?;
        let mut summary = RunSummary::new();
        for candidate in corpus.candidates() {
            let outcome = self.process(&candidate, &mut interrupt).await?;
            summary.record(&candidate, &outcome);
            reporter.outcome(&candidate, &outcome)?;
            interrupt.check().await?;
        }

        info!(
            passed = summary.passed(),
            failed = summary.failed(),
            skipped = summary.skipped(),
            total = summary.total(),
            "run finished"
        );
        reporter.summary(&summary)?;
        Ok(summary)
    }

    async fn process(&self, candidate: &Candidate, interrupt: &mut Interrupt) -> Result<Outcome, HarnessError> {
        match self.config.rules.evaluate(candidate) {
            Verdict::Skip(reason) => Ok(Outcome::Skipped(reason)),
            Verdict::Proceed => {
                debug!(path = %candidate.path().display(), "running example");
                self.config.interpreter.execute(candidate, interrupt).await
            }
        }
    }
}
