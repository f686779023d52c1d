use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::discovery::Candidate;
use crate::policy::SkipReason;

/// Classified result of processing one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// Nonzero exit. A child killed by a signal carries the negated signal
    /// number.
    Failed(i32),
    TimedOut,
    Skipped(SkipReason),
}

impl Outcome {
    /// Nonzero exits and timeouts both count as failures.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_) | Outcome::TimedOut)
    }
}

/// Counters and failing files for one harness invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    passed: usize,
    failed: usize,
    skipped: usize,
    failing: Vec<PathBuf>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, candidate: &Candidate, outcome: &Outcome) {
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed(_) | Outcome::TimedOut => {
                self.failed += 1;
                self.failing.push(candidate.path().to_path_buf());
            }
            Outcome::Skipped(_) => self.skipped += 1,
        }
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// Paths of failed and timed-out candidates, in discovery order.
    pub fn failing(&self) -> impl ExactSizeIterator<Item = &Path> {
        self.failing.iter().map(PathBuf::as_path)
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// `0` iff nothing failed, `1` otherwise.
    pub fn exit_status(&self) -> u8 {
        u8::from(self.has_failures())
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_outcome_kind() {
        let mut summary = RunSummary::new();
        let outcomes = [
            ("a.franz", Outcome::Passed),
            ("b.franz", Outcome::Failed(2)),
            ("c.franz", Outcome::Skipped(SkipReason::ExcludedByName)),
            ("d.franz", Outcome::TimedOut),
            ("e.franz", Outcome::Skipped(SkipReason::ExcludedByPattern)),
            ("f.franz", Outcome::Passed),
        ];
        for (seen, (path, outcome)) in outcomes.iter().enumerate() {
            summary.record(&Candidate::new(*path), outcome);
            assert_eq!(summary.total(), seen + 1);
            assert_eq!(
                summary.total(),
                summary.passed() + summary.failed() + summary.skipped()
            );
        }
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.failed(), 2);
        assert_eq!(summary.skipped(), 2);
    }

    #[test]
    fn failing_list_keeps_discovery_order_and_includes_timeouts() {
        let mut summary = RunSummary::new();
        summary.record(&Candidate::new("z.franz"), &Outcome::TimedOut);
        summary.record(&Candidate::new("ok.franz"), &Outcome::Passed);
        summary.record(&Candidate::new("a.franz"), &Outcome::Failed(1));
        let failing: Vec<_> = summary.failing().collect();
        assert_eq!(failing, [Path::new("z.franz"), Path::new("a.franz")]);
    }

    #[test]
    fn exit_code_follows_failure_count() {
        let mut summary = RunSummary::new();
        summary.record(&Candidate::new("s.franz"), &Outcome::Skipped(SkipReason::ExcludedByName));
        assert!(!summary.has_failures());
        assert_eq!(summary.exit_status(), 0);

        summary.record(&Candidate::new("t.franz"), &Outcome::TimedOut);
        assert!(summary.has_failures());
        assert_eq!(summary.exit_status(), 1);
    }

    #[test]
    fn timeout_and_exit_failure_stay_distinct() {
        assert!(Outcome::TimedOut.is_failure());
        assert!(Outcome::Failed(3).is_failure());
        assert_ne!(Outcome::TimedOut, Outcome::Failed(3));
        assert!(!Outcome::Skipped(SkipReason::ExcludedByPattern).is_failure());
    }
}
