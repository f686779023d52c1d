//! Exclusion policy: decides which examples must not be run unattended.
//!
//! Two independent tiers, checked in order:
//! 1. exact basename membership (a specific file loops forever, reads stdin,
//!    or sleeps on purpose)
//! 2. substring anywhere in the path (a whole category is intentionally not
//!    a positive test, e.g. `failing` or `circular`)

use std::fmt;

use tracing::debug;

use crate::discovery::Candidate;

/// Examples that never terminate, wait for input, or are timed on purpose.
pub const DEFAULT_SKIP_FILES: &[&str] = &[
    // infinite / animated
    "10-print.franz",
    "game-of-life.franz",
    "cube.franz",
    "fish.franz",
    "car.franz",
    // interactive, read stdin
    "collatz.franz",
    "factorial.franz",
    "gcd.franz",
    "geometric-mean.franz",
    "pig-latin.franz",
    "split.franz",
    // timed
    "countdown.franz",
];

/// Path fragments marking examples that are expected to fail.
pub const DEFAULT_SKIP_PATTERNS: &[&str] = &["failing", "circular"];

/// The two rule collections. Order is preserved and duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRules {
    skip_files: Vec<String>,
    skip_patterns: Vec<String>,
}

impl ExclusionRules {
    /// An empty rule set: every candidate proceeds.
    pub fn none() -> Self {
        Self::default()
    }

    /// The rule set shipped with the repository.
    pub fn builtin() -> Self {
        Self::new(
            DEFAULT_SKIP_FILES.iter().copied(),
            DEFAULT_SKIP_PATTERNS.iter().copied(),
        )
    }

    pub fn new<F, P>(skip_files: F, skip_patterns: P) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let mut rules = Self::none();
        rules.extend_files(skip_files);
        rules.extend_patterns(skip_patterns);
        rules
    }

    pub fn extend_files<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        push_unique(&mut self.skip_files, names);
    }

    pub fn extend_patterns<I>(&mut self, patterns: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        push_unique(&mut self.skip_patterns, patterns);
    }

    pub fn skip_files(&self) -> &[String] {
        &self.skip_files
    }

    pub fn skip_patterns(&self) -> &[String] {
        &self.skip_patterns
    }

    /// Classifies one candidate. Total and side-effect free.
    pub fn evaluate(&self, candidate: &Candidate) -> Verdict {
        if self.skip_files.iter().any(|name| name == candidate.basename()) {
            debug!(path = %candidate.path().display(), "skip: basename is listed");
            return Verdict::Skip(SkipReason::ExcludedByName);
        }

        let path = candidate.path_str();
        if let Some(pattern) = self.skip_patterns.iter().find(|p| path.contains(p.as_str())) {
            debug!(path = %path, %pattern, "skip: path matches pattern");
            return Verdict::Skip(SkipReason::ExcludedByPattern);
        }

        Verdict::Proceed
    }
}

fn push_unique<I>(into: &mut Vec<String>, items: I)
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    for item in items {
        let item = item.into();
        if !into.contains(&item) {
            into.push(item);
        }
    }
}

/// Why a candidate was not executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ExcludedByName,
    ExcludedByPattern,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ExcludedByName => f.write_str("excluded by name"),
            SkipReason::ExcludedByPattern => f.write_str("excluded by pattern"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Skip(SkipReason),
    Proceed,
}
