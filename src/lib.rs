//! Regression harness for the Franz example suite.
//!
//! Discovers every example under a corpus root, skips the ones that cannot
//! run unattended, executes the rest under the interpreter with a time
//! budget, and reports a pass/fail verdict suitable for CI gating.

pub use crate::errors::HarnessError;

pub mod cli;
pub mod discovery;
pub mod errors;
pub mod execution;
pub mod harness;
pub mod outcome;
pub mod policy;
pub mod report;
pub mod rules;
