//! Live run log and final summary.
//!
//! Every outcome is written and flushed as soon as it is known; the summary
//! block follows once discovery is exhausted.

use std::io;

use termcolor::{Color, ColorSpec, WriteColor};

use crate::discovery::Candidate;
use crate::outcome::{Outcome, RunSummary};

pub struct Reporter<W: WriteColor> {
    out: W,
}

impl<W: WriteColor> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "=== Testing All Franz Examples ===")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn outcome(&mut self, candidate: &Candidate, outcome: &Outcome) -> io::Result<()> {
        let path = candidate.path().display();
        match outcome {
            Outcome::Passed => {
                self.marker("✓ PASS", Color::Green)?;
                writeln!(self.out, ": {}", path)?;
            }
            Outcome::Failed(code) => {
                self.marker("✗ FAIL", Color::Red)?;
                writeln!(self.out, ": {} (exit code: {})", path, code)?;
            }
            Outcome::TimedOut => {
                self.marker("✗ TIMEOUT", Color::Red)?;
                writeln!(self.out, ": {}", path)?;
            }
            Outcome::Skipped(reason) => {
                self.marker("⊘ SKIP", Color::Yellow)?;
                writeln!(self.out, ": {} ({})", path, reason)?;
            }
        }
        self.out.flush()
    }

    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== Summary ===")?;
        writeln!(self.out, "Passed: {}", summary.passed())?;
        writeln!(self.out, "Failed: {}", summary.failed())?;
        writeln!(self.out, "Skipped: {}", summary.skipped())?;
        writeln!(self.out, "Total: {}", summary.total())?;

        writeln!(self.out)?;
        if summary.has_failures() {
            writeln!(self.out, "Failed files:")?;
            for path in summary.failing() {
                writeln!(self.out, "  - {}", path.display())?;
            }
        } else {
            self.out
                .set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(self.out, "✅ All tests passed!")?;
            self.out.reset()?;
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    fn marker(&mut self, text: &str, color: Color) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(self.out, "{}", text)?;
        self.out.reset()
    }
}
