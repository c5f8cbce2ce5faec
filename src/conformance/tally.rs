//! Pass/fail/skip/error counts shared by the corpus runner and the
//! differential harness.

use std::fmt;

/// Outcome of one conformance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Check passed.
    Pass,
    /// Check ran and disagreed with the expectation.
    Fail,
    /// Check could not be compared.
    Skip,
    /// Check could not be run.
    Error,
}

/// Running counts of conformance outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Number of checks that passed.
    pub passed: usize,
    /// Number of checks that failed.
    pub failed: usize,
    /// Number of checks that were skipped.
    pub skipped: usize,
    /// Number of checks that errored.
    pub errors: usize,
}

impl Tally {
    /// Count one outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Fail => self.failed += 1,
            Outcome::Skip => self.skipped += 1,
            Outcome::Error => self.errors += 1,
        }
    }

    /// Total number of checks counted.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.errors
    }

    /// No failures and no errors. Skips do not count against a run.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} skipped, {} errors (total: {})",
            self.passed,
            self.failed,
            self.skipped,
            self.errors,
            self.total()
        )
    }
}
