//! Differential test harness comparing two digest runners.

use super::repro::ReproBundle;
use super::runner::{OracleOutput, OracleRunner, RustRunner};
use super::tally::{Outcome, Tally};
use super::{ConformanceError, ConformanceResult};
use crate::config::Strategy;
use tracing::{debug, warn};

/// Result of a differential test.
#[derive(Debug)]
pub enum DiffResult {
    /// Both runners produced the same output.
    Match {
        /// The matching output value.
        value: String,
    },
    /// Runners produced different outputs.
    Mismatch {
        /// Primary output.
        primary: OracleOutput,
        /// Secondary output.
        secondary: OracleOutput,
        /// Repro bundle for debugging.
        repro: ReproBundle,
    },
    /// No secondary runner configured.
    SecondaryUnavailable,
}

impl DiffResult {
    /// Check if the result is a match.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    /// Check if the result is a mismatch.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }
}

/// Differential test harness.
pub struct DiffTestHarness {
    primary: Box<dyn OracleRunner>,
    secondary: Option<Box<dyn OracleRunner>>,
}

impl DiffTestHarness {
    /// Compare `primary` against `secondary`.
    pub fn new(primary: Box<dyn OracleRunner>, secondary: Option<Box<dyn OracleRunner>>) -> Self {
        Self { primary, secondary }
    }

    /// Harness with only the eager Rust runner (for unit testing).
    pub fn rust_only() -> Self {
        Self::new(Box::new(RustRunner::new(Strategy::Eager)), None)
    }

    /// Eager table against lazy table.
    pub fn eager_vs_lazy() -> Self {
        Self::new(
            Box::new(RustRunner::new(Strategy::Eager)),
            Some(Box::new(RustRunner::new(Strategy::Lazy))),
        )
    }

    /// Check if a secondary runner is configured.
    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    /// Run only the primary runner.
    pub fn run_primary(&self, message: &[u8]) -> ConformanceResult<OracleOutput> {
        self.primary.compute_hash(message)
    }

    /// Hash `message` with both runners and compare the outputs.
    pub fn compare_hash(&self, test_name: &str, message: &[u8]) -> ConformanceResult<DiffResult> {
        let primary_output = self.primary.compute_hash(message)?;

        let secondary = match &self.secondary {
            Some(r) => r,
            None => return Ok(DiffResult::SecondaryUnavailable),
        };

        let secondary_output = secondary.compute_hash(message)?;

        if primary_output == secondary_output {
            debug!(test = test_name, value = primary_output.as_string(), "outputs match");
            Ok(DiffResult::Match {
                value: primary_output.as_string().to_string(),
            })
        } else {
            warn!(
                test = test_name,
                primary = primary_output.as_string(),
                secondary = secondary_output.as_string(),
                "outputs differ"
            );
            let repro = ReproBundle::new(
                test_name.to_string(),
                hex::encode(message),
                self.primary.name().to_string(),
                primary_output.clone(),
                secondary.name().to_string(),
                secondary_output.clone(),
            );

            Ok(DiffResult::Mismatch {
                primary: primary_output,
                secondary: secondary_output,
                repro,
            })
        }
    }

    /// Run a batch of differential tests.
    pub fn run_batch<'a>(&self, tests: impl Iterator<Item = (&'a str, &'a [u8])>) -> BatchResult {
        let mut results = BatchResult::new();

        for (name, message) in tests {
            match self.compare_hash(name, message) {
                Ok(DiffResult::Match { .. }) => results.record_pass(),
                Ok(DiffResult::Mismatch {
                    primary,
                    secondary,
                    repro,
                }) => results.record_fail(name, primary, secondary, repro),
                Ok(DiffResult::SecondaryUnavailable) => results.record_skip(),
                Err(e) => results.record_error(name, e),
            }
        }

        results
    }
}

/// Results from running a batch of differential tests.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Outcome counts.
    pub tally: Tally,
    /// Details of failures.
    pub failures: Vec<FailureDetail>,
    /// Details of errors.
    pub error_details: Vec<ErrorDetail>,
}

/// Details about a test failure.
#[derive(Debug)]
pub struct FailureDetail {
    /// Test name.
    pub name: String,
    /// Primary output.
    pub primary: OracleOutput,
    /// Secondary output.
    pub secondary: OracleOutput,
    /// Repro bundle.
    pub repro: ReproBundle,
}

/// Details about a test error.
#[derive(Debug)]
pub struct ErrorDetail {
    /// Test name.
    pub name: String,
    /// Error that occurred.
    pub error: ConformanceError,
}

impl BatchResult {
    /// Create a new empty batch result.
    pub fn new() -> Self {
        Self::default()
    }

    fn record_pass(&mut self) {
        self.tally.record(Outcome::Pass);
    }

    fn record_fail(
        &mut self,
        name: &str,
        primary: OracleOutput,
        secondary: OracleOutput,
        repro: ReproBundle,
    ) {
        self.tally.record(Outcome::Fail);
        self.failures.push(FailureDetail {
            name: name.to_string(),
            primary,
            secondary,
            repro,
        });
    }

    fn record_skip(&mut self) {
        self.tally.record(Outcome::Skip);
    }

    fn record_error(&mut self, name: &str, error: ConformanceError) {
        self.tally.record(Outcome::Error);
        self.error_details.push(ErrorDetail {
            name: name.to_string(),
            error,
        });
    }

    /// Check if all tests passed.
    pub fn all_passed(&self) -> bool {
        self.tally.all_passed()
    }

    /// Format a summary string.
    pub fn summary(&self) -> String {
        self.tally.to_string()
    }
}
