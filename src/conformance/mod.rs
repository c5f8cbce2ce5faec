//! Conformance tooling: golden-vector corpus and differential testing.
//!
//! The corpus pins digests captured from the reference implementation. The
//! differential harness runs the same messages through two implementations
//! (for example the eager and lazy multipliers, or an external executable)
//! and reports the first disagreement with enough context to reproduce it.

pub mod corpus;
mod harness;
mod repro;
mod runner;
mod tally;

pub use corpus::{Corpus, CorpusManifest, CorpusResults, CorpusRunner, TestResult, TestVector};
pub use harness::{BatchResult, DiffResult, DiffTestHarness, ErrorDetail, FailureDetail};
pub use repro::ReproBundle;
pub use runner::{CommandRunner, OracleOutput, OracleRunner, RustRunner};
pub use tally::{Outcome, Tally};

use crate::error::ErrorCode;
use thiserror::Error;

/// Result type for conformance operations.
pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors that can occur during conformance testing.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// External implementation not available
    #[error("reference implementation not available: {0}")]
    ReferenceNotAvailable(String),
    /// Failed to run the external implementation
    #[error("reference execution failed: {0}")]
    ReferenceExecutionFailed(String),
    /// Failed to parse the external implementation's output
    #[error("failed to parse reference output: {0}")]
    ReferenceOutputParseError(String),
    /// Corpus file could not be parsed
    #[error("invalid corpus: {0}")]
    InvalidCorpus(String),
    /// Error reported by this crate
    #[error("photon error: {0}")]
    Photon(#[from] ErrorCode),
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
