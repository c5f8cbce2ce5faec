//! Corpus-based conformance testing.
//!
//! A corpus is a JSON file holding a manifest and a list of test vectors.
//! Each vector names an operation, its input, and the expected result in
//! the form `{"ok": {...}}` or `{"err": {"code": N}}`.

use super::tally::{Outcome, Tally};
use super::{ConformanceError, ConformanceResult};
use crate::config::{Limits, Strategy};
use crate::error::{ErrorCode, PhotonResult};
use crate::field::{LazyMulTable, MulTable, Multiplier, NIBBLE_MASK};
use crate::photon::{
    self, permute, validate_length, State, CAPACITY_BYTES, DIGEST_BYTES, INTERNAL_CONSTANTS,
    MIX_MATRIX, RATE_BYTES, ROUNDS, ROUND_CONSTANTS, SBOX, STATE_BYTES,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Corpus manifest with metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusManifest {
    /// Format version of the corpus file.
    pub format_version: String,
    /// Corpus version.
    pub version: String,
    /// Hash instance the vectors were generated for.
    pub hash: String,
    /// Digest size in bytes.
    pub digest_bytes: usize,
    /// Rate in bytes.
    pub rate_bytes: usize,
    /// Capacity in bytes.
    pub capacity_bytes: usize,
    /// Rounds per permutation.
    pub rounds: usize,
}

impl CorpusManifest {
    /// Check that the manifest describes the instance implemented here.
    pub fn matches_parameters(&self) -> bool {
        self.digest_bytes == DIGEST_BYTES
            && self.rate_bytes == RATE_BYTES
            && self.capacity_bytes == CAPACITY_BYTES
            && self.rounds == ROUNDS
    }
}

/// A corpus containing test vectors.
#[derive(Debug, Clone, Deserialize)]
pub struct Corpus {
    /// Corpus metadata.
    pub manifest: CorpusManifest,
    /// List of test vectors.
    pub vectors: Vec<TestVector>,
}

/// A single test vector.
#[derive(Debug, Clone, Deserialize)]
pub struct TestVector {
    /// Unique identifier for the test.
    pub id: String,
    /// Operation to test (e.g., "photon_hash", "gf16_mul").
    pub op: String,
    /// Input parameters for the operation.
    pub input: Value,
    /// Expected result (success or error).
    pub expected: Value,
}

/// Result of running a single test vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with mismatch.
    Fail {
        /// Expected result from the corpus.
        expected: String,
        /// Actual result from this implementation.
        actual: String,
    },
    /// Test was skipped (operation not known).
    Skip {
        /// Reason for skipping.
        reason: String,
    },
    /// Test errored during execution.
    Error {
        /// Error message.
        message: String,
    },
}

impl TestResult {
    /// Returns true if this is a passing result.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if this is a failing result.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    /// Outcome category, for counting.
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Pass => Outcome::Pass,
            Self::Fail { .. } => Outcome::Fail,
            Self::Skip { .. } => Outcome::Skip,
            Self::Error { .. } => Outcome::Error,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Results from running the corpus.
#[derive(Debug, Default)]
pub struct CorpusResults {
    /// Outcome counts.
    pub tally: Tally,
    /// Detailed results for each test.
    pub details: Vec<(String, TestResult)>,
}

impl CorpusResults {
    /// Create a new empty results container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a test result.
    pub fn record(&mut self, id: &str, result: TestResult) {
        self.tally.record(result.outcome());
        self.details.push((id.to_string(), result));
    }

    /// Returns true if no vector failed or errored.
    pub fn all_passed(&self) -> bool {
        self.tally.all_passed()
    }

    /// Get a summary string of the results.
    pub fn summary(&self) -> String {
        self.tally.to_string()
    }

    /// Get failures only.
    pub fn failures(&self) -> Vec<&(String, TestResult)> {
        self.details.iter().filter(|(_, r)| r.is_fail()).collect()
    }

    /// Get errors only.
    pub fn error_details(&self) -> Vec<&(String, TestResult)> {
        self.details
            .iter()
            .filter(|(_, r)| matches!(r, TestResult::Error { .. }))
            .collect()
    }
}

/// Corpus runner that executes test vectors.
#[derive(Debug, Clone)]
pub struct CorpusRunner {
    corpus: Corpus,
    strategy: Strategy,
    limits: Limits,
}

impl CorpusRunner {
    /// Load corpus from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> ConformanceResult<Self> {
        Self::load_with_limits(path, Limits::default())
    }

    /// Load corpus from a file path, enforcing `limits` on the file size.
    pub fn load_with_limits<P: AsRef<Path>>(path: P, limits: Limits) -> ConformanceResult<Self> {
        // Read at most one byte past the limit so oversized files are never
        // loaded whole.
        let mut bytes = Vec::new();
        fs::File::open(path.as_ref())?
            .take(limits.max_input_size + 1)
            .read_to_end(&mut bytes)?;
        limits.check_input(bytes.len())?;
        let content =
            String::from_utf8(bytes).map_err(|e| ConformanceError::InvalidCorpus(e.to_string()))?;
        let mut runner = Self::from_json(&content)?;
        runner.limits = limits;
        Ok(runner)
    }

    /// Parse a corpus from JSON text.
    pub fn from_json(content: &str) -> ConformanceResult<Self> {
        let corpus: Corpus = serde_json::from_str(content)
            .map_err(|e| ConformanceError::InvalidCorpus(e.to_string()))?;
        Ok(Self::new(corpus))
    }

    /// Wrap an already parsed corpus.
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus,
            strategy: Strategy::default(),
            limits: Limits::default(),
        }
    }

    /// Run hash and permutation vectors with `strategy`.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Get the corpus manifest.
    pub fn manifest(&self) -> &CorpusManifest {
        &self.corpus.manifest
    }

    /// Get the number of test vectors.
    pub fn vector_count(&self) -> usize {
        self.corpus.vectors.len()
    }

    /// Run all test vectors and return results.
    pub fn run_all(&self) -> CorpusResults {
        let mut results = CorpusResults::new();

        for vector in &self.corpus.vectors {
            let result = self.run_vector(vector);
            debug!(id = %vector.id, op = %vector.op, ?result, "ran vector");
            results.record(&vector.id, result);
        }

        info!(strategy = %self.strategy, summary = %results.summary(), "corpus finished");
        results
    }

    /// Run a single test vector.
    pub fn run_vector(&self, vector: &TestVector) -> TestResult {
        match vector.op.as_str() {
            "photon_hash" => self.run_photon_hash(vector),
            "photon_permute" => self.run_photon_permute(vector),
            "photon_params" => run_photon_params(vector),
            "gf16_mul" => self.run_gf16_mul(vector),
            _ => TestResult::Skip {
                reason: format!("Unknown operation: {}", vector.op),
            },
        }
    }

    fn run_photon_hash(&self, vector: &TestVector) -> TestResult {
        let message_hex = match vector.input.get("message").and_then(Value::as_str) {
            Some(h) => h,
            None => return TestResult::error("Missing 'message' in input"),
        };
        let length = vector.input.get("length").and_then(Value::as_i64);

        let result = self.hash_hex(message_hex, length);

        check_expected(&vector.expected, result, |ok| {
            ok.get("digest").and_then(Value::as_str).map(str::to_ascii_lowercase)
        })
    }

    fn hash_hex(&self, message_hex: &str, length: Option<i64>) -> PhotonResult<String> {
        let message = hex::decode(message_hex).map_err(|_| ErrorCode::E103_InvalidHex)?;
        self.limits.check_message(message.len())?;
        let length = match length {
            Some(n) => validate_length(n, message.len())?,
            None => message.len(),
        };
        Ok(photon::hash_with(self.strategy, &message[..length]).to_hex())
    }

    fn run_photon_permute(&self, vector: &TestVector) -> TestResult {
        let state_hex = match vector.input.get("state").and_then(Value::as_str) {
            Some(h) => h,
            None => return TestResult::error("Missing 'state' in input"),
        };

        let result = parse_state(state_hex).map(|mut state| {
            match self.strategy {
                Strategy::Eager => permute(&mut state, MulTable::global()),
                Strategy::Lazy => permute(&mut state, &LazyMulTable::new()),
            }
            state.to_hex()
        });

        check_expected(&vector.expected, result, |ok| {
            ok.get("state").and_then(Value::as_str).map(str::to_ascii_lowercase)
        })
    }

    fn run_gf16_mul(&self, vector: &TestVector) -> TestResult {
        let (a, b) = match (
            vector.input.get("a").and_then(Value::as_u64),
            vector.input.get("b").and_then(Value::as_u64),
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => return TestResult::error("Missing 'a' or 'b' in input"),
        };

        let result = nibble(a).and_then(|a| {
            let b = nibble(b)?;
            let product = match self.strategy {
                Strategy::Eager => MulTable::global().mul(a, b),
                Strategy::Lazy => LazyMulTable::new().mul(a, b),
            };
            Ok(product.to_string())
        });

        check_expected(&vector.expected, result, |ok| {
            ok.get("product").and_then(Value::as_u64).map(|p| p.to_string())
        })
    }
}

/// Compare the parameter tables against the vector's expectation.
fn run_photon_params(vector: &TestVector) -> TestResult {
    let ok = match vector.expected.get("ok") {
        Some(ok) => ok,
        None => return TestResult::error("Expected 'ok' result for parameter test"),
    };

    let actual = json!({
        "digest_bytes": DIGEST_BYTES,
        "rate_bytes": RATE_BYTES,
        "capacity_bytes": CAPACITY_BYTES,
        "rounds": ROUNDS,
        "sbox": SBOX,
        "round_constants": ROUND_CONSTANTS,
        "internal_constants": INTERNAL_CONSTANTS,
        "mix_matrix": MIX_MATRIX,
    });

    if ok == &actual {
        TestResult::Pass
    } else {
        TestResult::Fail {
            expected: ok.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Score `result` against `{"ok": ...}` or `{"err": {"code": N}}`.
fn check_expected<F>(expected: &Value, result: PhotonResult<String>, extract: F) -> TestResult
where
    F: Fn(&Value) -> Option<String>,
{
    if let Some(ok) = expected.get("ok") {
        let expected_value = match extract(ok) {
            Some(v) => v,
            None => return TestResult::error("Invalid 'ok' payload"),
        };
        match result {
            Ok(actual) if actual == expected_value => TestResult::Pass,
            Ok(actual) => TestResult::Fail {
                expected: expected_value,
                actual,
            },
            Err(e) => TestResult::Fail {
                expected: format!("ok: {}", expected_value),
                actual: format!("err: {}", e),
            },
        }
    } else if let Some(err) = expected.get("err") {
        let expected_code = err.get("code").and_then(Value::as_u64).unwrap_or(0) as u32;
        match result {
            Ok(actual) => TestResult::Fail {
                expected: format!("E{}", expected_code),
                actual: format!("ok: {}", actual),
            },
            Err(e) if e.code() == expected_code => TestResult::Pass,
            Err(e) => TestResult::Fail {
                expected: format!("E{}", expected_code),
                actual: format!("E{}", e.code()),
            },
        }
    } else {
        TestResult::error("Invalid expected format")
    }
}

fn parse_state(state_hex: &str) -> PhotonResult<State> {
    let bytes = hex::decode(state_hex).map_err(|_| ErrorCode::E103_InvalidHex)?;
    if bytes.len() != STATE_BYTES {
        return Err(ErrorCode::E104_WrongLength(
            STATE_BYTES.to_string(),
            bytes.len() as u64,
        ));
    }
    let mut arr = [0u8; STATE_BYTES];
    arr.copy_from_slice(&bytes);
    Ok(State::from_bytes(arr))
}

fn nibble(value: u64) -> PhotonResult<u8> {
    if value > NIBBLE_MASK as u64 {
        return Err(ErrorCode::E300_NibbleOutOfRange(value));
    }
    Ok(value as u8)
}
