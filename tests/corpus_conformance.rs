//! Corpus-based conformance tests.
//!
//! These tests run all vectors from `corpus/photon128.json` and verify the
//! Rust implementation reproduces the pinned results under both multiplier
//! strategies.

use photon128::conformance::{ConformanceError, CorpusResults, CorpusRunner, TestResult};
use photon128::{ErrorCode, Limits, Strategy};
use std::path::{Path, PathBuf};

/// Path to the corpus file relative to the project root.
const CORPUS_PATH: &str = "corpus/photon128.json";

fn corpus_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(CORPUS_PATH)
}

fn run_corpus(strategy: Strategy) -> CorpusResults {
    CorpusRunner::load(corpus_path())
        .expect("Failed to load corpus")
        .with_strategy(strategy)
        .run_all()
}

fn print_problems(results: &CorpusResults) {
    for (id, result) in results.failures() {
        if let TestResult::Fail { expected, actual } = result {
            println!("  {} - expected: {}, actual: {}", id, expected, actual);
        }
    }
    for (id, result) in results.error_details() {
        if let TestResult::Error { message } = result {
            println!("  {} - {}", id, message);
        }
    }
}

/// Load and run the full corpus with the eager table.
#[test]
fn test_full_corpus_eager() {
    let results = run_corpus(Strategy::Eager);

    println!("\n=== Corpus Conformance Results (eager) ===");
    println!("{}", results.summary());
    print_problems(&results);

    assert!(
        results.all_passed(),
        "Corpus conformance failed: {}",
        results.summary()
    );
    assert_eq!(results.tally.skipped, 0, "every corpus op should be understood");
}

/// Load and run the full corpus with the lazy table.
#[test]
fn test_full_corpus_lazy() {
    let results = run_corpus(Strategy::Lazy);
    print_problems(&results);
    assert!(
        results.all_passed(),
        "Corpus conformance failed: {}",
        results.summary()
    );
}

/// Test that we can load the corpus manifest.
#[test]
fn test_corpus_manifest() {
    let runner = CorpusRunner::load(corpus_path()).expect("Failed to load corpus");
    let manifest = runner.manifest();

    assert_eq!(manifest.format_version, "1");
    assert_eq!(manifest.hash, "PHOTON-128/16/16");
    assert!(manifest.matches_parameters());
    assert!(runner.vector_count() > 20);
}

/// Test digest vectors, including the length error cases.
#[test]
fn test_corpus_hash_vectors() {
    let results = run_corpus(Strategy::Eager);

    let hash_tests: Vec<_> = results
        .details
        .iter()
        .filter(|(id, _)| id.starts_with("hash_"))
        .collect();
    assert!(!hash_tests.is_empty());

    for (id, result) in &hash_tests {
        if let TestResult::Fail { expected, actual } = result {
            panic!("{} failed: expected={}, actual={}", id, expected, actual);
        }
        assert!(result.is_pass(), "{} did not pass: {:?}", id, result);
    }
}

/// Test GF(16) and permutation vectors.
#[test]
fn test_corpus_field_and_permutation() {
    let results = run_corpus(Strategy::Eager);

    let count = results
        .details
        .iter()
        .filter(|(id, _)| id.starts_with("gf16_") || id.starts_with("permute_"))
        .inspect(|(id, result)| assert!(result.is_pass(), "{} did not pass: {:?}", id, result))
        .count();
    assert!(count >= 10);
}

/// A tight message limit turns oversized vectors into E202 results.
#[test]
fn test_corpus_respects_limits() {
    let limits = Limits {
        max_input_size: 1024 * 1024,
        max_message_bytes: 8,
    };
    let runner = CorpusRunner::load_with_limits(corpus_path(), limits).expect("load corpus");
    let results = runner.run_all();

    let (_, fox) = results
        .details
        .iter()
        .find(|(id, _)| id == "hash_fox")
        .expect("hash_fox vector present");
    assert!(fox.is_fail(), "oversized message should not hash: {:?}", fox);
}

/// A corpus file larger than the input limit is rejected before parsing.
#[test]
fn test_corpus_file_over_input_limit() {
    let limits = Limits {
        max_input_size: 64,
        max_message_bytes: 1024,
    };
    match CorpusRunner::load_with_limits(corpus_path(), limits) {
        Err(ConformanceError::Photon(ErrorCode::E101_InputTooLarge(size, limit))) => {
            assert_eq!(limit, 64);
            assert_eq!(size, 65, "read should stop one byte past the limit");
        }
        other => panic!("expected E101, got {:?}", other.map(|r| r.vector_count())),
    }
}
