//! CLI integration tests.
//!
//! Tests the `photon` CLI commands by invoking the binary as a subprocess.

use std::io::Write;
use std::process::{Command, Stdio};

fn photon_path() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_photon"))
}

fn run_args(args: &[&str], input: &str) -> (i32, String, String) {
    run_args_bytes(args, input.as_bytes())
}

fn run_args_bytes(args: &[&str], input: &[u8]) -> (i32, String, String) {
    let photon = photon_path();
    let mut child = Command::new(&photon)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to spawn photon at {:?}: {}", photon, e));

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(input).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn run_digest(input: &str) -> (i32, String, String) {
    run_args(&["digest"], input)
}

fn run_verify(input: &str) -> (i32, String, String) {
    run_args(&["verify"], input)
}

fn parse(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, stdout))
}

// ============================================================================
// Digest Command Tests
// ============================================================================

#[test]
fn cli_digest_zeros() {
    let (code, stdout, _stderr) = run_digest(r#"{"message": "00000000000000000000000000000000"}"#);
    assert_eq!(code, 0, "Expected success exit code");

    let value = parse(&stdout);
    assert_eq!(value["ok"]["digest"], "fa56867b7b9593592f3aba28eb40db13");
    assert_eq!(
        value["ok"]["decimal"],
        "25086134123123149147894758186402356421919"
    );
}

#[test]
fn cli_digest_empty_message() {
    let (code, stdout, _stderr) = run_digest(r#"{"message": ""}"#);
    assert_eq!(code, 0);
    assert!(
        stdout.contains("ab68c00e242d3d14cae579d803ea3c83"),
        "Expected empty-message digest: {}",
        stdout
    );
}

#[test]
fn cli_digest_prefixed_hex_and_length() {
    let (code, stdout, _stderr) = run_digest(r#"{"message": "0x616263ffff", "length": 3}"#);
    assert_eq!(code, 0);
    assert_eq!(
        parse(&stdout)["ok"]["digest"],
        "e1bb314c7c9ace3ea0ed6fd1d762d216"
    );
}

#[test]
fn cli_digest_lazy_multiplier() {
    let (code, stdout, _stderr) = run_args(
        &["--multiplier", "lazy", "digest"],
        r#"{"message": "6161616161616161"}"#,
    );
    assert_eq!(code, 0);
    assert_eq!(
        parse(&stdout)["ok"]["digest"],
        "e536acb41d225ec52365e858b569cb3d"
    );
}

#[test]
fn cli_digest_invalid_json() {
    let (code, stdout, _stderr) = run_digest("{not json");
    assert_eq!(code, 1, "Expected failure exit code");
    let value = parse(&stdout);
    assert_eq!(value["err"]["code"], 100);
    assert_eq!(value["err"]["name"], "E100_InvalidJSON");
}

#[test]
fn cli_digest_non_utf8_input() {
    let (code, stdout, _stderr) = run_args_bytes(&["digest"], b"{\"message\": \"\xff\xfe\"}");
    assert_eq!(code, 1);
    let value = parse(&stdout);
    assert_eq!(value["err"]["code"], 100);
    assert_eq!(value["err"]["name"], "E100_InvalidJSON");
}

#[test]
fn cli_digest_invalid_hex() {
    let (code, stdout, _stderr) = run_digest(r#"{"message": "zz"}"#);
    assert_eq!(code, 1);
    assert_eq!(parse(&stdout)["err"]["code"], 103);
}

#[test]
fn cli_digest_negative_length() {
    let (code, stdout, _stderr) = run_digest(r#"{"message": "00", "length": -1}"#);
    assert_eq!(code, 1);
    assert_eq!(parse(&stdout)["err"]["name"], "E200_NegativeLength");
}

#[test]
fn cli_digest_length_past_end() {
    let (code, stdout, _stderr) = run_digest(r#"{"message": "00", "length": 2}"#);
    assert_eq!(code, 1);
    assert_eq!(parse(&stdout)["err"]["code"], 201);
}

// ============================================================================
// Verify Command Tests
// ============================================================================

#[test]
fn cli_verify_valid() {
    let input = r#"{
        "message": "616263",
        "expected_digest": "E1BB314C7C9ACE3EA0ED6FD1D762D216"
    }"#;
    let (code, stdout, _stderr) = run_verify(input);
    assert_eq!(code, 0, "Expected success exit code: {}", stdout);

    let value = parse(&stdout);
    assert_eq!(value["ok"]["valid"], true);
    assert_eq!(
        value["ok"]["computed_digest"],
        "e1bb314c7c9ace3ea0ed6fd1d762d216"
    );
}

#[test]
fn cli_verify_mismatch() {
    let input = r#"{
        "message": "616263",
        "expected_digest": "00000000000000000000000000000000"
    }"#;
    let (code, stdout, _stderr) = run_verify(input);
    assert_eq!(code, 1, "Expected failure exit code for mismatch");

    let value = parse(&stdout);
    assert_eq!(value["ok"]["valid"], false);
    assert_eq!(
        value["ok"]["expected_digest"],
        "00000000000000000000000000000000"
    );
}

#[test]
fn cli_verify_malformed_expected_is_mismatch() {
    let input = r#"{"message": "", "expected_digest": "abcd"}"#;
    let (code, stdout, _stderr) = run_verify(input);
    assert_eq!(code, 1);
    assert_eq!(parse(&stdout)["ok"]["valid"], false);
}

#[test]
fn cli_verify_missing_field() {
    let (code, stdout, _stderr) = run_verify(r#"{"message": "00"}"#);
    assert_eq!(code, 1);
    assert_eq!(parse(&stdout)["err"]["code"], 100);
}

// ============================================================================
// Demo, Corpus, and Version Tests
// ============================================================================

#[test]
fn cli_demo_zeros() {
    let (code, stdout, _stderr) = run_args(&["demo", "zeros"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("Input text is: 0000000000000000"));
    assert!(
        stdout.contains("Hashed result is: 25086134123123149147894758186402356421919"),
        "Unexpected demo output: {}",
        stdout
    );
}

#[test]
fn cli_demo_letters() {
    let (code, stdout, _stderr) = run_args(&["--multiplier", "lazy", "demo", "letters"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("Input text is: 6161616161616161"));
    assert!(stdout.contains("Hashed result is: e536acb41d225ec52365e858b569cb3d"));
}

#[test]
fn cli_corpus_passes() {
    let corpus = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("corpus/photon128.json");
    let (code, stdout, _stderr) = run_args(&["corpus", corpus.to_str().unwrap()], "");
    assert_eq!(code, 0, "Corpus run failed: {}", stdout);
    assert!(stdout.contains("0 failed"), "Unexpected summary: {}", stdout);
}

#[test]
fn cli_corpus_missing_file() {
    let (code, _stdout, stderr) = run_args(&["corpus", "/nonexistent/corpus.json"], "");
    assert_eq!(code, 1);
    assert!(stderr.contains("Failed to load corpus"));
}

#[test]
fn cli_version() {
    let (code, stdout, _stderr) = run_args(&["version"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("PHOTON-128 v"));
}
