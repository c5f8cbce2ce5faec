//! Runners that compute digests for differential testing.

use super::{ConformanceError, ConformanceResult};
use crate::config::Strategy;
use crate::photon::hash_with;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Result from a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleOutput {
    /// Digest as lowercase hex.
    Ok(String),
    /// Error name.
    Err(String),
}

impl OracleOutput {
    /// Check if this is an Ok result.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Check if this is an Err result.
    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Get the value as a string (either digest hex or error name).
    pub fn as_string(&self) -> &str {
        match self {
            Self::Ok(s) => s,
            Self::Err(s) => s,
        }
    }
}

/// Something that can hash a message for comparison.
pub trait OracleRunner {
    /// Hash `message` and report the digest or error.
    fn compute_hash(&self, message: &[u8]) -> ConformanceResult<OracleOutput>;

    /// Get the runner name for reporting.
    fn name(&self) -> &str;
}

/// In-process runner using this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustRunner {
    strategy: Strategy,
}

impl RustRunner {
    /// Create a runner using `strategy`.
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// Strategy in use.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl OracleRunner for RustRunner {
    fn compute_hash(&self, message: &[u8]) -> ConformanceResult<OracleOutput> {
        Ok(OracleOutput::Ok(hash_with(self.strategy, message).to_hex()))
    }

    fn name(&self) -> &str {
        match self.strategy {
            Strategy::Eager => "rust-eager",
            Strategy::Lazy => "rust-lazy",
        }
    }
}

/// Runner that shells out to an executable speaking the `digest` protocol.
///
/// The executable receives `{"message":"<hex>"}` on stdin and must print
/// `{"ok":{"digest":"<hex>"}}` or `{"err":{"code":N,"name":"..."}}`.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: PathBuf,
    args: Vec<String>,
    label: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Envelope {
    Ok { digest: String },
    Err { name: String },
}

impl CommandRunner {
    /// Create a runner for `program`, invoked with `args`.
    pub fn new<P: AsRef<Path>>(program: P, args: &[&str]) -> ConformanceResult<Self> {
        let program = program.as_ref().to_path_buf();
        if !program.exists() {
            return Err(ConformanceError::ReferenceNotAvailable(format!(
                "executable not found at {:?}",
                program
            )));
        }

        let label = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "external".to_string());

        Ok(Self {
            program,
            args: args.iter().map(|a| a.to_string()).collect(),
            label,
        })
    }

    /// Check if the executable still exists.
    pub fn is_available(&self) -> bool {
        self.program.exists()
    }
}

impl OracleRunner for CommandRunner {
    fn compute_hash(&self, message: &[u8]) -> ConformanceResult<OracleOutput> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ConformanceError::ReferenceExecutionFailed(e.to_string()))?;

        let request = serde_json::json!({ "message": hex::encode(message) });
        // The child is always reaped, even when it exits before reading stdin.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(request.to_string().as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        written.map_err(|e| {
            ConformanceError::ReferenceExecutionFailed(format!(
                "writing request to {}: {} (exit status {})",
                self.label, e, output.status
            ))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_output(&stdout)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Parse a `digest` protocol response.
fn parse_output(stdout: &str) -> ConformanceResult<OracleOutput> {
    let envelope: Envelope = serde_json::from_str(stdout.trim()).map_err(|e| {
        ConformanceError::ReferenceOutputParseError(format!("{}: {}", e, stdout.trim()))
    })?;

    Ok(match envelope {
        Envelope::Ok { digest } => OracleOutput::Ok(digest.to_ascii_lowercase()),
        Envelope::Err { name } => OracleOutput::Err(name),
    })
}
