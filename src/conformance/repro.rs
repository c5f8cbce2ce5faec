//! Reproduction bundle for debugging conformance mismatches.

use super::runner::OracleOutput;
use crate::config::Strategy;
use crate::field::MulTable;
use crate::photon::{permute_with_trace, State, PAD_BYTE, RATE_BYTES};
use std::path::Path;

/// Everything needed to reproduce a mismatch between two runners.
#[derive(Debug, Clone)]
pub struct ReproBundle {
    /// Test name that failed.
    pub test_name: String,
    /// Message that was hashed, as hex.
    pub message_hex: String,
    /// Name of the primary runner.
    pub primary_name: String,
    /// Primary output.
    pub primary_output: OracleOutput,
    /// Name of the secondary runner.
    pub secondary_name: String,
    /// Secondary output.
    pub secondary_output: OracleOutput,
}

impl ReproBundle {
    /// Create a new repro bundle.
    pub fn new(
        test_name: String,
        message_hex: String,
        primary_name: String,
        primary_output: OracleOutput,
        secondary_name: String,
        secondary_output: OracleOutput,
    ) -> Self {
        Self {
            test_name,
            message_hex,
            primary_name,
            primary_output,
            secondary_name,
            secondary_output,
        }
    }

    /// Index of the first differing hex character, if both sides succeeded.
    pub fn first_diff(&self) -> Option<usize> {
        match (&self.primary_output, &self.secondary_output) {
            (OracleOutput::Ok(a), OracleOutput::Ok(b)) => a
                .bytes()
                .zip(b.bytes())
                .position(|(x, y)| x != y)
                .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len()))),
            _ => None,
        }
    }

    /// Format as a human-readable report.
    ///
    /// The report includes the round trace of the first absorbed block so a
    /// diverging implementation can be compared step by step.
    pub fn to_report(&self) -> String {
        let first_diff = self
            .first_diff()
            .map(|i| format!("hex char {}", i))
            .unwrap_or_else(|| "n/a".to_string());

        format!(
            r#"=== Conformance Mismatch Report ===
Test: {}
Message: {}
{}: {:?}
{}: {:?}
First difference: {}

First permutation trace ({} strategy):
{}
To reproduce:
  echo '{{"message":"{}"}}' | photon digest
"#,
            self.test_name,
            self.message_hex,
            self.primary_name,
            self.primary_output,
            self.secondary_name,
            self.secondary_output,
            first_diff,
            Strategy::Eager,
            self.first_block_trace(),
            self.message_hex,
        )
    }

    /// Save the report to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        std::fs::write(path, self.to_report())
    }

    /// Format as JSON for machine parsing.
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "test_name": self.test_name,
            "message": self.message_hex,
            "primary": { "name": self.primary_name, "output": self.primary_output.as_string() },
            "secondary": { "name": self.secondary_name, "output": self.secondary_output.as_string() },
            "first_diff": self.first_diff(),
        })
        .to_string()
    }

    fn first_block_trace(&self) -> String {
        let message = hex::decode(&self.message_hex).unwrap_or_default();
        let mut state = State::initial();
        let mut block = [0u8; RATE_BYTES];
        for (slot, byte) in block.iter_mut().zip(message.iter()) {
            *slot = *byte;
        }
        if message.len() < RATE_BYTES {
            // Message shorter than a block: the padded block is absorbed first.
            block[message.len()] ^= PAD_BYTE;
        }
        state.xor_rate(&block);

        let (_, traces) = permute_with_trace(&state, MulTable::global());
        traces
            .iter()
            .map(|t| {
                format!(
                    "  round {:2}: ac={} sc={} sr={} mc={}\n",
                    t.round,
                    t.add_constants.to_hex(),
                    t.sub_cells.to_hex(),
                    t.shift_rows.to_hex(),
                    t.mix_columns.to_hex()
                )
            })
            .collect()
    }
}
