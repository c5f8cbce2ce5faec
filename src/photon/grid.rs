//! The 144-bit internal state viewed as a 6x6 grid of nibbles.
//!
//! Cell `(row, col)` is nibble number `D * row + col` in row-major order.
//! Nibble `k` lives in byte `k / 2`; even `k` takes the high half. Because
//! `D` is even, the half depends only on the column.

use super::params::{D, IV_TAIL, RATE_BYTES, ROW_BYTES, STATE_BYTES};
use crate::field::NIBBLE_MASK;

/// Byte holding cell `(row, col)`.
#[inline]
pub const fn byte_index(row: usize, col: usize) -> usize {
    (col + D * row) / 2
}

/// Whether cell `(row, col)` is stored in the high nibble of its byte.
#[inline]
pub const fn is_high_nibble(col: usize) -> bool {
    col % 2 == 0
}

/// PHOTON internal state, packed two cells per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State([u8; STATE_BYTES]);

impl State {
    /// The domain-separated initial state.
    pub fn initial() -> Self {
        let mut bytes = [0u8; STATE_BYTES];
        bytes[STATE_BYTES - IV_TAIL.len()..].copy_from_slice(&IV_TAIL);
        State(bytes)
    }

    /// Wrap raw packed bytes.
    pub const fn from_bytes(bytes: [u8; STATE_BYTES]) -> Self {
        State(bytes)
    }

    /// Packed bytes.
    pub fn as_bytes(&self) -> &[u8; STATE_BYTES] {
        &self.0
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8; STATE_BYTES] {
        &mut self.0
    }

    /// Read cell `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        let byte = self.0[byte_index(row, col)];
        if is_high_nibble(col) {
            byte >> 4
        } else {
            byte & NIBBLE_MASK
        }
    }

    /// Overwrite cell `(row, col)`; the neighbouring nibble is preserved.
    pub fn set_cell(&mut self, row: usize, col: usize, value: u8) {
        let byte = &mut self.0[byte_index(row, col)];
        let value = value & NIBBLE_MASK;
        if is_high_nibble(col) {
            *byte = (*byte & NIBBLE_MASK) | (value << 4);
        } else {
            *byte = (*byte & !NIBBLE_MASK) | value;
        }
    }

    /// Row `row` as a 24-bit word, cell 0 in the top nibble.
    pub fn row_word(&self, row: usize) -> u32 {
        let start = row * ROW_BYTES;
        self.0[start..start + ROW_BYTES]
            .iter()
            .fold(0u32, |word, &b| (word << 8) | b as u32)
    }

    /// Store a 24-bit word into row `row`; bits above 24 are discarded.
    pub fn set_row_word(&mut self, row: usize, word: u32) {
        let start = row * ROW_BYTES;
        for (i, byte) in self.0[start..start + ROW_BYTES].iter_mut().enumerate() {
            let shift = 8 * (ROW_BYTES - 1 - i);
            *byte = (word >> shift) as u8;
        }
    }

    /// Column `col`, top to bottom.
    pub fn column(&self, col: usize) -> [u8; D] {
        std::array::from_fn(|row| self.cell(row, col))
    }

    /// Overwrite column `col`.
    pub fn set_column(&mut self, col: usize, values: &[u8; D]) {
        for (row, &value) in values.iter().enumerate() {
            self.set_cell(row, col, value);
        }
    }

    /// The rate part of the state.
    pub fn rate(&self) -> [u8; RATE_BYTES] {
        let mut out = [0u8; RATE_BYTES];
        out.copy_from_slice(&self.0[..RATE_BYTES]);
        out
    }

    /// XOR a block into the rate part.
    pub fn xor_rate(&mut self, block: &[u8; RATE_BYTES]) {
        for (s, b) in self.0.iter_mut().zip(block) {
            *s ^= b;
        }
    }

    /// Lowercase hex of the packed bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::initial()
    }
}

impl From<[u8; STATE_BYTES]> for State {
    fn from(bytes: [u8; STATE_BYTES]) -> Self {
        State(bytes)
    }
}
