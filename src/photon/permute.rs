//! PHOTON permutation P_144.
//!
//! Each of the 12 rounds applies, in order:
//! 1. AddConstants - round and row constants into column 0
//! 2. SubCells - S-box on every cell
//! 3. ShiftRows - row `i` rotated left by `i` cells
//! 4. MixColumnsSerial - every column multiplied by the mixing matrix

use super::grid::{byte_index, State};
use super::params::{D, INTERNAL_CONSTANTS, MIX_MATRIX, ROUNDS, ROUND_CONSTANTS, ROW_BYTES, SBOX};
use crate::field::{Multiplier, NIBBLE_MASK};

/// Bits in one packed row.
const ROW_BITS: usize = ROW_BYTES * 8;

/// Mask for a packed row.
const ROW_MASK: u32 = (1 << ROW_BITS) - 1;

/// XOR `RC[round] ^ IC[row]` into cell `(row, 0)` of every row.
pub fn add_constants(state: &mut State, round: usize) {
    let bytes = state.bytes_mut();
    for (row, &ic) in INTERNAL_CONSTANTS.iter().enumerate() {
        // Column 0 is always the high nibble.
        bytes[byte_index(row, 0)] ^= (ROUND_CONSTANTS[round] ^ ic) << 4;
    }
}

/// Apply the S-box to both nibbles of every byte.
pub fn sub_cells(state: &mut State) {
    for byte in state.bytes_mut().iter_mut() {
        let hi = SBOX[(*byte >> 4) as usize];
        let lo = SBOX[(*byte & NIBBLE_MASK) as usize];
        *byte = (hi << 4) | lo;
    }
}

/// Rotate row `i` left by `i` cells. Row 0 is untouched.
pub fn shift_rows(state: &mut State) {
    for row in 1..D {
        let word = state.row_word(row);
        let shift = 4 * row;
        let rotated = ((word << shift) | (word >> (ROW_BITS - shift))) & ROW_MASK;
        state.set_row_word(row, rotated);
    }
}

/// Multiply every column by [`MIX_MATRIX`] over GF(16).
pub fn mix_columns_serial<M: Multiplier + ?Sized>(state: &mut State, mul: &M) {
    for col in 0..D {
        let old = state.column(col);
        let mut new = [0u8; D];
        for (out, coeffs) in new.iter_mut().zip(MIX_MATRIX.iter()) {
            *out = coeffs
                .iter()
                .zip(old.iter())
                .fold(0, |acc, (&m, &v)| acc ^ mul.mul(m, v));
        }
        state.set_column(col, &new);
    }
}

/// One full round.
fn round<M: Multiplier + ?Sized>(state: &mut State, round: usize, mul: &M) {
    add_constants(state, round);
    sub_cells(state);
    shift_rows(state);
    mix_columns_serial(state, mul);
}

/// Run all 12 rounds in place.
pub fn permute<M: Multiplier + ?Sized>(state: &mut State, mul: &M) {
    for r in 0..ROUNDS {
        round(state, r, mul);
    }
}

/// Snapshot of the state after each step of one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrace {
    /// Round index, `0..ROUNDS`.
    pub round: usize,
    /// State after AddConstants.
    pub add_constants: State,
    /// State after SubCells.
    pub sub_cells: State,
    /// State after ShiftRows.
    pub shift_rows: State,
    /// State after MixColumnsSerial (the round output).
    pub mix_columns: State,
}

/// Permutation with per-step trace output for divergence localization.
///
/// Returns the final state and one [`RoundTrace`] per round.
pub fn permute_with_trace<M: Multiplier + ?Sized>(
    state: &State,
    mul: &M,
) -> (State, Vec<RoundTrace>) {
    let mut st = *state;
    let mut traces = Vec::with_capacity(ROUNDS);

    for r in 0..ROUNDS {
        add_constants(&mut st, r);
        let after_ac = st;
        sub_cells(&mut st);
        let after_sc = st;
        shift_rows(&mut st);
        let after_sr = st;
        mix_columns_serial(&mut st, mul);

        traces.push(RoundTrace {
            round: r,
            add_constants: after_ac,
            sub_cells: after_sc,
            shift_rows: after_sr,
            mix_columns: st,
        });
    }

    (st, traces)
}
