//! PHOTON-128/16/16 parameters.
//!
//! The state is a 6x6 grid of 4-bit cells packed two per byte, row-major,
//! high nibble first.

/// Digest size in bytes (n = 128 bits).
pub const DIGEST_BYTES: usize = 16;

/// Sponge capacity in bytes (c = 128 bits).
pub const CAPACITY_BYTES: usize = 16;

/// Sponge rate in bytes (r = 16 bits); also the absorb/squeeze block size.
pub const RATE_BYTES: usize = 2;

/// Total state size in bytes.
pub const STATE_BYTES: usize = RATE_BYTES + CAPACITY_BYTES;

/// Cells per row and per column.
pub const D: usize = 6;

/// Bits per cell.
pub const CELL_BITS: usize = 4;

/// Bytes holding one row of the grid.
pub const ROW_BYTES: usize = D * CELL_BITS / 8;

/// Rounds per permutation call.
pub const ROUNDS: usize = 12;

/// Squeeze steps needed to fill a digest.
pub const SQUEEZE_STEPS: usize = DIGEST_BYTES / RATE_BYTES;

/// Trailing bytes of the initial state: n/4, r, r' (in bits).
pub const IV_TAIL: [u8; 3] = [0x20, 0x10, 0x10];

/// Padding byte: a single one bit followed by zeros.
pub const PAD_BYTE: u8 = 0x80;

/// 4-bit S-box (the PRESENT S-box).
pub const SBOX: [u8; 16] = [
    0xC, 0x5, 0x6, 0xB, 0x9, 0x0, 0xA, 0xD, 0x3, 0xE, 0xF, 0x8, 0x4, 0x7, 0x1, 0x2,
];

/// Mixing matrix over GF(16) applied to every column.
pub const MIX_MATRIX: [[u8; D]; D] = [
    [0x1, 0x2, 0x8, 0x5, 0x8, 0x2],
    [0x2, 0x5, 0x1, 0x2, 0x6, 0xC],
    [0xC, 0x9, 0xF, 0x8, 0x8, 0xD],
    [0xD, 0x5, 0xB, 0x3, 0xA, 0x1],
    [0x1, 0xF, 0xD, 0xE, 0xB, 0x8],
    [0x8, 0x2, 0x3, 0x3, 0x2, 0x8],
];

/// Per-round constants.
pub const ROUND_CONSTANTS: [u8; ROUNDS] = [1, 3, 7, 14, 13, 11, 6, 12, 9, 2, 5, 10];

/// Per-row constants.
pub const INTERNAL_CONSTANTS: [u8; D] = [0, 1, 3, 7, 6, 4];
