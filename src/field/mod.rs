//! GF(2^4) arithmetic used by the PHOTON mixing layer.
//!
//! Elements are nibbles (`u8` values in `0..=15`). Addition is XOR;
//! multiplication reduces modulo `x^4 + x + 1`, whose low-order feedback
//! taps are [`REDUCTION`].

mod gf16;
mod table;

pub use gf16::{double, mul, Multiplier};
pub use table::{LazyMulTable, MulTable};

/// Low-order taps of the reduction polynomial `x^4 + x + 1`.
pub const REDUCTION: u8 = 0x3;

/// Mask selecting a single 4-bit cell.
pub const NIBBLE_MASK: u8 = 0x0F;

/// Number of elements in GF(16).
pub const ORDER: usize = 16;
