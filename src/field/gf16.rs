//! Scalar GF(16) operations.

use super::{NIBBLE_MASK, REDUCTION};

/// Source of GF(16) products for the mixing layer.
///
/// Implementations must agree with [`mul`] for every pair of nibbles.
pub trait Multiplier {
    /// Multiply two nibbles. Bits above the low nibble are ignored.
    fn mul(&self, a: u8, b: u8) -> u8;
}

impl<M: Multiplier + ?Sized> Multiplier for &M {
    #[inline]
    fn mul(&self, a: u8, b: u8) -> u8 {
        (**self).mul(a, b)
    }
}

/// Multiply by `x` (i.e. 2), folding the overflow bit back into the field.
#[inline]
pub const fn double(x: u8) -> u8 {
    let shifted = (x & NIBBLE_MASK) << 1;
    if shifted & 0x10 != 0 {
        (shifted ^ REDUCTION) & NIBBLE_MASK
    } else {
        shifted
    }
}

/// Multiply two nibbles by double-and-add.
///
/// The larger operand is the multiplicand, so the loop runs at most three
/// times. Products with 0 and 1 return immediately.
pub const fn mul(a: u8, b: u8) -> u8 {
    let mut a = a & NIBBLE_MASK;
    let mut b = b & NIBBLE_MASK;
    if a < b {
        let tmp = a;
        a = b;
        b = tmp;
    }

    if b == 0 {
        return 0;
    }
    if b == 1 {
        return a;
    }

    let mut running = a;
    let mut acc = 0;
    while b > 1 {
        if b & 1 == 1 {
            acc ^= running;
        }
        running = double(running);
        b >>= 1;
    }

    (running ^ acc) & NIBBLE_MASK
}
