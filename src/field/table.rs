//! Product tables backing the mixing layer.
//!
//! [`MulTable`] is built once and never changes, so one instance can be
//! shared by every thread. [`LazyMulTable`] fills itself in as products are
//! requested and belongs to a single hashing context.

use super::gf16::{double, mul, Multiplier};
use super::{NIBBLE_MASK, ORDER};
use std::cell::Cell;
use std::sync::OnceLock;

/// Fully precomputed 16x16 product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulTable {
    products: [[u8; ORDER]; ORDER],
}

impl MulTable {
    /// Compute every product eagerly.
    pub fn new() -> Self {
        let mut products = [[0u8; ORDER]; ORDER];
        for (a, row) in products.iter_mut().enumerate() {
            for (b, slot) in row.iter_mut().enumerate() {
                *slot = mul(a as u8, b as u8);
            }
        }
        Self { products }
    }

    /// Process-wide table, built on first use.
    pub fn global() -> &'static MulTable {
        static TABLE: OnceLock<MulTable> = OnceLock::new();
        TABLE.get_or_init(MulTable::new)
    }

    /// Borrow the row of products `a * _`.
    pub fn row(&self, a: u8) -> &[u8; ORDER] {
        &self.products[(a & NIBBLE_MASK) as usize]
    }
}

impl Default for MulTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Multiplier for MulTable {
    #[inline]
    fn mul(&self, a: u8, b: u8) -> u8 {
        self.products[(a & NIBBLE_MASK) as usize][(b & NIBBLE_MASK) as usize]
    }
}

/// Slot value meaning "product not computed yet". Any value above 0x0F works.
const UNSET: u8 = 0xF3;

/// Memoizing product table, populated on demand.
///
/// Slots hold either a verified product (`<= 0x0F`) or [`UNSET`]. Products
/// are stored at `(a, b)` and `(b, a)` together, and every doubling `x * 2`
/// computed along the way is stored too. The table only grows.
///
/// The table uses interior mutability and is deliberately not `Sync`; give
/// each thread its own instance.
#[derive(Debug, Clone)]
pub struct LazyMulTable {
    slots: [Cell<u8>; ORDER * ORDER],
}

impl LazyMulTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Cell::new(UNSET)),
        }
    }

    /// Number of slots holding a verified product.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.get() <= NIBBLE_MASK).count()
    }

    /// Look up a cached product without computing it.
    pub fn cached(&self, a: u8, b: u8) -> Option<u8> {
        let value = self.slots[index(a, b)].get();
        (value <= NIBBLE_MASK).then_some(value)
    }

    fn store(&self, a: u8, b: u8, product: u8) {
        self.slots[index(a, b)].set(product);
        self.slots[index(b, a)].set(product);
    }

    fn double(&self, x: u8) -> u8 {
        if let Some(product) = self.cached(x, 2) {
            return product;
        }
        let product = double(x);
        self.store(x, 2, product);
        product
    }
}

impl Default for LazyMulTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Multiplier for LazyMulTable {
    fn mul(&self, a: u8, b: u8) -> u8 {
        let a = a & NIBBLE_MASK;
        let b = b & NIBBLE_MASK;
        if let Some(product) = self.cached(a, b) {
            return product;
        }

        let (hi, lo) = if a < b { (b, a) } else { (a, b) };
        if lo == 0 {
            return 0;
        }
        if lo == 1 {
            return hi;
        }

        let mut running = hi;
        let mut acc = 0;
        let mut n = lo;
        while n > 1 {
            // A cached running * n finishes the product in one step.
            if let Some(product) = self.cached(running, n) {
                running = product;
                break;
            }
            if n & 1 == 1 {
                acc ^= running;
            }
            running = self.double(running);
            n >>= 1;
        }

        let product = (running ^ acc) & NIBBLE_MASK;
        self.store(hi, lo, product);
        product
    }
}

#[inline]
fn index(a: u8, b: u8) -> usize {
    ORDER * (a & NIBBLE_MASK) as usize + (b & NIBBLE_MASK) as usize
}
