//! PHOTON-128 hash function (PHOTON-128/16/16).
//!
//! A sponge over the 144-bit permutation P_144 with a 16-bit rate and
//! 128-bit capacity, squeezed to a 128-bit digest.
//!
//! ```
//! use photon128::photon;
//!
//! let digest = photon::hash(&[0u8; 16]);
//! assert_eq!(digest.to_hex(), "fa56867b7b9593592f3aba28eb40db13");
//! ```

mod grid;
pub mod params;
mod permute;
mod sponge;

pub use grid::{byte_index, is_high_nibble, State};
pub use params::*;
pub use permute::{
    add_constants, mix_columns_serial, permute, permute_with_trace, shift_rows, sub_cells,
    RoundTrace,
};
pub use sponge::{hash, hash_len, hash_with, validate_length, Photon128};
