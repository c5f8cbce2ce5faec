//! PHOTON-128 - lightweight sponge hash over a 144-bit permutation.
//!
//! This crate computes the 128-bit PHOTON-128/16/16 digest of a byte string
//! and reproduces the reference implementation bit for bit.
//!
//! # Architecture
//!
//! - [`field`] - GF(2^4) multiplication and product tables
//! - [`photon`] - state grid, permutation P_144 and the sponge
//! - [`digest`] - the 16-byte digest type
//! - [`config`] - multiplier strategy and input limits
//! - [`conformance`] - golden-vector corpus and differential testing
//! - [`error`] - numbered error codes
//!
//! ```
//! let digest = photon128::hash(b"aaaaaaaa");
//! assert_eq!(digest.to_hex(), "e536acb41d225ec52365e858b569cb3d");
//! ```

// Library code must not panic on caller input.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod config;
pub mod conformance;
pub mod digest;
pub mod error;
pub mod field;
pub mod photon;

// Re-export commonly used types
pub use config::{Limits, Strategy};
pub use conformance::{DiffResult, DiffTestHarness};
pub use digest::Digest;
pub use error::{ErrorCode, PhotonResult};
pub use photon::{hash, hash_len, hash_with, Photon128};
