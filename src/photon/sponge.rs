//! PHOTON-128 sponge: absorb 2-byte blocks, pad, squeeze 16 bytes.

use super::grid::State;
use super::params::{DIGEST_BYTES, PAD_BYTE, RATE_BYTES};
use super::permute::permute;
use crate::config::Strategy;
use crate::digest::Digest;
use crate::error::{ErrorCode, PhotonResult};
use crate::field::{LazyMulTable, MulTable, Multiplier};

/// PHOTON-128 hasher bound to a GF(16) multiplier.
///
/// Each call to [`Photon128::hash`] owns a fresh [`State`]; only the
/// multiplier is reused between calls.
#[derive(Debug, Clone)]
pub struct Photon128<M: Multiplier> {
    mul: M,
}

impl Photon128<&'static MulTable> {
    /// Hasher backed by the process-wide precomputed table.
    pub fn new() -> Self {
        Self {
            mul: MulTable::global(),
        }
    }
}

impl Default for Photon128<&'static MulTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl Photon128<LazyMulTable> {
    /// Hasher with its own lazily filled product table.
    pub fn lazy() -> Self {
        Self {
            mul: LazyMulTable::new(),
        }
    }
}

impl<M: Multiplier> Photon128<M> {
    /// Hasher using a caller-provided multiplier.
    pub fn with_multiplier(mul: M) -> Self {
        Self { mul }
    }

    /// The multiplier in use.
    pub fn multiplier(&self) -> &M {
        &self.mul
    }

    /// Hash a whole message.
    pub fn hash(&self, message: &[u8]) -> Digest {
        let mut state = State::initial();

        let mut blocks = message.chunks_exact(RATE_BYTES);
        for block in &mut blocks {
            let mut rate = [0u8; RATE_BYTES];
            rate.copy_from_slice(block);
            state.xor_rate(&rate);
            permute(&mut state, &self.mul);
        }

        state.xor_rate(&pad_block(blocks.remainder()));
        permute(&mut state, &self.mul);

        self.squeeze(&mut state)
    }

    /// Hash the first `length` bytes of `message`.
    ///
    /// Fails with `E201_MessageTooShort` if `message` holds fewer than
    /// `length` bytes.
    pub fn hash_prefix(&self, message: &[u8], length: usize) -> PhotonResult<Digest> {
        let prefix = message.get(..length).ok_or(ErrorCode::E201_MessageTooShort(
            length as u64,
            message.len() as u64,
        ))?;
        Ok(self.hash(prefix))
    }

    fn squeeze(&self, state: &mut State) -> Digest {
        let mut out = [0u8; DIGEST_BYTES];
        let mut chunks = out.chunks_exact_mut(RATE_BYTES);

        if let Some(first) = chunks.next() {
            first.copy_from_slice(&state.rate());
        }
        for chunk in chunks {
            permute(state, &self.mul);
            chunk.copy_from_slice(&state.rate());
        }

        Digest::from(out)
    }
}

/// Final absorbed block: leftover byte (if any), then `0x80`, then zeros.
///
/// A block-aligned message still gets a full padding block.
fn pad_block(remainder: &[u8]) -> [u8; RATE_BYTES] {
    let mut block = [0u8; RATE_BYTES];
    block[..remainder.len()].copy_from_slice(remainder);
    block[remainder.len()] = PAD_BYTE;
    block
}

/// Check a caller-supplied signed length against the bytes available.
pub fn validate_length(length: i64, available: usize) -> PhotonResult<usize> {
    if length < 0 {
        return Err(ErrorCode::E200_NegativeLength(length));
    }
    let length = length as u64;
    if length > available as u64 {
        return Err(ErrorCode::E201_MessageTooShort(length, available as u64));
    }
    Ok(length as usize)
}

/// Hash `message` with the process-wide precomputed table.
pub fn hash(message: &[u8]) -> Digest {
    Photon128::new().hash(message)
}

/// Hash the first `length` bytes of `message`.
///
/// Negative lengths and lengths past the end of `message` are rejected
/// instead of being read.
pub fn hash_len(message: &[u8], length: i64) -> PhotonResult<Digest> {
    let length = validate_length(length, message.len())?;
    Ok(hash(&message[..length]))
}

/// Hash `message` with the selected multiplier strategy.
pub fn hash_with(strategy: Strategy, message: &[u8]) -> Digest {
    match strategy {
        Strategy::Eager => Photon128::new().hash(message),
        Strategy::Lazy => Photon128::lazy().hash(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photon::params::STATE_BYTES;

    #[test]
    fn test_pad_block_branches() {
        assert_eq!(pad_block(&[]), [0x80, 0x00]);
        assert_eq!(pad_block(&[0x61]), [0x61, 0x80]);
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(hash(&[]).to_hex(), "ab68c00e242d3d14cae579d803ea3c83");
    }

    #[test]
    fn test_first_digest_bytes_follow_padded_permutation() {
        // Empty message: IV, pad 0x80 into byte 0, permute once.
        let mut bytes = *State::initial().as_bytes();
        bytes[0] ^= 0x80;
        let mut state = State::from_bytes(bytes);
        permute(&mut state, MulTable::global());
        assert_eq!(state.to_hex(), "ab6801389e18189cec106e5bebf39a2f578e");
        assert_eq!(&hash(&[]).as_bytes()[..2], &state.as_bytes()[..2]);
        assert_eq!(STATE_BYTES, 18);
    }

    #[test]
    fn test_odd_and_even_lengths() {
        assert_eq!(hash(&[0x00]).to_hex(), "a4ef9873c23b55c52f110c366863bf24");
        assert_eq!(hash(&[0x00, 0x01]).to_hex(), "bb843efa12c0503082bfcd141865bff6");
        assert_eq!(hash(b"abc").to_hex(), "e1bb314c7c9ace3ea0ed6fd1d762d216");
    }

    #[test]
    fn test_hash_len_uses_prefix() {
        let message = b"abcdef";
        assert_eq!(hash_len(message, 3), Ok(hash(b"abc")));
        assert_eq!(hash_len(message, 0), Ok(hash(&[])));
        assert_eq!(
            Photon128::new().hash_prefix(message, 6),
            Ok(hash(message))
        );
    }

    #[test]
    fn test_hash_len_rejects_bad_lengths() {
        assert_eq!(hash_len(b"ab", -1), Err(ErrorCode::E200_NegativeLength(-1)));
        assert_eq!(
            hash_len(b"ab", 3),
            Err(ErrorCode::E201_MessageTooShort(3, 2))
        );
        assert_eq!(
            Photon128::new().hash_prefix(b"", 1),
            Err(ErrorCode::E201_MessageTooShort(1, 0))
        );
    }

    #[test]
    fn test_strategies_agree() {
        let message = b"The quick brown fox jumps over the lazy dog";
        let eager = hash_with(Strategy::Eager, message);
        let lazy = hash_with(Strategy::Lazy, message);
        assert_eq!(eager, lazy);
        assert_eq!(eager.to_hex(), "5929e75d9333b7dd5cb84303ca49b3c4");
    }

    #[test]
    fn test_lazy_hasher_reuses_table() {
        let hasher = Photon128::lazy();
        let first = hasher.hash(&[0u8; 16]);
        let filled = hasher.multiplier().filled();
        assert!(filled > 0);
        let second = hasher.hash(&[0u8; 16]);
        assert_eq!(first, second);
        assert_eq!(hasher.multiplier().filled(), filled);
    }
}
