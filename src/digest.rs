//! The 16-byte PHOTON-128 digest.

use crate::error::{ErrorCode, PhotonResult};
use crate::photon::DIGEST_BYTES;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A PHOTON-128 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest(pub [u8; DIGEST_BYTES]);

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Digest {
    /// Parse 32 hex characters; a `0x` prefix is tolerated.
    pub fn from_hex(hex_str: &str) -> PhotonResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);

        let bytes = hex::decode(hex_str).map_err(|_| ErrorCode::E103_InvalidHex)?;
        if bytes.len() != DIGEST_BYTES {
            return Err(ErrorCode::E104_WrongLength(
                DIGEST_BYTES.to_string(),
                bytes.len() as u64,
            ));
        }

        let mut arr = [0u8; DIGEST_BYTES];
        arr.copy_from_slice(&bytes);
        Ok(Digest(arr))
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Byte values in decimal, concatenated without separators.
    ///
    /// This is the format printed by the zero-input demo; it is not
    /// reversible.
    pub fn to_decimal_string(&self) -> String {
        self.0.iter().map(|b| b.to_string()).collect()
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_BYTES] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; DIGEST_BYTES]> for Digest {
    fn from(arr: [u8; DIGEST_BYTES]) -> Self {
        Digest(arr)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
