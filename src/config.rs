//! Runtime configuration: multiplier strategy and input-size limits.
//!
//! Limits apply to the CLI and the corpus loader only. The hash itself
//! accepts messages of any length.

use crate::error::{ErrorCode, PhotonResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which GF(16) multiplier backs the permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Process-wide table computed once and shared read-only.
    #[default]
    Eager,
    /// Per-hasher table filled on demand.
    Lazy,
}

impl Strategy {
    /// Lowercase name used on the command line and in corpus files.
    pub const fn name(&self) -> &'static str {
        match self {
            Strategy::Eager => "eager",
            Strategy::Lazy => "lazy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eager" => Ok(Strategy::Eager),
            "lazy" => Ok(Strategy::Lazy),
            other => Err(format!("unknown multiplier strategy '{}'", other)),
        }
    }
}

/// Input-size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum raw input size in bytes (E101)
    pub max_input_size: u64,
    /// Maximum decoded message size in bytes (E202)
    pub max_message_bytes: u64,
}

impl Limits {
    /// Default limits.
    pub const fn standard() -> Self {
        Self {
            max_input_size: 1024 * 1024,    // 1 MiB
            max_message_bytes: 256 * 1024, // 256 KiB
        }
    }

    /// Larger limits for bulk vector generation.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: 64 * 1024 * 1024,    // 64 MiB
            max_message_bytes: 16 * 1024 * 1024, // 16 MiB
        }
    }

    /// Reject raw input above `max_input_size`.
    pub fn check_input(&self, size: usize) -> PhotonResult<()> {
        let size = size as u64;
        if size > self.max_input_size {
            return Err(ErrorCode::E101_InputTooLarge(size, self.max_input_size));
        }
        Ok(())
    }

    /// Reject messages above `max_message_bytes`.
    pub fn check_message(&self, len: usize) -> PhotonResult<()> {
        let len = len as u64;
        if len > self.max_message_bytes {
            return Err(ErrorCode::E202_MessageTooLarge(len, self.max_message_bytes));
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("eager".parse::<Strategy>(), Ok(Strategy::Eager));
        assert_eq!("lazy".parse::<Strategy>(), Ok(Strategy::Lazy));
        assert!("fast".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default(), Strategy::Eager);
        assert_eq!(Strategy::Lazy.to_string(), "lazy");
    }

    #[test]
    fn test_strategy_serde() {
        let s: Strategy = serde_json::from_str("\"lazy\"").unwrap();
        assert_eq!(s, Strategy::Lazy);
        assert_eq!(serde_json::to_string(&Strategy::Eager).unwrap(), "\"eager\"");
    }

    #[test]
    fn test_standard_limits() {
        let limits = Limits::standard();
        assert_eq!(limits.max_input_size, 1024 * 1024);
        assert_eq!(limits.max_message_bytes, 256 * 1024);
        assert_eq!(Limits::default(), limits);
    }

    #[test]
    fn test_limit_checks() {
        let limits = Limits {
            max_input_size: 10,
            max_message_bytes: 4,
        };
        assert!(limits.check_input(10).is_ok());
        assert_eq!(
            limits.check_input(11),
            Err(ErrorCode::E101_InputTooLarge(11, 10))
        );
        assert!(limits.check_message(4).is_ok());
        assert_eq!(
            limits.check_message(5),
            Err(ErrorCode::E202_MessageTooLarge(5, 4))
        );
    }

    #[test]
    fn test_lenient_exceeds_standard() {
        let lenient = Limits::lenient();
        let standard = Limits::standard();
        assert!(lenient.max_input_size > standard.max_input_size);
        assert!(lenient.max_message_bytes > standard.max_message_bytes);
    }
}
