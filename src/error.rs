//! Error handling for the PHOTON-128 crate.
//!
//! Every failure is reported as an [`ErrorCode`] with a stable numeric code,
//! so CLI output and corpus expectations can refer to errors by number.

use thiserror::Error;

/// All error codes produced by the crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    /// Input JSON could not be parsed into the expected shape (code 100)
    #[error("E100_InvalidJSON")]
    E100_InvalidJSON,

    /// Raw input exceeds the configured size limit (code 101)
    #[error("E101_InputTooLarge({0}, {1})")]
    E101_InputTooLarge(/* size */ u64, /* limit */ u64),

    /// Hex string failed to decode (code 103)
    #[error("E103_InvalidHex")]
    E103_InvalidHex,

    /// Decoded value has the wrong byte length (code 104)
    #[error("E104_WrongLength({0}, {1})")]
    E104_WrongLength(/* expected */ String, /* got */ u64),

    /// Caller-supplied message length is negative (code 200)
    #[error("E200_NegativeLength({0})")]
    E200_NegativeLength(/* length */ i64),

    /// Caller-supplied length exceeds the bytes available (code 201)
    #[error("E201_MessageTooShort({0}, {1})")]
    E201_MessageTooShort(/* length */ u64, /* available */ u64),

    /// Message exceeds the configured message limit (code 202)
    #[error("E202_MessageTooLarge({0}, {1})")]
    E202_MessageTooLarge(/* length */ u64, /* limit */ u64),

    /// GF(16) operand does not fit in a nibble (code 300)
    #[error("E300_NibbleOutOfRange({0})")]
    E300_NibbleOutOfRange(/* value */ u64),

    /// I/O or other failure outside the hash computation (code 900)
    #[error("E900_InternalError({0})")]
    E900_InternalError(/* reason */ String),
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::E100_InvalidJSON => 100,
            ErrorCode::E101_InputTooLarge(_, _) => 101,
            ErrorCode::E103_InvalidHex => 103,
            ErrorCode::E104_WrongLength(_, _) => 104,
            ErrorCode::E200_NegativeLength(_) => 200,
            ErrorCode::E201_MessageTooShort(_, _) => 201,
            ErrorCode::E202_MessageTooLarge(_, _) => 202,
            ErrorCode::E300_NibbleOutOfRange(_) => 300,
            ErrorCode::E900_InternalError(_) => 900,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E100_InvalidJSON => "E100_InvalidJSON",
            ErrorCode::E101_InputTooLarge(_, _) => "E101_InputTooLarge",
            ErrorCode::E103_InvalidHex => "E103_InvalidHex",
            ErrorCode::E104_WrongLength(_, _) => "E104_WrongLength",
            ErrorCode::E200_NegativeLength(_) => "E200_NegativeLength",
            ErrorCode::E201_MessageTooShort(_, _) => "E201_MessageTooShort",
            ErrorCode::E202_MessageTooLarge(_, _) => "E202_MessageTooLarge",
            ErrorCode::E300_NibbleOutOfRange(_) => "E300_NibbleOutOfRange",
            ErrorCode::E900_InternalError(_) => "E900_InternalError",
        }
    }
}

/// Result type for PHOTON operations.
pub type PhotonResult<T> = Result<T, ErrorCode>;
