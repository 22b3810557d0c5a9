//! Errors raised by block cipher capabilities.

use thiserror::Error;

/// Failure of an underlying cipher operation.
///
/// Messages name the failing step only; they never carry key material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The key does not have the length AES-128 requires.
    #[error("invalid AES-128 key length: expected 16 bytes, got {actual}")]
    InvalidKeyLength {
        /// Length of the rejected key.
        actual: usize,
    },
    /// Input to a no-padding mode was not a whole number of blocks.
    #[error("input length {len} is not a multiple of the 16-byte block size")]
    UnalignedInput {
        /// Length of the rejected input.
        len: usize,
    },
    /// The capability refused the operation (for example a key handle that
    /// does not permit encryption).
    #[error("cipher provider failure: {0}")]
    Provider(String),
}
