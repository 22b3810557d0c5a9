//! Error types for key diversification.

use aes_core::CipherError;
use thiserror::Error;

/// A request was rejected before any cryptography ran.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputFormatError {
    /// The text was not valid even-length hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// The diversification input had no bytes.
    #[error("diversification input is empty")]
    EmptyInput,
    /// The diversification input does not fit the selected framing.
    #[error("diversification input is {len} bytes, at most {max} allowed")]
    InputTooLong {
        /// Length of the rejected input.
        len: usize,
        /// Largest length accepted.
        max: usize,
    },
    /// A key was not exactly 16 bytes.
    #[error("key must be 16 bytes, got {actual}")]
    KeyLength {
        /// Length of the rejected key.
        actual: usize,
    },
    /// A wrapped key was not exactly one block.
    #[error("wrapped key must be 16 bytes, got {len}")]
    WrappedKeyLength {
        /// Length of the rejected ciphertext.
        len: usize,
    },
}

/// Failure of a diversification, wrap or unwrap request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The request was malformed.
    #[error(transparent)]
    InputFormat(#[from] InputFormatError),
    /// The cipher capability failed.
    #[error("crypto failure: {0}")]
    Crypto(#[from] CipherError),
}
