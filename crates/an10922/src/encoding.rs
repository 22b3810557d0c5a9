//! Hex text at the crate boundary.
//!
//! Output is always uppercase (`0123456789ABCDEF`); input is accepted in
//! either case.

use aes_core::Aes128Key;
use zeroize::Zeroize;

use crate::error::InputFormatError;

/// Encodes bytes as uppercase hex.
pub fn encode_upper(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_upper(bytes)
}

/// Decodes an even-length hex string. Any character outside
/// `[0-9A-Fa-f]`, whitespace included, is rejected.
pub fn decode(text: &str) -> Result<Vec<u8>, InputFormatError> {
    Ok(hex::decode(text)?)
}

/// Decodes a 32-character hex string into an AES-128 key.
pub fn decode_key(text: &str) -> Result<Aes128Key, InputFormatError> {
    let mut bytes = decode(text)?;
    let key = Aes128Key::try_from(bytes.as_slice())
        .map_err(|_| InputFormatError::KeyLength { actual: bytes.len() });
    bytes.zeroize();
    key
}
