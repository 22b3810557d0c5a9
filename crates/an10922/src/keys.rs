//! Key handles and key material.
//!
//! [`MasterKey`] and [`KekKey`] wrap a cipher capability rather than raw
//! bytes, so a hardware key handle can be used wherever a software key is.
//! They are distinct types: a KEK cannot be passed where a master key is
//! expected.
//!
//! [`DiversifiedKey`] is the only secret this crate hands back. It is wiped
//! on drop and never printed by `Debug`.

use core::fmt;

use aes_core::{Aes128Key, SoftAes128, KEY_LEN};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding;
use crate::error::InputFormatError;

/// Master key handle used to derive diversified keys.
pub struct MasterKey<C> {
    cipher: C,
}

impl<C> MasterKey<C> {
    /// Wraps a cipher capability keyed with the master key.
    pub fn new(cipher: C) -> Self {
        Self { cipher }
    }

    pub(crate) fn cipher(&self) -> &C {
        &self.cipher
    }
}

impl MasterKey<SoftAes128> {
    /// Builds a software master key from raw key bytes.
    pub fn from_key(key: &Aes128Key) -> Self {
        Self::new(SoftAes128::new(key))
    }

    /// Builds a software master key from 32 hex characters.
    pub fn from_hex(text: &str) -> Result<Self, InputFormatError> {
        Ok(Self::from_key(&encoding::decode_key(text)?))
    }
}

impl<C> fmt::Debug for MasterKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// Key-encryption key handle used to export diversified keys.
pub struct KekKey<C> {
    cipher: C,
}

impl<C> KekKey<C> {
    /// Wraps a cipher capability keyed with the KEK.
    pub fn new(cipher: C) -> Self {
        Self { cipher }
    }

    pub(crate) fn cipher(&self) -> &C {
        &self.cipher
    }
}

impl KekKey<SoftAes128> {
    /// Builds a software KEK from raw key bytes.
    pub fn from_key(key: &Aes128Key) -> Self {
        Self::new(SoftAes128::new(key))
    }

    /// Builds a software KEK from 32 hex characters.
    pub fn from_hex(text: &str) -> Result<Self, InputFormatError> {
        Ok(Self::from_key(&encoding::decode_key(text)?))
    }
}

impl<C> fmt::Debug for KekKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KekKey(<redacted>)")
    }
}

/// A 16-byte key derived from a master key and a diversification input.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DiversifiedKey([u8; KEY_LEN]);

impl DiversifiedKey {
    /// Adopts existing key bytes, for example an unwrapped export.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses a diversified key from 32 hex characters.
    pub fn from_hex(text: &str) -> Result<Self, InputFormatError> {
        let mut bytes = encoding::decode(text)?;
        let parsed = <[u8; KEY_LEN]>::try_from(bytes.as_slice())
            .map(Self)
            .map_err(|_| InputFormatError::KeyLength { actual: bytes.len() });
        bytes.zeroize();
        parsed
    }

    /// Borrows the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Uppercase hex of the key bytes. The caller owns the returned secret.
    pub fn to_hex(&self) -> String {
        encoding::encode_upper(&self.0)
    }
}

impl fmt::Debug for DiversifiedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DiversifiedKey(<redacted>)")
    }
}

/// A diversified key encrypted under a KEK. Safe to log and transmit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedKey(Vec<u8>);

impl WrappedKey {
    pub(crate) fn from_vec(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parses ciphertext produced by [`crate::wrap`] from hex.
    pub fn from_hex(text: &str) -> Result<Self, InputFormatError> {
        Ok(Self(encoding::decode(text)?))
    }

    /// Borrows the ciphertext bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Ciphertext length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the ciphertext is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Uppercase hex of the ciphertext.
    pub fn to_hex(&self) -> String {
        encoding::encode_upper(&self.0)
    }
}

impl fmt::Display for WrappedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
