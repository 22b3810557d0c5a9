//! Export of diversified keys under a key-encryption key.
//!
//! AES-CBC, zero IV, no padding. A diversified key is one block, so the
//! wrapped form is one block too.

use aes_core::{cbc_decrypt_zero_iv, cbc_encrypt_zero_iv, BlockDecryptor, BlockEncryptor, KEY_LEN};
use tracing::trace;
use zeroize::Zeroize;

use crate::error::{Error, InputFormatError};
use crate::keys::{DiversifiedKey, KekKey, WrappedKey};

/// Encrypts `key` under `kek`.
pub fn wrap<C: BlockEncryptor>(kek: &KekKey<C>, key: &DiversifiedKey) -> Result<WrappedKey, Error> {
    let ciphertext = cbc_encrypt_zero_iv(kek.cipher(), key.as_bytes())?;
    trace!(len = ciphertext.len(), "wrapped diversified key");
    Ok(WrappedKey::from_vec(ciphertext))
}

/// Recovers a diversified key from its wrapped form.
pub fn unwrap<C: BlockDecryptor>(
    kek: &KekKey<C>,
    wrapped: &WrappedKey,
) -> Result<DiversifiedKey, Error> {
    if wrapped.len() != KEY_LEN {
        return Err(InputFormatError::WrappedKeyLength { len: wrapped.len() }.into());
    }
    let mut plaintext = cbc_decrypt_zero_iv(kek.cipher(), wrapped.as_bytes())?;
    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&plaintext);
    plaintext.zeroize();
    Ok(DiversifiedKey::from_bytes(bytes))
}
