//! Block cipher capabilities and the software AES-128 implementation.

use core::fmt;

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::block::Block;
use crate::error::CipherError;
use crate::key::Aes128Key;

/// A key handle able to encrypt single AES blocks (ECB, no padding).
///
/// Implementations must be usable concurrently through `&self`; any
/// per-call state lives on the stack of the call.
pub trait BlockEncryptor {
    /// Encrypts one 16-byte block.
    fn encrypt_block(&self, block: &Block) -> Result<Block, CipherError>;
}

/// A key handle able to decrypt single AES blocks.
pub trait BlockDecryptor {
    /// Decrypts one 16-byte block.
    fn decrypt_block(&self, block: &Block) -> Result<Block, CipherError>;
}

impl<T: BlockEncryptor + ?Sized> BlockEncryptor for &T {
    fn encrypt_block(&self, block: &Block) -> Result<Block, CipherError> {
        (**self).encrypt_block(block)
    }
}

impl<T: BlockDecryptor + ?Sized> BlockDecryptor for &T {
    fn decrypt_block(&self, block: &Block) -> Result<Block, CipherError> {
        (**self).decrypt_block(block)
    }
}

/// Software AES-128 with a pre-expanded key schedule.
#[derive(Clone)]
pub struct SoftAes128 {
    cipher: Aes128,
}

impl SoftAes128 {
    /// Expands `key` into a ready-to-use cipher.
    pub fn new(key: &Aes128Key) -> Self {
        Self {
            cipher: Aes128::new(key.as_bytes().into()),
        }
    }

    /// Builds a cipher from a raw slice, rejecting anything but 16 bytes.
    pub fn from_slice(key: &[u8]) -> Result<Self, CipherError> {
        let cipher = Aes128::new_from_slice(key)
            .map_err(|_| CipherError::InvalidKeyLength { actual: key.len() })?;
        Ok(Self { cipher })
    }
}

impl BlockEncryptor for SoftAes128 {
    fn encrypt_block(&self, block: &Block) -> Result<Block, CipherError> {
        let mut out = *block;
        self.cipher.encrypt_block((&mut out).into());
        Ok(out)
    }
}

impl BlockDecryptor for SoftAes128 {
    fn decrypt_block(&self, block: &Block) -> Result<Block, CipherError> {
        let mut out = *block;
        self.cipher.decrypt_block((&mut out).into());
        Ok(out)
    }
}

impl fmt::Debug for SoftAes128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftAes128").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    // AES-128 of the zero block under the zero key.
    const ZERO_KEY_ZERO_BLOCK: [u8; 16] = [
        0x66, 0xe9, 0x4b, 0xd4, 0xef, 0x8a, 0x2c, 0x3b, 0x88, 0x4c, 0xfa, 0x59, 0xca, 0x34, 0x2b,
        0x2e,
    ];

    #[test]
    fn encrypt_matches_fips197_vector() {
        let cipher = SoftAes128::new(&Aes128Key::from(NIST_KEY));
        assert_eq!(cipher.encrypt_block(&NIST_PLAIN), Ok(NIST_CIPHER));
    }

    #[test]
    fn decrypt_matches_fips197_vector() {
        let cipher = SoftAes128::new(&Aes128Key::from(NIST_KEY));
        assert_eq!(cipher.decrypt_block(&NIST_CIPHER), Ok(NIST_PLAIN));
    }

    #[test]
    fn zero_key_encrypts_zero_block() {
        let cipher = SoftAes128::new(&Aes128Key::from([0u8; 16]));
        assert_eq!(cipher.encrypt_block(&[0u8; 16]), Ok(ZERO_KEY_ZERO_BLOCK));
    }

    #[test]
    fn from_slice_rejects_aes256_key() {
        let err = SoftAes128::from_slice(&[0u8; 32]).unwrap_err();
        assert_eq!(err, CipherError::InvalidKeyLength { actual: 32 });
    }

    #[test]
    fn reference_forwards_to_inner_cipher() {
        let cipher = SoftAes128::from_slice(&NIST_KEY).unwrap();
        let by_ref = &cipher;
        assert_eq!(BlockEncryptor::encrypt_block(&by_ref, &NIST_PLAIN), Ok(NIST_CIPHER));
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let cipher = SoftAes128::new(&Aes128Key::from(key_bytes));
            let ct = cipher.encrypt_block(&block).unwrap();
            let pt = cipher.decrypt_block(&ct).unwrap();
            assert_eq!(pt, block);
        }
    }

    #[test]
    fn soft_aes_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SoftAes128>();
    }
}
