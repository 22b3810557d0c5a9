//! The diversification engine.
//!
//! A diversified key is the last block of a two-block CBC-MAC over the
//! framed input, with the matching CMAC subkey folded into the final block:
//!
//! ```text
//! C0 = AES_K(D0)
//! C1 = AES_K(C0 ^ D1 ^ (padded ? K2 : K1))
//! ```
//!
//! `C1` is the diversified key.

use aes_core::{cbc_encrypt_zero_iv, xor, Block, BlockEncryptor, BLOCK_LEN};
use tracing::debug;
use zeroize::Zeroize;

use crate::error::Error;
use crate::framer::{frame, Framing, FRAME_LEN};
use crate::input::DiversificationInput;
use crate::keys::{DiversifiedKey, KekKey, MasterKey, WrappedKey};
use crate::subkeys::derive_subkeys;
use crate::wrap::wrap;

/// Configuration for a [`Diversifier`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiversifierConfig {
    /// Layout of the framed input.
    pub framing: Framing,
}

/// Derives diversified keys. Holds configuration only; no key material.
#[derive(Clone, Debug, Default)]
pub struct Diversifier {
    config: DiversifierConfig,
}

impl Diversifier {
    /// Creates a diversifier with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a diversifier with explicit configuration.
    pub fn with_config(config: DiversifierConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DiversifierConfig {
        &self.config
    }

    /// Derives the diversified key for `input` under `master`.
    ///
    /// Either a complete key is returned or an error; no intermediate
    /// buffer survives the call.
    pub fn diversify<C: BlockEncryptor>(
        &self,
        master: &MasterKey<C>,
        input: &DiversificationInput,
    ) -> Result<DiversifiedKey, Error> {
        let framed = frame(input, self.config.framing)?;
        let subkeys = derive_subkeys(master)?;
        debug!(
            framing = %self.config.framing,
            input_len = input.len(),
            padded = framed.padded(),
            "diversifying"
        );

        let mut plaintext = [0u8; FRAME_LEN];
        plaintext[..BLOCK_LEN].copy_from_slice(framed.first());
        let mut last = xor(framed.last(), subkeys.for_final_block(framed.padded()));
        plaintext[BLOCK_LEN..].copy_from_slice(&last);
        last.zeroize();

        let encrypted = cbc_encrypt_zero_iv(master.cipher(), &plaintext);
        plaintext.zeroize();
        let mut ciphertext = encrypted?;

        let mut key: Block = [0u8; BLOCK_LEN];
        key.copy_from_slice(&ciphertext[BLOCK_LEN..FRAME_LEN]);
        ciphertext.zeroize();
        Ok(DiversifiedKey::from_bytes(key))
    }

    /// Derives the diversified key and wraps it under `kek` in one call.
    pub fn diversify_and_wrap<C, K>(
        &self,
        master: &MasterKey<C>,
        kek: &KekKey<K>,
        input: &DiversificationInput,
    ) -> Result<(DiversifiedKey, WrappedKey), Error>
    where
        C: BlockEncryptor,
        K: BlockEncryptor,
    {
        let key = self.diversify(master, input)?;
        let wrapped = wrap(kek, &key)?;
        Ok((key, wrapped))
    }
}

/// Derives the diversified key with the default framing.
pub fn diversify<C: BlockEncryptor>(
    master: &MasterKey<C>,
    input: &DiversificationInput,
) -> Result<DiversifiedKey, Error> {
    Diversifier::new().diversify(master, input)
}
