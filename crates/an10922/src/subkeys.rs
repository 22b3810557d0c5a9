//! CMAC subkey derivation.

use aes_core::{Block, BlockEncryptor, BLOCK_LEN};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Error;
use crate::gf::double;
use crate::keys::MasterKey;

/// The CMAC subkeys K1 and K2 for one master key.
///
/// Derived per call and wiped on drop; never cached.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SubkeyPair {
    k1: Block,
    k2: Block,
}

impl SubkeyPair {
    /// Subkey applied to an unpadded final block.
    pub fn k1(&self) -> &Block {
        &self.k1
    }

    /// Subkey applied to a padded final block.
    pub fn k2(&self) -> &Block {
        &self.k2
    }

    /// Picks K2 for padded input, K1 otherwise.
    pub fn for_final_block(&self, padded: bool) -> &Block {
        if padded {
            &self.k2
        } else {
            &self.k1
        }
    }
}

impl core::fmt::Debug for SubkeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SubkeyPair(<redacted>)")
    }
}

/// Derives K1 = double(AES(K, 0^128)) and K2 = double(K1).
pub fn derive_subkeys<C: BlockEncryptor>(master: &MasterKey<C>) -> Result<SubkeyPair, Error> {
    let mut k0 = master.cipher().encrypt_block(&[0u8; BLOCK_LEN])?;
    let k1 = double(&k0);
    k0.zeroize();
    let k2 = double(&k1);
    Ok(SubkeyPair { k1, k2 })
}
