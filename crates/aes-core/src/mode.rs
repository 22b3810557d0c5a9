//! CBC with a fixed all-zero IV and no padding.
//!
//! Both directions take any capability from [`crate::cipher`]. Inputs must
//! already be block aligned; the output has the same length as the input.

use zeroize::Zeroize;

use crate::block::{xor_in_place, Block, BLOCK_LEN};
use crate::cipher::{BlockDecryptor, BlockEncryptor};
use crate::error::CipherError;

fn check_aligned(data: &[u8]) -> Result<(), CipherError> {
    if data.len() % BLOCK_LEN != 0 {
        return Err(CipherError::UnalignedInput { len: data.len() });
    }
    Ok(())
}

/// Encrypts `plaintext` with AES-CBC, zero IV, no padding.
pub fn cbc_encrypt_zero_iv<E>(cipher: &E, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>
where
    E: BlockEncryptor + ?Sized,
{
    check_aligned(plaintext)?;
    let mut out = Vec::with_capacity(plaintext.len());
    let mut chain: Block = [0u8; BLOCK_LEN];
    for chunk in plaintext.chunks_exact(BLOCK_LEN) {
        let mut block: Block = [0u8; BLOCK_LEN];
        block.copy_from_slice(chunk);
        xor_in_place(&mut block, &chain);
        let encrypted = cipher.encrypt_block(&block);
        block.zeroize();
        chain = match encrypted {
            Ok(ct) => ct,
            Err(err) => {
                out.zeroize();
                return Err(err);
            }
        };
        out.extend_from_slice(&chain);
    }
    Ok(out)
}

/// Decrypts `ciphertext` with AES-CBC, zero IV, no padding.
pub fn cbc_decrypt_zero_iv<D>(cipher: &D, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>
where
    D: BlockDecryptor + ?Sized,
{
    check_aligned(ciphertext)?;
    let mut out = Vec::with_capacity(ciphertext.len());
    let mut chain: Block = [0u8; BLOCK_LEN];
    for chunk in ciphertext.chunks_exact(BLOCK_LEN) {
        let mut block: Block = [0u8; BLOCK_LEN];
        block.copy_from_slice(chunk);
        let mut plain = match cipher.decrypt_block(&block) {
            Ok(pt) => pt,
            Err(err) => {
                out.zeroize();
                return Err(err);
            }
        };
        xor_in_place(&mut plain, &chain);
        out.extend_from_slice(&plain);
        plain.zeroize();
        chain = block;
    }
    Ok(out)
}
