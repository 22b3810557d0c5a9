//! Doubling in GF(2^128) as used for CMAC subkeys.

use aes_core::{Block, BLOCK_LEN};

/// Reduction constant for the 128-bit block polynomial x^128 + x^7 + x^2 + x + 1.
const RB: u8 = 0x87;

/// Multiplies `block` by `x`: a one-bit left shift of the big-endian 128-bit
/// value, folding the carried-out bit back in with [`RB`].
///
/// The reduction is applied through a mask so timing does not depend on the
/// top bit.
pub fn double(block: &Block) -> Block {
    let mut out = [0u8; BLOCK_LEN];
    let mut carry = 0u8;
    for (dst, &src) in out.iter_mut().zip(block.iter()).rev() {
        *dst = (src << 1) | carry;
        carry = src >> 7;
    }
    out[BLOCK_LEN - 1] ^= RB & 0u8.wrapping_sub(carry);
    out
}
