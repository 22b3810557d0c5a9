//! AES-128 building blocks shared across the an10922 workspace.
//!
//! This crate provides:
//! - The [`BlockEncryptor`]/[`BlockDecryptor`] capability traits that the
//!   diversification engine is written against, so hardware-backed key
//!   handles can stand in for software keys.
//! - [`SoftAes128`], a software capability backed by the RustCrypto `aes` crate.
//! - Zero-IV, no-padding CBC over any capability.
//! - Block helpers and the zeroizing [`Aes128Key`] container.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod key;
mod mode;

pub use crate::block::{xor, xor_in_place, Block, BLOCK_LEN};
pub use crate::cipher::{BlockDecryptor, BlockEncryptor, SoftAes128};
pub use crate::error::CipherError;
pub use crate::key::{Aes128Key, KEY_LEN};
pub use crate::mode::{cbc_decrypt_zero_iv, cbc_encrypt_zero_iv};
