//! NXP AN10922 key diversification for AES-128.
//!
//! A diversified key is derived from a master key and a short
//! diversification input (for example a card UID) with a two-block
//! AES-CMAC construction, then optionally wrapped under a key-encryption
//! key for export:
//!
//! 1. `K1`, `K2` are derived from `AES_K(0^128)` by doubling in GF(2^128).
//! 2. The input is framed into 32 bytes, padded with `80 00..` when shorter
//!    than 31 bytes.
//! 3. The matching subkey is folded into the last block and the two blocks
//!    are CBC-encrypted under the master key; the last ciphertext block is
//!    the diversified key.
//! 4. [`wrap`] encrypts the result under the KEK with AES-CBC, zero IV.
//!
//! All cryptography goes through the [`aes_core::BlockEncryptor`]
//! capability, so key handles held by a hardware module work the same way
//! as software keys. Calls are stateless and can run in parallel against
//! the same keys.
//!
//! ```
//! use an10922::{Diversifier, DiversifierConfig, DiversificationInput, Framing, KekKey, MasterKey};
//!
//! let master = MasterKey::from_hex("00112233445566778899AABBCCDDEEFF")?;
//! let kek = KekKey::from_hex("000102030405060708090A0B0C0D0E0F")?;
//! let input: DiversificationInput = "04782E21801D803042F54E585020416275".parse()?;
//!
//! let diversifier = Diversifier::with_config(DiversifierConfig { framing: Framing::An10922 });
//! let (key, wrapped) = diversifier.diversify_and_wrap(&master, &kek, &input)?;
//! assert_eq!(key.to_hex(), "A8DD63A3B89D54B37CA802473FDA9175");
//! assert_eq!(an10922::unwrap(&kek, &wrapped)?, key);
//! # Ok::<(), an10922::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod encoding;
mod engine;
mod error;
mod framer;
pub mod gf;
mod input;
mod keys;
mod subkeys;
mod wrap;

pub use crate::engine::{diversify, Diversifier, DiversifierConfig};
pub use crate::error::{Error, InputFormatError};
pub use crate::framer::{frame, FramedBlock, Framing, ParseFramingError, FRAME_LEN};
pub use crate::gf::double;
pub use crate::input::{DiversificationInput, MAX_INPUT_LEN};
pub use crate::keys::{DiversifiedKey, KekKey, MasterKey, WrappedKey};
pub use crate::subkeys::{derive_subkeys, SubkeyPair};
pub use crate::wrap::{unwrap, wrap};
