//! Builds the 32-byte CMAC input `D` from a diversification input.

use core::fmt;
use core::str::FromStr;

use aes_core::{Block, BLOCK_LEN};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::InputFormatError;
use crate::input::{DiversificationInput, MAX_INPUT_LEN};

/// Length of the framed input: two AES blocks.
pub const FRAME_LEN: usize = 2 * BLOCK_LEN;

/// First byte of CMAC padding.
const PAD_MARKER: u8 = 0x80;

/// AES-128 diversification constant placed ahead of `M` by [`Framing::An10922`].
const AN10922_DIV_CONSTANT: u8 = 0x01;

/// Inputs shorter than this are padded.
const PADDED_BELOW: usize = 31;

/// How the input is laid out in `D`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Framing {
    /// `D = M || padding`, `M` up to 32 bytes. A 31-byte `M` is left
    /// unpadded and its trailing byte stays zero.
    #[default]
    Unprefixed,
    /// `D = 0x01 || M || padding`, `M` up to 31 bytes, exactly as the
    /// application note lays it out.
    An10922,
}

impl Framing {
    /// Longest input this framing accepts.
    pub fn max_input_len(self) -> usize {
        match self {
            Framing::Unprefixed => MAX_INPUT_LEN,
            Framing::An10922 => MAX_INPUT_LEN - 1,
        }
    }

    fn prefix(self) -> &'static [u8] {
        match self {
            Framing::Unprefixed => &[],
            Framing::An10922 => &[AN10922_DIV_CONSTANT],
        }
    }
}

impl fmt::Display for Framing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Framing::Unprefixed => "unprefixed",
            Framing::An10922 => "an10922",
        })
    }
}

/// Unknown framing name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown framing `{0}`, expected `unprefixed` or `an10922`")]
pub struct ParseFramingError(String);

impl FromStr for Framing {
    type Err = ParseFramingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unprefixed" => Ok(Framing::Unprefixed),
            "an10922" => Ok(Framing::An10922),
            _ => Err(ParseFramingError(s.to_owned())),
        }
    }
}

/// The two blocks `D0 || D1` and whether padding was applied.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct FramedBlock {
    blocks: [Block; 2],
    padded: bool,
}

impl FramedBlock {
    /// `D0`.
    pub fn first(&self) -> &Block {
        &self.blocks[0]
    }

    /// `D1`, the block the subkey is folded into.
    pub fn last(&self) -> &Block {
        &self.blocks[1]
    }

    /// Whether `0x80 00..` padding was appended.
    pub fn padded(&self) -> bool {
        self.padded
    }
}

/// Lays `input` out into two blocks according to `framing`.
pub fn frame(
    input: &DiversificationInput,
    framing: Framing,
) -> Result<FramedBlock, InputFormatError> {
    let message = input.as_bytes();
    let max = framing.max_input_len();
    if message.len() > max {
        return Err(InputFormatError::InputTooLong {
            len: message.len(),
            max,
        });
    }

    let prefix = framing.prefix();
    let mut data = [0u8; FRAME_LEN];
    data[..prefix.len()].copy_from_slice(prefix);
    let end = prefix.len() + message.len();
    data[prefix.len()..end].copy_from_slice(message);

    let padded = message.len() < PADDED_BELOW;
    if padded {
        data[end] = PAD_MARKER;
    }

    let mut blocks = [[0u8; BLOCK_LEN]; 2];
    blocks[0].copy_from_slice(&data[..BLOCK_LEN]);
    blocks[1].copy_from_slice(&data[BLOCK_LEN..]);
    data.zeroize();

    Ok(FramedBlock { blocks, padded })
}
