//! The diversification input.

use core::str::FromStr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding;
use crate::error::InputFormatError;

/// Longest input any framing accepts.
pub const MAX_INPUT_LEN: usize = 32;

/// Between 1 and [`MAX_INPUT_LEN`] bytes identifying what the key is for,
/// typically a card UID followed by application and system identifiers.
///
/// Wiped on drop like the framed block built from it.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DiversificationInput(Vec<u8>);

impl DiversificationInput {
    /// Validates raw input bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, InputFormatError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(InputFormatError::EmptyInput);
        }
        if bytes.len() > MAX_INPUT_LEN {
            return Err(InputFormatError::InputTooLong {
                len: bytes.len(),
                max: MAX_INPUT_LEN,
            });
        }
        Ok(Self(bytes))
    }

    /// Decodes and validates an even-length hex string.
    pub fn from_hex(text: &str) -> Result<Self, InputFormatError> {
        Self::new(encoding::decode(text)?)
    }

    /// Borrows the input bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Input length in bytes; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromStr for DiversificationInput {
    type Err = InputFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<&[u8]> for DiversificationInput {
    type Error = InputFormatError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_to_thirty_two_bytes() {
        assert!(DiversificationInput::new(vec![0u8; 1]).is_ok());
        assert_eq!(DiversificationInput::new(vec![0u8; 32]).unwrap().len(), 32);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(
            DiversificationInput::new(Vec::new()),
            Err(InputFormatError::EmptyInput)
        );
        assert_eq!("".parse::<DiversificationInput>(), Err(InputFormatError::EmptyInput));
    }

    #[test]
    fn rejects_inputs_past_two_blocks() {
        assert_eq!(
            DiversificationInput::new(vec![0u8; 33]),
            Err(InputFormatError::InputTooLong { len: 33, max: 32 })
        );
    }

    #[test]
    fn parses_hex() {
        let input: DiversificationInput = "0102030405060708".parse().unwrap();
        assert_eq!(input.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(matches!(
            DiversificationInput::from_hex("010"),
            Err(InputFormatError::InvalidHex(_))
        ));
    }

    #[test]
    fn input_bytes_are_wiped() {
        fn wiped_on_drop<T: ZeroizeOnDrop>() {}
        wiped_on_drop::<DiversificationInput>();

        let mut input = DiversificationInput::from_hex("04782E21801D80").unwrap();
        input.zeroize();
        assert!(input.as_bytes().is_empty());
    }

    #[test]
    fn try_from_slice() {
        let bytes = [0xaau8; 4];
        let input = DiversificationInput::try_from(&bytes[..]).unwrap();
        assert_eq!(input.as_bytes(), &bytes);
    }
}
