// SPDX-License-Identifier: MIT

use crate::bits::{valid_checksum, EDID_BLOCK_LENGTH};
use crate::{Error, Result};
use derivative::Derivative;
use log::{debug, trace};

/// EDID bytes decoded from a hex string.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct RawEdid {
    pub length: usize,
    #[derivative(Debug = "ignore")]
    bytes: Vec<u8>,
}

impl RawEdid {
    /// Decodes a hex string, ignoring any whitespace.
    ///
    /// A trailing unpaired digit is read as a byte on its own, so `"F"` decodes to `0x0F`.
    pub fn from_hex(hex_string: &str) -> Result<Self> {
        let mut digits: String = hex_string.split_whitespace().collect();
        if digits.is_empty() {
            return Err(Error::EmptyInput);
        }
        if let Some((index, c)) = digits.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(hex::FromHexError::InvalidHexCharacter { c, index }.into());
        }
        if digits.len() % 2 == 1 {
            trace!("Odd hex digit count {}, padding last digit", digits.len());
            digits.insert(digits.len() - 1, '0');
        }
        let bytes = hex::decode(&digits)?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            length: bytes.len(),
            bytes,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of complete or partial 128-byte blocks in the buffer.
    pub fn block_count(&self) -> usize {
        self.length.div_ceil(EDID_BLOCK_LENGTH)
    }

    /// Returns block `index` zero-padded to 128 bytes, or `None` when the buffer does not reach it.
    pub fn block(&self, index: usize) -> Option<[u8; EDID_BLOCK_LENGTH]> {
        let start = index * EDID_BLOCK_LENGTH;
        if start >= self.length && index > 0 {
            return None;
        }
        let mut block = [0u8; EDID_BLOCK_LENGTH];
        let end = self.length.min(start + EDID_BLOCK_LENGTH);
        if start < end {
            block[..end - start].copy_from_slice(&self.bytes[start..end]);
        }
        Some(block)
    }

    /// Block 0, padded with zeroes when the input is shorter than 128 bytes.
    pub fn base_block(&self) -> [u8; EDID_BLOCK_LENGTH] {
        self.block(0).unwrap_or([0u8; EDID_BLOCK_LENGTH])
    }

    /// Extension block `number` (1-based), only if the buffer is block aligned and holds it
    /// entirely.
    pub fn extension_block(&self, number: usize) -> Option<[u8; EDID_BLOCK_LENGTH]> {
        if self.length % EDID_BLOCK_LENGTH != 0 {
            debug!(
                "Buffer length {} is not a multiple of {}, extension blocks are not decoded",
                self.length, EDID_BLOCK_LENGTH
            );
            return None;
        }
        if (number + 1) * EDID_BLOCK_LENGTH > self.length {
            debug!(
                "Extension block {} is missing from a {} byte buffer",
                number, self.length
            );
            return None;
        }
        self.block(number)
    }

    /// Checksum validity of every block present in the buffer.
    pub fn checksums(&self) -> Vec<bool> {
        (0..self.block_count())
            .filter_map(|index| self.block(index))
            .map(|block| valid_checksum(&block))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_strips_whitespace() {
        let raw = RawEdid::from_hex("00 ff ff ff\n ff FF ff 00\t").unwrap();
        assert_eq!(
            &[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00],
            raw.as_bytes()
        );
        assert_eq!(8, raw.length);
    }

    #[test]
    fn test_from_hex_odd_length() {
        let raw = RawEdid::from_hex("0102F").unwrap();
        assert_eq!(&[0x01, 0x02, 0x0F], raw.as_bytes());
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(matches!(
            RawEdid::from_hex("ZZZZ"),
            Err(Error::InvalidHex(_))
        ));
        assert!(matches!(RawEdid::from_hex("  \n"), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_from_hex_odd_length_non_hex_tail() {
        assert!(matches!(
            RawEdid::from_hex("0\u{e9}"),
            Err(Error::InvalidHex(hex::FromHexError::InvalidHexCharacter { c: '\u{e9}', index: 1 }))
        ));
        assert!(matches!(
            RawEdid::from_hex("00Z"),
            Err(Error::InvalidHex(hex::FromHexError::InvalidHexCharacter { c: 'Z', index: 2 }))
        ));
        assert!(matches!(
            RawEdid::from_hex("\u{e9}\u{e9}0"),
            Err(Error::InvalidHex(_))
        ));
    }

    #[test]
    fn test_short_base_block_is_padded() {
        let raw = RawEdid::from_bytes(vec![0xAA; 10]);
        let block = raw.base_block();
        assert_eq!([0xAA; 10], block[..10]);
        assert!(block[10..].iter().all(|b| *b == 0));
        assert_eq!(1, raw.block_count());
    }

    #[test]
    fn test_extension_block_requires_alignment() {
        let raw = RawEdid::from_bytes(vec![0x11; EDID_BLOCK_LENGTH * 2]);
        assert_eq!(Some([0x11; EDID_BLOCK_LENGTH]), raw.extension_block(1));
        assert_eq!(None, raw.extension_block(2));

        let unaligned = RawEdid::from_bytes(vec![0x11; EDID_BLOCK_LENGTH * 2 + 1]);
        assert_eq!(None, unaligned.extension_block(1));
    }
}
