// SPDX-License-Identifier: MIT

//! Helpers for fields packed across byte boundaries.
//!
//! EDID spreads many values over a "low byte" plus a few high bits stored in a
//! shared byte elsewhere in the structure. These helpers keep the shift/mask
//! arithmetic in one place.

pub const EDID_BLOCK_LENGTH: usize = 128;

/// Returns the byte at `index`, or 0 when `index` is past the end of `data`.
pub fn byte_at(data: &[u8], index: usize) -> u8 {
    data.get(index).copied().unwrap_or(0)
}

/// Extracts `(byte >> shift) & mask`.
pub fn read_bits(byte: u8, shift: u8, mask: u8) -> u8 {
    byte.checked_shr(shift as u32).unwrap_or(0) & mask
}

/// Reads a single bit as a flag.
pub fn read_flag(byte: u8, bit: u8) -> bool {
    read_bits(byte, bit, 0x01) != 0
}

/// Joins the high part of a split field with its low part: `(high << low_width) | low`.
pub fn combine_split_field(high: u8, low: u8, low_width: u32) -> u16 {
    ((high as u16) << low_width) | low as u16
}

/// Computes the checksum byte for a 128-byte block: the value that makes the sum of all
/// 128 bytes a multiple of 256.
pub fn calc_checksum(block: &[u8]) -> u8 {
    let sum = (0..EDID_BLOCK_LENGTH - 1)
        .map(|index| byte_at(block, index))
        .fold(0u8, |sum, byte| sum.wrapping_add(byte));
    0u8.wrapping_sub(sum)
}

pub fn valid_checksum(block: &[u8]) -> bool {
    calc_checksum(block) == byte_at(block, EDID_BLOCK_LENGTH - 1)
}
