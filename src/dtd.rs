// SPDX-License-Identifier: MIT

use crate::bits::{byte_at, combine_split_field, read_bits};
use crate::{read_structure, Result};
use binread::BinRead;
use log::{trace, warn};
use modular_bitfield::prelude::*;
use serde::Serialize;

pub const DTD_LENGTH: usize = 18;

#[derive(BinRead, Debug, Clone)]
#[br(little)]
pub struct RawDetailedTiming {
    pub pixel_clock: u16,
    pub horizontal_active_lo: u8,
    pub horizontal_blanking_lo: u8,
    pub horizontal_hi: u8,
    pub vertical_active_lo: u8,
    pub vertical_blanking_lo: u8,
    pub vertical_hi: u8,
    pub horizontal_sync_offset_lo: u8,
    pub horizontal_sync_pulse_lo: u8,
    pub vertical_sync_lo: u8,
    pub sync_hi: u8,
    pub horizontal_image_size_lo: u8,
    pub vertical_image_size_lo: u8,
    pub image_size_hi: u8,
    pub horizontal_border: u8,
    pub vertical_border: u8,
    pub flags: DetailedTimingFlags,
}

#[bitfield]
#[derive(Copy, Clone, Debug, BinRead)]
pub struct DetailedTimingFlags {
    pub stereo_low: bool,
    // hsync polarity for digital separate sync, sync on all RGB lines otherwise
    pub sync_bit_1: bool,
    // vsync polarity for digital separate sync, serration otherwise
    pub sync_bit_2: bool,
    pub sync_type: SyncType,
    pub stereo_high: B2,
    pub interlaced: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, BitfieldSpecifier, Serialize)]
#[bits = 2]
pub enum SyncType {
    AnalogComposite = 0x0,
    BipolarAnalogComposite = 0x1,
    DigitalComposite = 0x2,
    DigitalSeparate = 0x3,
}

/// Meaning of flag bits 1 and 2, which depends on the sync type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum SyncDetails {
    Separate {
        v_sync_polarity: bool,
        h_sync_polarity: bool,
    },
    Composite {
        v_sync_serrated: bool,
        sync_all_rgb_lines: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedTimingDescriptor {
    pub pixel_clock_mhz: f64,
    pub horizontal_active_pixels: u16,
    pub horizontal_blanking_pixels: u16,
    pub vertical_active_lines: u16,
    pub vertical_blanking_lines: u16,
    pub horizontal_sync_offset: u16,
    pub horizontal_sync_pulse: u16,
    pub vertical_sync_offset: u16,
    pub vertical_sync_pulse: u16,
    pub horizontal_display_size_mm: u16,
    pub vertical_display_size_mm: u16,
    pub horizontal_border_pixels: u8,
    pub vertical_border_lines: u8,
    pub interlaced: bool,
    pub stereo_mode: u8,
    pub sync_type: SyncType,
    pub sync: SyncDetails,
}

impl From<RawDetailedTiming> for DetailedTimingDescriptor {
    fn from(raw: RawDetailedTiming) -> Self {
        let flags = raw.flags;
        let sync_type = flags.sync_type();
        let sync = match sync_type {
            SyncType::DigitalSeparate => SyncDetails::Separate {
                v_sync_polarity: flags.sync_bit_2(),
                h_sync_polarity: flags.sync_bit_1(),
            },
            _ => SyncDetails::Composite {
                v_sync_serrated: flags.sync_bit_2(),
                sync_all_rgb_lines: flags.sync_bit_1(),
            },
        };

        Self {
            pixel_clock_mhz: raw.pixel_clock as f64 / 100.0,
            horizontal_active_pixels: combine_split_field(
                read_bits(raw.horizontal_hi, 4, 0x0F),
                raw.horizontal_active_lo,
                8,
            ),
            horizontal_blanking_pixels: combine_split_field(
                read_bits(raw.horizontal_hi, 0, 0x0F),
                raw.horizontal_blanking_lo,
                8,
            ),
            vertical_active_lines: combine_split_field(
                read_bits(raw.vertical_hi, 4, 0x0F),
                raw.vertical_active_lo,
                8,
            ),
            vertical_blanking_lines: combine_split_field(
                read_bits(raw.vertical_hi, 0, 0x0F),
                raw.vertical_blanking_lo,
                8,
            ),
            horizontal_sync_offset: combine_split_field(
                read_bits(raw.sync_hi, 6, 0x03),
                raw.horizontal_sync_offset_lo,
                8,
            ),
            horizontal_sync_pulse: combine_split_field(
                read_bits(raw.sync_hi, 4, 0x03),
                raw.horizontal_sync_pulse_lo,
                8,
            ),
            vertical_sync_offset: combine_split_field(
                read_bits(raw.sync_hi, 2, 0x03),
                read_bits(raw.vertical_sync_lo, 4, 0x0F),
                4,
            ),
            vertical_sync_pulse: combine_split_field(
                read_bits(raw.sync_hi, 0, 0x03),
                read_bits(raw.vertical_sync_lo, 0, 0x0F),
                4,
            ),
            horizontal_display_size_mm: combine_split_field(
                read_bits(raw.image_size_hi, 4, 0x0F),
                raw.horizontal_image_size_lo,
                8,
            ),
            vertical_display_size_mm: combine_split_field(
                read_bits(raw.image_size_hi, 0, 0x0F),
                raw.vertical_image_size_lo,
                8,
            ),
            horizontal_border_pixels: raw.horizontal_border,
            vertical_border_lines: raw.vertical_border,
            interlaced: flags.interlaced(),
            stereo_mode: (flags.stereo_high() << 1) | flags.stereo_low() as u8,
            sync_type,
            sync,
        }
    }
}

impl DetailedTimingDescriptor {
    pub fn parse(slot: &[u8]) -> Result<Self> {
        let raw = read_structure::<RawDetailedTiming>(slot, 0)?;
        Ok(raw.into())
    }

    pub fn horizontal_total(&self) -> u32 {
        self.horizontal_active_pixels as u32 + self.horizontal_blanking_pixels as u32
    }

    pub fn vertical_total(&self) -> u32 {
        self.vertical_active_lines as u32 + self.vertical_blanking_lines as u32
    }

    pub fn refresh_rate_hz(&self) -> Option<f64> {
        let total = self.horizontal_total() * self.vertical_total();
        if total == 0 {
            None
        } else {
            Some(self.pixel_clock_mhz * 1_000_000.0 / total as f64)
        }
    }
}

/// A descriptor slot holds a timing unless its pixel clock is zero.
pub fn is_timing_slot(data: &[u8], offset: usize) -> bool {
    byte_at(data, offset) != 0 || byte_at(data, offset + 1) != 0
}

/// Reads consecutive 18-byte timings from `start` while they fit before `end`.
///
/// Returns the timings and the offset of the first slot that was not consumed.
pub fn read_detailed_timings(
    data: &[u8],
    start: usize,
    end: usize,
) -> (Vec<DetailedTimingDescriptor>, usize) {
    let mut dtds = Vec::new();
    let mut offset = start;
    let end = end.min(data.len());

    while offset + DTD_LENGTH <= end && is_timing_slot(data, offset) {
        trace!("Reading detailed timing at {}", offset);
        match DetailedTimingDescriptor::parse(&data[offset..offset + DTD_LENGTH]) {
            Ok(dtd) => dtds.push(dtd),
            Err(err) => {
                warn!("Failed to read detailed timing at {}: {:?}", offset, err);
                break;
            }
        }
        offset += DTD_LENGTH;
    }

    (dtds, offset)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // 1920x1080@60, 509x286 mm, digital separate sync, both polarities positive
    pub(crate) const DTD_1080P: [u8; DTD_LENGTH] = [
        0x02, 0x3A, 0x80, 0x18, 0x71, 0x38, 0x2D, 0x40, 0x58, 0x2C, 0x45, 0x00, 0xFD, 0x1E, 0x11,
        0x00, 0x00, 0x1E,
    ];

    #[test]
    fn test_parse_1080p() {
        let dtd = DetailedTimingDescriptor::parse(&DTD_1080P).unwrap();
        assert_eq!(148.5, dtd.pixel_clock_mhz);
        assert_eq!(1920, dtd.horizontal_active_pixels);
        assert_eq!(280, dtd.horizontal_blanking_pixels);
        assert_eq!(1080, dtd.vertical_active_lines);
        assert_eq!(45, dtd.vertical_blanking_lines);
        assert_eq!(88, dtd.horizontal_sync_offset);
        assert_eq!(44, dtd.horizontal_sync_pulse);
        assert_eq!(4, dtd.vertical_sync_offset);
        assert_eq!(5, dtd.vertical_sync_pulse);
        assert_eq!(509, dtd.horizontal_display_size_mm);
        assert_eq!(286, dtd.vertical_display_size_mm);
        assert!(!dtd.interlaced);
        assert_eq!(0, dtd.stereo_mode);
        assert_eq!(SyncType::DigitalSeparate, dtd.sync_type);
        assert_eq!(
            SyncDetails::Separate {
                v_sync_polarity: true,
                h_sync_polarity: true
            },
            dtd.sync
        );
        let refresh = dtd.refresh_rate_hz().unwrap();
        assert!((refresh - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_flags_depend_on_sync_type() {
        let mut slot = DTD_1080P;
        // interlaced, stereo 0b101, analog composite, serrated, no sync on RGB
        slot[17] = 0b1100_0101;
        let dtd = DetailedTimingDescriptor::parse(&slot).unwrap();
        assert!(dtd.interlaced);
        assert_eq!(0b101, dtd.stereo_mode);
        assert_eq!(SyncType::AnalogComposite, dtd.sync_type);
        assert_eq!(
            SyncDetails::Composite {
                v_sync_serrated: true,
                sync_all_rgb_lines: false
            },
            dtd.sync
        );
    }

    #[test]
    fn test_stereo_mode_bit_positions() {
        let mut slot = DTD_1080P;
        for (flags, stereo_mode) in [
            (0b0000_0001, 0b001),
            (0b0010_0000, 0b010),
            (0b0100_0000, 0b100),
            (0b0110_0001, 0b111),
        ] {
            slot[17] = flags;
            let dtd = DetailedTimingDescriptor::parse(&slot).unwrap();
            assert_eq!(stereo_mode, dtd.stereo_mode, "flags {:#010b}", flags);
            assert_eq!(SyncType::AnalogComposite, dtd.sync_type);
            assert!(!dtd.interlaced);
        }
    }

    #[test]
    fn test_read_stops_at_zero_pixel_clock() {
        let mut data = vec![0u8; DTD_LENGTH * 3];
        data[..DTD_LENGTH].copy_from_slice(&DTD_1080P);
        // second slot is a display descriptor
        data[DTD_LENGTH + 3] = 0xFC;
        data[DTD_LENGTH * 2..].copy_from_slice(&DTD_1080P);

        let (dtds, next) = read_detailed_timings(&data, 0, data.len());
        assert_eq!(1, dtds.len());
        assert_eq!(DTD_LENGTH, next);
    }

    #[test]
    fn test_read_stops_when_slot_does_not_fit() {
        let mut data = vec![0u8; DTD_LENGTH * 2];
        data[..DTD_LENGTH].copy_from_slice(&DTD_1080P);
        data[DTD_LENGTH..].copy_from_slice(&DTD_1080P);

        let (dtds, next) = read_detailed_timings(&data, 0, DTD_LENGTH * 2 - 1);
        assert_eq!(1, dtds.len());
        assert_eq!(DTD_LENGTH, next);
    }
}
