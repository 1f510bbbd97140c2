// SPDX-License-Identifier: MIT

use crate::bits::read_bits;
use binread::BinRead;
use bitflags::bitflags;
use serde::Serialize;
use strum::{Display, FromRepr};

pub const SHORT_AUDIO_DESCRIPTOR_LENGTH: u8 = 3;

// Highest format code decoded by each variant of AudioFormatDetail, in variant order.
const LPCM_FORMATS: u8 = 1;
const BIT_RATE_FORMATS: u8 = 8;
const FORMAT_DEPENDENT_FORMATS: u8 = 13;
const PROFILE_FORMATS: u8 = 14;

#[derive(BinRead, Debug, Clone, PartialEq, Serialize)]
#[br(import(length: u8))]
pub struct AudioDataBlock {
    #[br(count = length / SHORT_AUDIO_DESCRIPTOR_LENGTH)]
    pub short_audio_descriptors: Vec<ShortAudioDescriptor>,
}

#[derive(BinRead, Debug, Clone, PartialEq, Serialize)]
pub struct ShortAudioDescriptor {
    #[br(restore_position, map = |raw: u8| read_bits(raw, 3, 0x0F))]
    pub format: u8,
    #[br(map = |raw: u8| read_bits(raw, 0, 0x07) + 1)]
    pub max_channels: u8,
    pub sample_rates: SampleRates,
    #[br(args(format))]
    pub detail: AudioFormatDetail,
}

impl ShortAudioDescriptor {
    pub fn audio_format(&self) -> AudioFormat {
        AudioFormat::from_repr(self.format).unwrap_or(AudioFormat::Reserved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRepr, Display)]
#[repr(u8)]
pub enum AudioFormat {
    Reserved = 0,
    #[strum(serialize = "LPCM")]
    Lpcm = 1,
    #[strum(serialize = "AC-3")]
    Ac3 = 2,
    #[strum(serialize = "MPEG-1")]
    Mpeg1 = 3,
    #[strum(serialize = "MP3")]
    Mp3 = 4,
    #[strum(serialize = "MPEG-2")]
    Mpeg2 = 5,
    #[strum(serialize = "AAC LC")]
    AacLc = 6,
    #[strum(serialize = "DTS")]
    Dts = 7,
    #[strum(serialize = "ATRAC")]
    Atrac = 8,
    #[strum(serialize = "One Bit Audio")]
    OneBitAudio = 9,
    #[strum(serialize = "Enhanced AC-3")]
    EnhancedAc3 = 10,
    #[strum(serialize = "DTS-HD")]
    DtsHd = 11,
    #[strum(serialize = "MAT")]
    Mat = 12,
    #[strum(serialize = "DST")]
    Dst = 13,
    #[strum(serialize = "WMA Pro")]
    WmaPro = 14,
    #[strum(serialize = "Extended")]
    Extended = 15,
}

/// Meaning of the third descriptor byte, selected by the audio format code.
#[derive(BinRead, Debug, Clone, PartialEq, Serialize)]
#[br(import(format: u8))]
pub enum AudioFormatDetail {
    #[br(pre_assert(format <= LPCM_FORMATS))]
    BitDepth(SampleSizes),
    #[br(pre_assert(format <= BIT_RATE_FORMATS))]
    BitRate(MaxBitRate),
    #[br(pre_assert(format <= FORMAT_DEPENDENT_FORMATS))]
    FormatDependent(u8),
    #[br(pre_assert(format <= PROFILE_FORMATS))]
    Profile(AudioProfile),
    ExtensionCode(AudioFormatExtension),
}

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(map = |raw: u8| Self(raw & 0x7F))]
pub struct SampleRates(u8);

bitflags! {
    impl SampleRates: u8 {
        const Khz32 = 1 << 0;
        const Khz44_1 = 1 << 1;
        const Khz48 = 1 << 2;
        const Khz88_2 = 1 << 3;
        const Khz96 = 1 << 4;
        const Khz176_4 = 1 << 5;
        const Khz192 = 1 << 6;
    }
}

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(map = |raw: u8| Self(raw & 0x07))]
pub struct SampleSizes(u8);

bitflags! {
    impl SampleSizes: u8 {
        const Bits16 = 1 << 0;
        const Bits20 = 1 << 1;
        const Bits24 = 1 << 2;
    }
}

/// Maximum bit rate in kbit/s.
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(map = |raw: u8| Self(raw as u16 * 8))]
pub struct MaxBitRate(pub u16);

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(map = |raw: u8| Self(raw & 0x07))]
pub struct AudioProfile(pub u8);

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(map = |raw: u8| Self(read_bits(raw, 3, 0x1F)))]
pub struct AudioFormatExtension(pub u8);

#[cfg(test)]
mod tests {
    use super::*;
    use binread::BinReaderExt;
    use std::io::Cursor;

    fn read_block(payload: &[u8]) -> AudioDataBlock {
        Cursor::new(payload)
            .read_le_args::<AudioDataBlock>((payload.len() as u8,))
            .unwrap()
    }

    #[test]
    fn test_lpcm() {
        let block = read_block(&[0x0F, 0x7F, 0x07]);
        let sad = &block.short_audio_descriptors[0];
        assert_eq!(AudioFormat::Lpcm, sad.audio_format());
        assert_eq!("LPCM", sad.audio_format().to_string());
        assert_eq!(8, sad.max_channels);
        assert_eq!(SampleRates::all(), sad.sample_rates);
        assert_eq!(
            AudioFormatDetail::BitDepth(
                SampleSizes::Bits16 | SampleSizes::Bits20 | SampleSizes::Bits24
            ),
            sad.detail
        );
    }

    #[test]
    fn test_detail_by_format() {
        // AC-3, 6 channels, 32/44.1/48 kHz, 640 kbit/s
        // DTS-HD, 8 channels, 48/96/192 kHz, format dependent 0x01
        // WMA Pro, 2 channels, 48 kHz, profile 3
        // extended format, extension code 11
        let block = read_block(&[
            0x15, 0x07, 0x50, 0x5F, 0x54, 0x01, 0x71, 0x04, 0x03, 0x79, 0x04, 0x58,
        ]);
        let details: Vec<AudioFormatDetail> = block
            .short_audio_descriptors
            .iter()
            .map(|sad| sad.detail.clone())
            .collect();

        assert_eq!(
            vec![
                AudioFormatDetail::BitRate(MaxBitRate(640)),
                AudioFormatDetail::FormatDependent(0x01),
                AudioFormatDetail::Profile(AudioProfile(3)),
                AudioFormatDetail::ExtensionCode(AudioFormatExtension(11)),
            ],
            details
        );
        assert_eq!(6, block.short_audio_descriptors[0].max_channels);
        assert_eq!(
            SampleRates::Khz48 | SampleRates::Khz96 | SampleRates::Khz192,
            block.short_audio_descriptors[1].sample_rates
        );
        assert_eq!(AudioFormat::Extended, block.short_audio_descriptors[3].audio_format());
    }

    #[test]
    fn test_partial_descriptor_is_ignored() {
        let block = read_block(&[0x09, 0x07, 0x07, 0x15, 0x07]);
        assert_eq!(1, block.short_audio_descriptors.len());
    }
}
