// SPDX-License-Identifier: MIT

use crate::cea::video::{ShortVideoDescriptor, VideoDataBlock};
use crate::cea::DataBlockPayload;
use crate::Result;
use binread::{BinRead, BinReaderExt};
use bitflags::bitflags;
use log::{debug, trace};
use modular_bitfield::prelude::*;
use serde::Serialize;
use std::io::Cursor;
use strum::FromRepr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRepr)]
#[repr(u8)]
pub enum ExtendedTag {
    VideoCapability = 0,
    Colorimetry = 5,
    YCbCr420Video = 14,
    YCbCr420CapabilityMap = 15,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExtendedTagDataBlock {
    VideoCapability(VideoCapabilityDataBlock),
    Colorimetry(ColorimetryDataBlock),
    YCbCr420Video(VideoDataBlock),
    YCbCr420CapabilityMap(YCbCr420CapabilityMapDataBlock),
}

impl ExtendedTagDataBlock {
    /// Decodes an extended tag block. `video` is the closest preceding video block of the
    /// same collection, which the 4:2:0 capability map refers to.
    pub fn parse(
        payload: &DataBlockPayload,
        video: Option<&VideoDataBlock>,
    ) -> Result<Option<Self>> {
        let data = payload.data();
        let Some(tag_code) = data.first().copied() else {
            debug!("Extended tag block without a tag byte");
            return Ok(None);
        };
        let body_length = payload.length.saturating_sub(1);
        let mut cursor = Cursor::new(&payload.bytes[1..]);

        let block = match ExtendedTag::from_repr(tag_code) {
            Some(ExtendedTag::VideoCapability) => ExtendedTagDataBlock::VideoCapability(
                cursor.read_le::<VideoCapabilityFlags>()?.into(),
            ),
            Some(ExtendedTag::Colorimetry) => {
                ExtendedTagDataBlock::Colorimetry(cursor.read_le::<ColorimetryDataBlock>()?)
            }
            Some(ExtendedTag::YCbCr420Video) => ExtendedTagDataBlock::YCbCr420Video(
                cursor.read_le_args::<VideoDataBlock>((body_length,))?,
            ),
            Some(ExtendedTag::YCbCr420CapabilityMap) => {
                ExtendedTagDataBlock::YCbCr420CapabilityMap(
                    YCbCr420CapabilityMapDataBlock::resolve(&data[1..], video),
                )
            }
            None => {
                trace!("Unsupported extended tag {}", tag_code);
                return Ok(None);
            }
        };

        Ok(Some(block))
    }
}

#[bitfield]
#[derive(Copy, Clone, Debug, BinRead)]
pub struct VideoCapabilityFlags {
    pub ce_overscan: OverscanBehavior,
    pub it_overscan: OverscanBehavior,
    pub pt_overscan: OverscanBehavior,
    pub rgb_quantization_selectable: bool,
    pub ycc_quantization_selectable: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, BitfieldSpecifier, Serialize)]
#[bits = 2]
pub enum OverscanBehavior {
    NotSupported = 0x0,
    AlwaysOverscanned = 0x1,
    AlwaysUnderscanned = 0x2,
    Selectable = 0x3,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoCapabilityDataBlock {
    pub ycc_quantization_selectable: bool,
    pub rgb_quantization_selectable: bool,
    pub pt_overscan: OverscanBehavior,
    pub it_overscan: OverscanBehavior,
    pub ce_overscan: OverscanBehavior,
}

impl From<VideoCapabilityFlags> for VideoCapabilityDataBlock {
    fn from(flags: VideoCapabilityFlags) -> Self {
        Self {
            ycc_quantization_selectable: flags.ycc_quantization_selectable(),
            rgb_quantization_selectable: flags.rgb_quantization_selectable(),
            pt_overscan: flags.pt_overscan(),
            it_overscan: flags.it_overscan(),
            ce_overscan: flags.ce_overscan(),
        }
    }
}

#[derive(BinRead, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorimetryDataBlock {
    pub colorimetry: Colorimetry,
    #[br(map = |raw: u8| raw & 0x0F)]
    pub metadata_profiles: u8,
}

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Colorimetry(u8);

bitflags! {
    impl Colorimetry: u8 {
        const XvYcc601 = 1 << 0;
        const XvYcc709 = 1 << 1;
        const SYcc601 = 1 << 2;
        const OpYcc601 = 1 << 3;
        const OpRgb = 1 << 4;
        const Bt2020Cycc = 1 << 5;
        const Bt2020Ycc = 1 << 6;
        const Bt2020Rgb = 1 << 7;
    }
}

/// Video descriptors that also support 4:2:0 sampling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YCbCr420CapabilityMapDataBlock {
    pub short_video_descriptors: Vec<ShortVideoDescriptor>,
}

impl YCbCr420CapabilityMapDataBlock {
    /// Bit `j` of map byte `i` selects descriptor `i * 8 + j` of `video`. An empty map
    /// selects every descriptor.
    pub fn resolve(map: &[u8], video: Option<&VideoDataBlock>) -> Self {
        let Some(video) = video else {
            debug!("YCbCr 4:2:0 capability map without a preceding video block");
            return Self {
                short_video_descriptors: Vec::new(),
            };
        };
        let descriptors = &video.short_video_descriptors;

        let short_video_descriptors = if map.is_empty() {
            descriptors.clone()
        } else {
            map.iter()
                .enumerate()
                .flat_map(|(index, byte)| {
                    (0..8)
                        .filter(move |bit| byte & (1u8 << bit) != 0)
                        .map(move |bit| index * 8 + bit)
                })
                .filter_map(|position| descriptors.get(position).copied())
                .collect()
        };

        Self {
            short_video_descriptors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8], video: Option<&VideoDataBlock>) -> Option<ExtendedTagDataBlock> {
        let payload = DataBlockPayload::read(data, 0, data.len() as u8);
        ExtendedTagDataBlock::parse(&payload, video).unwrap()
    }

    fn video_block(raw: &[u8]) -> VideoDataBlock {
        VideoDataBlock {
            short_video_descriptors: raw
                .iter()
                .map(|byte| ShortVideoDescriptor::from(*byte))
                .collect(),
        }
    }

    #[test]
    fn test_video_capability() {
        let block = parse(&[0x00, 0b1101_1001], None);
        assert_eq!(
            Some(ExtendedTagDataBlock::VideoCapability(VideoCapabilityDataBlock {
                ycc_quantization_selectable: true,
                rgb_quantization_selectable: true,
                pt_overscan: OverscanBehavior::AlwaysOverscanned,
                it_overscan: OverscanBehavior::AlwaysUnderscanned,
                ce_overscan: OverscanBehavior::AlwaysOverscanned,
            })),
            block
        );
    }

    #[test]
    fn test_colorimetry() {
        let block = parse(&[0x05, 0xC3, 0xF1], None);
        assert_eq!(
            Some(ExtendedTagDataBlock::Colorimetry(ColorimetryDataBlock {
                colorimetry: Colorimetry::Bt2020Rgb
                    | Colorimetry::Bt2020Ycc
                    | Colorimetry::XvYcc709
                    | Colorimetry::XvYcc601,
                metadata_profiles: 0x01,
            })),
            block
        );
    }

    #[test]
    fn test_ycbcr420_video() {
        match parse(&[0x0E, 0x61, 0x60], None) {
            Some(ExtendedTagDataBlock::YCbCr420Video(video)) => {
                let vics: Vec<u8> = video
                    .short_video_descriptors
                    .iter()
                    .map(|svd| svd.vic)
                    .collect();
                assert_eq!(vec![97, 96], vics);
            }
            other => panic!("Unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_capability_map() {
        let video = video_block(&[0x10, 0x04, 0x61, 0x5F, 0x60, 0x10, 0x10, 0x10, 0x5E]);
        // first byte selects descriptors 2 and 4, second byte descriptor 8
        let map =
            YCbCr420CapabilityMapDataBlock::resolve(&[0b0001_0100, 0b0000_0001], Some(&video));
        let vics: Vec<u8> = map
            .short_video_descriptors
            .iter()
            .map(|svd| svd.vic)
            .collect();
        assert_eq!(vec![97, 96, 94], vics);
    }

    #[test]
    fn test_capability_map_edge_cases() {
        let video = video_block(&[0x10, 0x04]);
        let all = YCbCr420CapabilityMapDataBlock::resolve(&[], Some(&video));
        assert_eq!(video.short_video_descriptors, all.short_video_descriptors);

        // bits past the last descriptor are ignored
        let partial = YCbCr420CapabilityMapDataBlock::resolve(&[0xFF], Some(&video));
        assert_eq!(2, partial.short_video_descriptors.len());

        let orphan = YCbCr420CapabilityMapDataBlock::resolve(&[0xFF], None);
        assert!(orphan.short_video_descriptors.is_empty());
    }

    #[test]
    fn test_unknown_extended_tag() {
        assert_eq!(None, parse(&[0x06, 0x05, 0x01], None));
        assert_eq!(None, parse(&[], None));
    }
}
