// SPDX-License-Identifier: MIT

use crate::bits::{byte_at, EDID_BLOCK_LENGTH};
use crate::cea::audio::AudioDataBlock;
use crate::cea::extended::ExtendedTagDataBlock;
use crate::cea::speaker::SpeakerAllocation;
use crate::cea::vendor::VendorSpecificDataBlock;
use crate::cea::video::VideoDataBlock;
use crate::dtd::{read_detailed_timings, DetailedTimingDescriptor};
use crate::{read_structure, Result};
use binread::{BinRead, BinReaderExt};
use log::{debug, trace, warn};
use modular_bitfield::prelude::*;
use serde::Serialize;
use std::io::Cursor;
use strum::FromRepr;

pub mod audio;
pub mod extended;
pub mod speaker;
pub mod vendor;
pub mod video;

pub const CEA_EXTENSION_TAG: u8 = 0x02;

const DATA_BLOCK_COLLECTION_OFFSET: u8 = 4;
const CHECKSUM_OFFSET: usize = EDID_BLOCK_LENGTH - 1;
// largest payload a 5-bit length can declare
const MAX_DATA_BLOCK_PAYLOAD: usize = 0x1F;

#[derive(BinRead, Debug, Clone)]
pub struct ExtensionHeader {
    pub tag: u8,
    pub revision: u8,
    pub dtd_start: u8,
    pub capabilities: CeaCapabilities,
}

#[bitfield]
#[derive(Copy, Clone, Debug, BinRead)]
pub struct CeaCapabilities {
    pub native_dtds: B4,
    pub ycbcr422: bool,
    pub ycbcr444: bool,
    pub basic_audio: bool,
    pub underscan: bool,
}

#[bitfield]
#[derive(Copy, Clone, Debug)]
pub struct DataBlockHeader {
    pub length: B5,
    pub tag: B3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRepr)]
#[repr(u8)]
pub enum DataBlockTag {
    Audio = 1,
    Video = 2,
    VendorSpecific = 3,
    SpeakerAllocation = 4,
    ExtendedTag = 7,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DataBlock {
    Audio(AudioDataBlock),
    Video(VideoDataBlock),
    VendorSpecific(VendorSpecificDataBlock),
    SpeakerAllocation(SpeakerAllocation),
    ExtendedTag(ExtendedTagDataBlock),
}

impl DataBlock {
    /// Decodes one block payload. Returns `Ok(None)` for tags without a decoder.
    pub fn parse(
        tag: u8,
        payload: &DataBlockPayload,
        video: Option<&VideoDataBlock>,
    ) -> Result<Option<Self>> {
        let length = payload.length;
        let mut cursor = Cursor::new(&payload.bytes[..]);

        let data_block = match DataBlockTag::from_repr(tag) {
            Some(DataBlockTag::Audio) => {
                DataBlock::Audio(cursor.read_le_args::<AudioDataBlock>((length,))?)
            }
            Some(DataBlockTag::Video) => {
                DataBlock::Video(cursor.read_le_args::<VideoDataBlock>((length,))?)
            }
            Some(DataBlockTag::VendorSpecific) => DataBlock::VendorSpecific(
                cursor.read_le_args::<VendorSpecificDataBlock>((length,))?,
            ),
            Some(DataBlockTag::SpeakerAllocation) => {
                DataBlock::SpeakerAllocation(cursor.read_le::<SpeakerAllocation>()?)
            }
            Some(DataBlockTag::ExtendedTag) => {
                match ExtendedTagDataBlock::parse(payload, video)? {
                    Some(extended) => DataBlock::ExtendedTag(extended),
                    None => return Ok(None),
                }
            }
            None => return Ok(None),
        };

        Ok(Some(data_block))
    }
}

/// Payload bytes of one data block, zero-filled past the declared length.
#[derive(Debug, Clone)]
pub struct DataBlockPayload {
    pub length: u8,
    pub bytes: [u8; MAX_DATA_BLOCK_PAYLOAD],
}

impl DataBlockPayload {
    pub fn read(block: &[u8], start: usize, length: u8) -> Self {
        let mut bytes = [0u8; MAX_DATA_BLOCK_PAYLOAD];
        for (index, byte) in bytes.iter_mut().take(length as usize).enumerate() {
            *byte = byte_at(block, start + index);
        }
        Self { length, bytes }
    }

    pub fn data(&self) -> &[u8] {
        &self.bytes[..self.length as usize]
    }
}

/// Walks the length-prefixed data blocks between `start` and `end`.
///
/// The cursor always advances by the declared length, so unknown or undecodable blocks are
/// skipped without losing track of the following ones.
pub fn read_data_block_collection(block: &[u8], start: usize, end: usize) -> Vec<DataBlock> {
    let mut data_blocks: Vec<DataBlock> = Vec::new();
    let mut offset = start;

    while offset < end {
        let header = DataBlockHeader::from_bytes([byte_at(block, offset)]);
        let length = header.length();
        let payload = DataBlockPayload::read(block, offset + 1, length);
        trace!(
            "Data block at {}: tag {} length {}",
            offset,
            header.tag(),
            length
        );

        let video = data_blocks.iter().rev().find_map(|data_block| match data_block {
            DataBlock::Video(video) => Some(video),
            _ => None,
        });
        match DataBlock::parse(header.tag(), &payload, video) {
            Ok(Some(data_block)) => data_blocks.push(data_block),
            Ok(None) => debug!(
                "Skipping data block with unsupported tag {} at {}",
                header.tag(),
                offset
            ),
            Err(err) => warn!("Failed to read data block at {}: {:?}", offset, err),
        }

        offset += length as usize + 1;
    }

    data_blocks
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdidExtension {
    pub block_number: u8,
    pub ext_tag: u8,
    pub revision_number: u8,
    pub dtd_start: u8,
    pub num_dtds: u8,
    pub underscan: bool,
    pub basic_audio: bool,
    pub ycbcr444: bool,
    pub ycbcr422: bool,
    pub data_block_collection: Option<Vec<DataBlock>>,
    pub dtds: Vec<DetailedTimingDescriptor>,
    pub checksum: u8,
}

impl EdidExtension {
    pub fn parse(block_number: u8, block: &[u8; EDID_BLOCK_LENGTH]) -> Result<Self> {
        let header = read_structure::<ExtensionHeader>(block, 0)?;
        trace!("Extension block {} header: {:?}", block_number, header);
        if header.tag != CEA_EXTENSION_TAG {
            debug!(
                "Extension block {} has tag {:#04X}, decoding it as CEA-861",
                block_number, header.tag
            );
        }

        let dtd_start = header.dtd_start as usize;
        let data_block_collection = if header.dtd_start != DATA_BLOCK_COLLECTION_OFFSET {
            Some(read_data_block_collection(
                block,
                DATA_BLOCK_COLLECTION_OFFSET as usize,
                dtd_start.min(CHECKSUM_OFFSET),
            ))
        } else {
            None
        };

        // a zero offset means the block carries neither data blocks nor timings
        let dtds = if dtd_start < DATA_BLOCK_COLLECTION_OFFSET as usize {
            Vec::new()
        } else {
            read_detailed_timings(block, dtd_start, CHECKSUM_OFFSET).0
        };

        let capabilities = header.capabilities;
        Ok(Self {
            block_number,
            ext_tag: header.tag,
            revision_number: header.revision,
            dtd_start: header.dtd_start,
            num_dtds: capabilities.native_dtds(),
            underscan: capabilities.underscan(),
            basic_audio: capabilities.basic_audio(),
            ycbcr444: capabilities.ycbcr444(),
            ycbcr422: capabilities.ycbcr422(),
            data_block_collection,
            dtds,
            checksum: block[CHECKSUM_OFFSET],
        })
    }

    pub fn data_blocks(&self) -> &[DataBlock] {
        self.data_block_collection.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::bits::calc_checksum;
    use crate::cea::audio::AudioFormatDetail;
    use crate::cea::extended::ExtendedTagDataBlock;
    use crate::dtd::tests::DTD_1080P;
    use log::LevelFilter;
    use simplelog::{Config, TestLogger};

    /// Builds a CEA extension block from raw data blocks followed by timings.
    pub(crate) fn cea_block(
        data_blocks: &[&[u8]],
        dtds: &[[u8; 18]],
        capabilities: u8,
    ) -> [u8; EDID_BLOCK_LENGTH] {
        let mut block = [0u8; EDID_BLOCK_LENGTH];
        block[0] = CEA_EXTENSION_TAG;
        block[1] = 3;
        block[3] = capabilities;
        let mut offset = 4;
        for data_block in data_blocks {
            block[offset..offset + data_block.len()].copy_from_slice(data_block);
            offset += data_block.len();
        }
        block[2] = offset as u8;
        for dtd in dtds {
            block[offset..offset + 18].copy_from_slice(dtd);
            offset += 18;
        }
        block[127] = calc_checksum(&block);
        block
    }

    #[test]
    fn test_extension_header() {
        let _ = TestLogger::init(LevelFilter::Trace, Config::default());
        let block = cea_block(&[], &[DTD_1080P, DTD_1080P], 0b1111_0010);
        let extension = EdidExtension::parse(1, &block).unwrap();
        assert_eq!(1, extension.block_number);
        assert_eq!(CEA_EXTENSION_TAG, extension.ext_tag);
        assert_eq!(3, extension.revision_number);
        assert_eq!(4, extension.dtd_start);
        assert_eq!(2, extension.num_dtds);
        assert!(extension.underscan);
        assert!(extension.basic_audio);
        assert!(extension.ycbcr444);
        assert!(extension.ycbcr422);
        assert_eq!(None, extension.data_block_collection);
        assert_eq!(2, extension.dtds.len());
        assert_eq!(block[127], extension.checksum);
    }

    #[test]
    fn test_unknown_tag_does_not_desync() {
        let _ = TestLogger::init(LevelFilter::Trace, Config::default());
        // tag 0 (reserved) with two payload bytes, then an LPCM audio block
        let reserved: &[u8] = &[0x02, 0xAA, 0xBB];
        let audio: &[u8] = &[0x23, 0x09, 0x07, 0x07];
        let block = cea_block(&[reserved, audio], &[DTD_1080P], 0x40);
        let extension = EdidExtension::parse(1, &block).unwrap();

        assert_eq!(11, extension.dtd_start);
        let data_blocks = extension.data_blocks();
        assert_eq!(1, data_blocks.len());
        match &data_blocks[0] {
            DataBlock::Audio(audio) => {
                assert_eq!(1, audio.short_audio_descriptors.len());
                let sad = &audio.short_audio_descriptors[0];
                assert_eq!(1, sad.format);
                assert_eq!(2, sad.max_channels);
                assert!(matches!(sad.detail, AudioFormatDetail::BitDepth(_)));
            }
            other => panic!("Unexpected data block {:?}", other),
        }
        assert_eq!(1, extension.dtds.len());
    }

    #[test]
    fn test_unsupported_extended_tag_is_skipped() {
        // HDR static metadata (extended tag 6) is not decoded
        let hdr: &[u8] = &[0xE3, 0x06, 0x05, 0x01];
        let speakers: &[u8] = &[0x83, 0x4F, 0x00, 0x00];
        let block = cea_block(&[hdr, speakers], &[], 0);
        let extension = EdidExtension::parse(1, &block).unwrap();
        assert_eq!(1, extension.data_blocks().len());
        assert!(matches!(
            extension.data_blocks()[0],
            DataBlock::SpeakerAllocation(_)
        ));
    }

    #[test]
    fn test_capability_map_uses_sibling_video_block() {
        let video: &[u8] = &[0x44, 0x90, 0x04, 0x61, 0x5F];
        // second and fourth descriptors support 4:2:0
        let map: &[u8] = &[0xE2, 0x0F, 0b0000_1010];
        let block = cea_block(&[video, map], &[], 0);
        let extension = EdidExtension::parse(1, &block).unwrap();

        let data_blocks = extension.data_blocks();
        assert_eq!(2, data_blocks.len());
        match &data_blocks[1] {
            DataBlock::ExtendedTag(ExtendedTagDataBlock::YCbCr420CapabilityMap(map)) => {
                let vics: Vec<u8> = map
                    .short_video_descriptors
                    .iter()
                    .map(|svd| svd.vic)
                    .collect();
                assert_eq!(vec![4, 95], vics);
            }
            other => panic!("Unexpected data block {:?}", other),
        }
    }

    #[test]
    fn test_zero_dtd_start() {
        let mut block = [0u8; EDID_BLOCK_LENGTH];
        block[0] = CEA_EXTENSION_TAG;
        block[1] = 3;
        let extension = EdidExtension::parse(1, &block).unwrap();
        assert_eq!(Some(vec![]), extension.data_block_collection);
        assert!(extension.dtds.is_empty());
    }

    #[test]
    fn test_overlong_block_is_bounded() {
        let mut block = [0u8; EDID_BLOCK_LENGTH];
        block[0] = CEA_EXTENSION_TAG;
        block[1] = 3;
        block[2] = 0xFF;
        for byte in block[4..127].iter_mut() {
            // video blocks of maximum length
            *byte = 0x5F;
        }
        let extension = EdidExtension::parse(1, &block).unwrap();
        assert!(!extension.data_blocks().is_empty());
        assert!(extension.dtds.is_empty());
    }
}
