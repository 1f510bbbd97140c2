// SPDX-License-Identifier: MIT

use binread::BinRead;
use bitflags::bitflags;
use serde::Serialize;

/// Speaker allocation payload, packed little-endian from its three bytes.
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(map = |raw: [u8; 3]| Self(u32::from_le_bytes([raw[0], raw[1], raw[2], 0])))]
pub struct SpeakerAllocation(u32);

bitflags! {
    impl SpeakerAllocation: u32 {
        const FrontLeftRight = 1 << 0;
        const LowFrequencyEffects = 1 << 1;
        const FrontCenter = 1 << 2;
        const RearLeftRight = 1 << 3;
        const RearCenter = 1 << 4;
        const FrontLeftRightCenter = 1 << 5;
        const RearLeftRightCenter = 1 << 6;
        const FrontLeftRightWide = 1 << 7;
        const FrontLeftRightHigh = 1 << 8;
        const TopCenter = 1 << 9;
        const FrontCenterHigh = 1 << 10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binread::BinReaderExt;
    use std::io::Cursor;

    #[test]
    fn test_packed_little_endian() {
        let speakers = Cursor::new([0x4F, 0x02, 0x00])
            .read_le::<SpeakerAllocation>()
            .unwrap();
        assert_eq!(0x024F, speakers.bits());
        assert!(speakers.contains(
            SpeakerAllocation::FrontLeftRight
                | SpeakerAllocation::LowFrequencyEffects
                | SpeakerAllocation::FrontCenter
                | SpeakerAllocation::RearLeftRight
                | SpeakerAllocation::RearLeftRightCenter
                | SpeakerAllocation::TopCenter
        ));
        assert!(!speakers.contains(SpeakerAllocation::RearCenter));
    }
}
