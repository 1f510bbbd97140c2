// SPDX-License-Identifier: MIT

use binread::BinRead;
use bitflags::bitflags;
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const HDMI14_OUI: u32 = 0x000C03;
pub const HDMI_FORUM_OUI: u32 = 0xC45DD8;

#[derive(BinRead, Debug, Clone, PartialEq, Serialize)]
#[br(import(length: u8))]
pub struct VendorSpecificDataBlock {
    #[br(map = |raw: [u8; 3]| u32::from_le_bytes([raw[0], raw[1], raw[2], 0]))]
    pub ieee_identifier: u32,
    #[br(if(ieee_identifier == HDMI14_OUI), args(length))]
    pub hdmi14: Option<Hdmi14VendorData>,
    #[br(if(ieee_identifier == HDMI_FORUM_OUI))]
    pub hdmi_forum: Option<HdmiForumVendorData>,
}

/// HDMI Licensing block. Fields after the physical address are present only when the
/// declared payload length reaches them.
#[derive(BinRead, Debug, Clone, PartialEq, Serialize)]
#[br(import(length: u8))]
pub struct Hdmi14VendorData {
    pub physical_address: PhysicalAddress,
    #[br(if(length > 5))]
    pub capabilities: Option<Hdmi14Capabilities>,
    #[br(if(length > 6))]
    pub max_tmds_clock: Option<TmdsClock>,
    #[br(if(length > 7))]
    pub latency_presence: Option<LatencyPresence>,
    #[br(if(length > 9 && has_flag(latency_presence, LatencyPresence::Latency)))]
    pub latency: Option<Latency>,
    #[br(if(length > 11 && latency.is_some() && has_flag(latency_presence, LatencyPresence::InterlacedLatency)))]
    pub interlaced_latency: Option<Latency>,
}

/// CEC physical address, printed as `a.b.c.d`.
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(map = |raw: [u8; 2]| Self(u16::from_be_bytes(raw)))]
pub struct PhysicalAddress(pub u16);

impl Display for PhysicalAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let address = self.0;
        write!(
            f,
            "{}.{}.{}.{}",
            address >> 12,
            (address >> 8) & 0x0F,
            (address >> 4) & 0x0F,
            address & 0x0F
        )
    }
}

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hdmi14Capabilities(u8);

bitflags! {
    impl Hdmi14Capabilities: u8 {
        const DualDvi = 1 << 0;
        const DeepColorY444 = 1 << 3;
        const DeepColor30 = 1 << 4;
        const DeepColor36 = 1 << 5;
        const DeepColor48 = 1 << 6;
        const SupportsAi = 1 << 7;
    }
}

/// Maximum TMDS clock in MHz.
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(map = |raw: u8| Self(raw as u16 * 5))]
pub struct TmdsClock(pub u16);

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatencyPresence(u8);

bitflags! {
    impl LatencyPresence: u8 {
        const InterlacedLatency = 1 << 6;
        const Latency = 1 << 7;
    }
}

fn has_flag(presence: Option<LatencyPresence>, flag: LatencyPresence) -> bool {
    presence.map_or(false, |presence| presence.contains(flag))
}

/// Video and audio latency in milliseconds.
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Latency {
    #[br(map = latency_ms)]
    pub video_ms: i16,
    #[br(map = latency_ms)]
    pub audio_ms: i16,
}

fn latency_ms(raw: u8) -> i16 {
    (raw as i16 - 1) * 2
}

/// HDMI Forum block payload. It has no physical address; that field is only
/// present in the HDMI 1.4 block.
#[derive(BinRead, Debug, Clone, PartialEq, Serialize)]
pub struct HdmiForumVendorData {
    pub version: u8,
    #[br(map = |raw: u8| raw as u16 * 5)]
    pub max_tmds_character_rate_mhz: u16,
    pub features: HdmiForumFeatures,
    pub deep_color_420: DeepColor420,
}

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HdmiForumFeatures(u8);

bitflags! {
    impl HdmiForumFeatures: u8 {
        const Osd3dDisparity = 1 << 0;
        const DualView = 1 << 1;
        const IndependentView = 1 << 2;
        const Lte340McscScramble = 1 << 3;
        const ReadRequestCapable = 1 << 6;
        const ScdcPresent = 1 << 7;
    }
}

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(map = |raw: u8| Self(raw & 0x07))]
pub struct DeepColor420(u8);

bitflags! {
    impl DeepColor420: u8 {
        const DeepColor30 = 1 << 0;
        const DeepColor36 = 1 << 1;
        const DeepColor48 = 1 << 2;
    }
}
