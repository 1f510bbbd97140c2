// SPDX-License-Identifier: MIT

use crate::bits::read_flag;
use binread::BinRead;
use serde::Serialize;

const SEVEN_BIT_VIC_MARKER: u8 = 0x40;

#[derive(BinRead, Debug, Clone, PartialEq, Serialize)]
#[br(import(length: u8))]
pub struct VideoDataBlock {
    #[br(count = length)]
    pub short_video_descriptors: Vec<ShortVideoDescriptor>,
}

/// One-byte video descriptor.
///
/// Codes with bit 6 set carry a 7-bit VIC and no native flag; the others carry a 6-bit VIC
/// with the native flag in bit 7.
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[br(map = |raw: u8| Self::from(raw))]
pub struct ShortVideoDescriptor {
    pub raw: u8,
    pub vic: u8,
    pub native: bool,
}

impl From<u8> for ShortVideoDescriptor {
    fn from(raw: u8) -> Self {
        if raw & SEVEN_BIT_VIC_MARKER != 0 {
            Self {
                raw,
                vic: raw & 0x7F,
                native: false,
            }
        } else {
            Self {
                raw,
                vic: raw & 0x3F,
                native: read_flag(raw, 7),
            }
        }
    }
}

impl ShortVideoDescriptor {
    pub fn format(&self) -> Option<&'static VideoFormat> {
        match self.vic {
            0 => None,
            vic => VIDEO_FORMATS.get(vic as usize),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VideoFormat {
    pub vic: u8,
    pub format: &'static str,
    pub field_rate_hz: u16,
    pub picture_aspect_ratio: &'static str,
}

impl VideoFormat {
    const fn new(
        vic: u8,
        format: &'static str,
        field_rate_hz: u16,
        picture_aspect_ratio: &'static str,
    ) -> Self {
        Self {
            vic,
            format,
            field_rate_hz,
            picture_aspect_ratio,
        }
    }
}

// Indexed by VIC. Rates are nominal, so 60 also covers 59.94.
pub static VIDEO_FORMATS: [VideoFormat; 108] = [
    VideoFormat::new(0, "No VIC", 0, ""),
    VideoFormat::new(1, "640x480p", 60, "4:3"),
    VideoFormat::new(2, "720x480p", 60, "4:3"),
    VideoFormat::new(3, "720x480p", 60, "16:9"),
    VideoFormat::new(4, "1280x720p", 60, "16:9"),
    VideoFormat::new(5, "1920x1080i", 60, "16:9"),
    VideoFormat::new(6, "720(1440)x480i", 60, "4:3"),
    VideoFormat::new(7, "720(1440)x480i", 60, "16:9"),
    VideoFormat::new(8, "720(1440)x240p", 60, "4:3"),
    VideoFormat::new(9, "720(1440)x240p", 60, "16:9"),
    VideoFormat::new(10, "2880x480i", 60, "4:3"),
    VideoFormat::new(11, "2880x480i", 60, "16:9"),
    VideoFormat::new(12, "2880x240p", 60, "4:3"),
    VideoFormat::new(13, "2880x240p", 60, "16:9"),
    VideoFormat::new(14, "1440x480p", 60, "4:3"),
    VideoFormat::new(15, "1440x480p", 60, "16:9"),
    VideoFormat::new(16, "1920x1080p", 60, "16:9"),
    VideoFormat::new(17, "720x576p", 50, "4:3"),
    VideoFormat::new(18, "720x576p", 50, "16:9"),
    VideoFormat::new(19, "1280x720p", 50, "16:9"),
    VideoFormat::new(20, "1920x1080i", 50, "16:9"),
    VideoFormat::new(21, "720(1440)x576i", 50, "4:3"),
    VideoFormat::new(22, "720(1440)x576i", 50, "16:9"),
    VideoFormat::new(23, "720(1440)x288p", 50, "4:3"),
    VideoFormat::new(24, "720(1440)x288p", 50, "16:9"),
    VideoFormat::new(25, "2880x576i", 50, "4:3"),
    VideoFormat::new(26, "2880x576i", 50, "16:9"),
    VideoFormat::new(27, "2880x288p", 50, "4:3"),
    VideoFormat::new(28, "2880x288p", 50, "16:9"),
    VideoFormat::new(29, "1440x576p", 50, "4:3"),
    VideoFormat::new(30, "1440x576p", 50, "16:9"),
    VideoFormat::new(31, "1920x1080p", 50, "16:9"),
    VideoFormat::new(32, "1920x1080p", 24, "16:9"),
    VideoFormat::new(33, "1920x1080p", 25, "16:9"),
    VideoFormat::new(34, "1920x1080p", 30, "16:9"),
    VideoFormat::new(35, "2880x480p", 60, "4:3"),
    VideoFormat::new(36, "2880x480p", 60, "16:9"),
    VideoFormat::new(37, "2880x576p", 50, "4:3"),
    VideoFormat::new(38, "2880x576p", 50, "16:9"),
    VideoFormat::new(39, "1920x1080i", 50, "16:9"),
    VideoFormat::new(40, "1920x1080i", 100, "16:9"),
    VideoFormat::new(41, "1280x720p", 100, "16:9"),
    VideoFormat::new(42, "720x576p", 100, "4:3"),
    VideoFormat::new(43, "720x576p", 100, "16:9"),
    VideoFormat::new(44, "720(1440)x576i", 100, "4:3"),
    VideoFormat::new(45, "720(1440)x576i", 100, "16:9"),
    VideoFormat::new(46, "1920x1080i", 120, "16:9"),
    VideoFormat::new(47, "1280x720p", 120, "16:9"),
    VideoFormat::new(48, "720x480p", 120, "4:3"),
    VideoFormat::new(49, "720x480p", 120, "16:9"),
    VideoFormat::new(50, "720(1440)x480i", 120, "4:3"),
    VideoFormat::new(51, "720(1440)x480i", 120, "16:9"),
    VideoFormat::new(52, "720x576p", 200, "4:3"),
    VideoFormat::new(53, "720x576p", 200, "16:9"),
    VideoFormat::new(54, "720(1440)x576i", 200, "4:3"),
    VideoFormat::new(55, "720(1440)x576i", 200, "16:9"),
    VideoFormat::new(56, "720x480p", 240, "4:3"),
    VideoFormat::new(57, "720x480p", 240, "16:9"),
    VideoFormat::new(58, "720(1440)x480i", 240, "4:3"),
    VideoFormat::new(59, "720(1440)x480i", 240, "16:9"),
    VideoFormat::new(60, "1280x720p", 24, "16:9"),
    VideoFormat::new(61, "1280x720p", 25, "16:9"),
    VideoFormat::new(62, "1280x720p", 30, "16:9"),
    VideoFormat::new(63, "1920x1080p", 120, "16:9"),
    VideoFormat::new(64, "1920x1080p", 100, "16:9"),
    VideoFormat::new(65, "1280x720p", 24, "64:27"),
    VideoFormat::new(66, "1280x720p", 25, "64:27"),
    VideoFormat::new(67, "1280x720p", 30, "64:27"),
    VideoFormat::new(68, "1280x720p", 50, "64:27"),
    VideoFormat::new(69, "1280x720p", 60, "64:27"),
    VideoFormat::new(70, "1280x720p", 100, "64:27"),
    VideoFormat::new(71, "1280x720p", 120, "64:27"),
    VideoFormat::new(72, "1920x1080p", 24, "64:27"),
    VideoFormat::new(73, "1920x1080p", 25, "64:27"),
    VideoFormat::new(74, "1920x1080p", 30, "64:27"),
    VideoFormat::new(75, "1920x1080p", 50, "64:27"),
    VideoFormat::new(76, "1920x1080p", 60, "64:27"),
    VideoFormat::new(77, "1920x1080p", 100, "64:27"),
    VideoFormat::new(78, "1920x1080p", 120, "64:27"),
    VideoFormat::new(79, "1680x720p", 24, "64:27"),
    VideoFormat::new(80, "1680x720p", 25, "64:27"),
    VideoFormat::new(81, "1680x720p", 30, "64:27"),
    VideoFormat::new(82, "1680x720p", 50, "64:27"),
    VideoFormat::new(83, "1680x720p", 60, "64:27"),
    VideoFormat::new(84, "1680x720p", 100, "64:27"),
    VideoFormat::new(85, "1680x720p", 120, "64:27"),
    VideoFormat::new(86, "2560x1080p", 24, "64:27"),
    VideoFormat::new(87, "2560x1080p", 25, "64:27"),
    VideoFormat::new(88, "2560x1080p", 30, "64:27"),
    VideoFormat::new(89, "2560x1080p", 50, "64:27"),
    VideoFormat::new(90, "2560x1080p", 60, "64:27"),
    VideoFormat::new(91, "2560x1080p", 100, "64:27"),
    VideoFormat::new(92, "2560x1080p", 120, "64:27"),
    VideoFormat::new(93, "3840x2160p", 24, "16:9"),
    VideoFormat::new(94, "3840x2160p", 25, "16:9"),
    VideoFormat::new(95, "3840x2160p", 30, "16:9"),
    VideoFormat::new(96, "3840x2160p", 50, "16:9"),
    VideoFormat::new(97, "3840x2160p", 60, "16:9"),
    VideoFormat::new(98, "4096x2160p", 24, "256:135"),
    VideoFormat::new(99, "4096x2160p", 25, "256:135"),
    VideoFormat::new(100, "4096x2160p", 30, "256:135"),
    VideoFormat::new(101, "4096x2160p", 50, "256:135"),
    VideoFormat::new(102, "4096x2160p", 60, "256:135"),
    VideoFormat::new(103, "3840x2160p", 24, "64:27"),
    VideoFormat::new(104, "3840x2160p", 25, "64:27"),
    VideoFormat::new(105, "3840x2160p", 30, "64:27"),
    VideoFormat::new(106, "3840x2160p", 50, "64:27"),
    VideoFormat::new(107, "3840x2160p", 60, "64:27"),
];
