// SPDX-License-Identifier: MIT

use crate::bits::{byte_at, combine_split_field, read_bits, read_flag, EDID_BLOCK_LENGTH};
use crate::dtd::{read_detailed_timings, DetailedTimingDescriptor, DTD_LENGTH};
use crate::{read_structure, Result};
use binread::BinRead;
use bitflags::bitflags;
use log::{debug, trace};
use modular_bitfield::prelude::*;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use strum::FromRepr;

pub const EDID_HEADER: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];

const MANUFACTURE_YEAR_BASE: u16 = 1990;
const DESCRIPTORS_OFFSET: usize = 54;
const DESCRIPTORS_END: usize = 126;
const DESCRIPTOR_TEXT_OFFSET: usize = 5;
const DESCRIPTOR_TEXT_LENGTH: usize = 13;
const MONITOR_NAME_TAG: u8 = 0xFC;
const UNUSED_STANDARD_TIMING: [u8; 2] = [0x01, 0x01];

const SERIAL_NUMBER_MARKER: [u8; 5] = [0x00, 0x00, 0x00, 0xFF, 0x00];
// LF, 0x01 and NUL all end the serial number string.
const SERIAL_NUMBER_TERMINATORS: [u8; 3] = [0x0A, 0x01, 0x00];

#[derive(BinRead, Debug, Clone)]
#[br(little)]
pub struct RawBaseBlock {
    pub header: [u8; 8],
    pub manufacturer_id: ManufacturerId,
    pub product_code: u16,
    pub serial_number: u32,
    pub manufacture_week: u8,
    pub manufacture_year: u8,
    pub version: u8,
    pub revision: u8,
    pub video_input: u8,
    pub max_horizontal_size_cm: u8,
    pub max_vertical_size_cm: u8,
    pub gamma: u8,
    pub features: FeatureSupport,
    pub chromaticity: [u8; 10],
    pub established_timings: [u8; 3],
    pub standard_timings: [[u8; 2]; 8],
    pub descriptors: [[u8; DTD_LENGTH]; 4],
    pub extension_count: u8,
    pub checksum: u8,
}

/// Three 5-bit letters packed big-endian into bytes 8 and 9.
#[bitfield]
#[derive(Copy, Clone, Debug, BinRead)]
#[br(map = |value: u16| Self::from_bytes(value.to_be_bytes()))]
pub struct ManufacturerId {
    pub third_letter: B5,
    pub second_letter: B5,
    pub first_letter: B5,
    pub reserved: B1,
}

impl ManufacturerId {
    pub fn from_letters(letters: [u8; 3]) -> Self {
        let code = |letter: u8| letter.to_ascii_uppercase().wrapping_sub(b'A' - 1) & 0x1F;
        Self::new()
            .with_first_letter(code(letters[0]))
            .with_second_letter(code(letters[1]))
            .with_third_letter(code(letters[2]))
    }

    /// Bytes in EDID order (offset 8 first).
    pub fn to_edid_bytes(self) -> [u8; 2] {
        let [low, high] = self.into_bytes();
        [high, low]
    }

    pub fn eisa_id(&self) -> String {
        [self.first_letter(), self.second_letter(), self.third_letter()]
            .into_iter()
            .filter_map(eisa_letter)
            .collect()
    }
}

/// Letter codes 1..=26 are 'A'..='Z', anything else is not a letter.
fn eisa_letter(code: u8) -> Option<char> {
    match code {
        1..=26 => Some((b'A' + code - 1) as char),
        _ => None,
    }
}

#[bitfield]
#[derive(Copy, Clone, Debug, BinRead)]
pub struct FeatureSupport {
    pub gtf_supported: bool,
    pub preferred_timing: bool,
    pub standard_srgb: bool,
    pub display_type: B2,
    pub dpms_active_off: bool,
    pub dpms_suspend: bool,
    pub dpms_standby: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HeaderStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SerialNumber {
    Text(String),
    Numeric(u32),
}

impl Display for SerialNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SerialNumber::Text(text) => write!(f, "{}", text),
            SerialNumber::Numeric(number) => write!(f, "{}", number),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRepr, strum::Display)]
#[repr(u8)]
pub enum WhiteSyncLevels {
    #[strum(serialize = "+0.7/-0.3 V")]
    Levels0700_0300 = 0,
    #[strum(serialize = "+0.714/-0.286 V")]
    Levels0714_0286 = 1,
    #[strum(serialize = "+1.0/-0.4 V")]
    Levels1000_0400 = 2,
    #[strum(serialize = "+0.7/0 V")]
    Levels0700_0000 = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VideoInput {
    Digital {
        vesa_dfp_compatible: bool,
    },
    Analog {
        white_sync_levels: WhiteSyncLevels,
        blank_to_black_setup: bool,
        separate_sync_supported: bool,
        composite_sync_supported: bool,
        sync_on_green_supported: bool,
        v_sync_serrated: bool,
    },
}

impl From<u8> for VideoInput {
    fn from(value: u8) -> Self {
        if read_flag(value, 7) {
            VideoInput::Digital {
                vesa_dfp_compatible: read_flag(value, 0),
            }
        } else {
            VideoInput::Analog {
                white_sync_levels: WhiteSyncLevels::from_repr(read_bits(value, 5, 0x03))
                    .unwrap_or(WhiteSyncLevels::Levels0700_0000),
                blank_to_black_setup: read_flag(value, 4),
                separate_sync_supported: read_flag(value, 3),
                composite_sync_supported: read_flag(value, 2),
                sync_on_green_supported: read_flag(value, 1),
                v_sync_serrated: read_flag(value, 0),
            }
        }
    }
}

impl VideoInput {
    pub fn is_digital(&self) -> bool {
        matches!(self, VideoInput::Digital { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRepr, strum::Display)]
#[repr(u8)]
pub enum DigitalColorEncoding {
    #[strum(serialize = "RGB 4:4:4")]
    Rgb444 = 0,
    #[strum(serialize = "RGB 4:4:4 + YCrCb 4:4:4")]
    Rgb444YCrCb444 = 1,
    #[strum(serialize = "RGB 4:4:4 + YCrCb 4:2:2")]
    Rgb444YCrCb422 = 2,
    #[strum(serialize = "RGB 4:4:4 + YCrCb 4:4:4 + YCrCb 4:2:2")]
    Rgb444YCrCb444YCrCb422 = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRepr, strum::Display)]
#[repr(u8)]
pub enum AnalogColorType {
    #[strum(serialize = "Monochrome or Grayscale")]
    Monochrome = 0,
    #[strum(serialize = "RGB color")]
    Rgb = 1,
    #[strum(serialize = "Non-RGB color")]
    NonRgb = 2,
    Undefined = 3,
}

/// Feature byte bits 3-4, read differently for digital and analog inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayType {
    Digital(DigitalColorEncoding),
    Analog(AnalogColorType),
}

impl Display for DisplayType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayType::Digital(encoding) => write!(f, "{}", encoding),
            DisplayType::Analog(color_type) => write!(f, "{}", color_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicDisplayParameters {
    pub video_input: VideoInput,
    pub max_horizontal_size_cm: u8,
    pub max_vertical_size_cm: u8,
    pub display_gamma: f64,
    pub dpms_standby: bool,
    pub dpms_suspend: bool,
    pub dpms_active_off: bool,
    pub display_type: DisplayType,
    pub standard_srgb: bool,
    pub preferred_timing: bool,
    pub gtf_supported: bool,
}

impl BasicDisplayParameters {
    fn from_raw(raw: &RawBaseBlock) -> Self {
        let video_input = VideoInput::from(raw.video_input);
        let features = raw.features;
        let display_type = if video_input.is_digital() {
            DisplayType::Digital(
                DigitalColorEncoding::from_repr(features.display_type())
                    .unwrap_or(DigitalColorEncoding::Rgb444),
            )
        } else {
            DisplayType::Analog(
                AnalogColorType::from_repr(features.display_type())
                    .unwrap_or(AnalogColorType::Undefined),
            )
        };

        Self {
            video_input,
            max_horizontal_size_cm: raw.max_horizontal_size_cm,
            max_vertical_size_cm: raw.max_vertical_size_cm,
            display_gamma: raw.gamma as f64 * (2.54 / 255.0) + 1.0,
            dpms_standby: features.dpms_standby(),
            dpms_suspend: features.dpms_suspend(),
            dpms_active_off: features.dpms_active_off(),
            display_type,
            standard_srgb: features.standard_srgb(),
            preferred_timing: features.preferred_timing(),
            gtf_supported: features.gtf_supported(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChromaticityCoordinate {
    pub raw: u16,
    pub value: f64,
}

impl ChromaticityCoordinate {
    fn new(raw: u16) -> Self {
        Self {
            raw,
            value: raw as f64 / 1024.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Chromaticity {
    pub red_x: ChromaticityCoordinate,
    pub red_y: ChromaticityCoordinate,
    pub green_x: ChromaticityCoordinate,
    pub green_y: ChromaticityCoordinate,
    pub blue_x: ChromaticityCoordinate,
    pub blue_y: ChromaticityCoordinate,
    pub white_x: ChromaticityCoordinate,
    pub white_y: ChromaticityCoordinate,
}

impl From<[u8; 10]> for Chromaticity {
    fn from(bytes: [u8; 10]) -> Self {
        // bytes 0 and 1 hold the two low bits of every coordinate, bytes 2..10 the high eight
        let red_green_low = bytes[0];
        let blue_white_low = bytes[1];
        let coordinate = |high: usize, low_byte: u8, shift: u8| {
            ChromaticityCoordinate::new(combine_split_field(
                bytes[high],
                read_bits(low_byte, shift, 0x03),
                2,
            ))
        };

        Self {
            red_x: coordinate(2, red_green_low, 6),
            red_y: coordinate(3, red_green_low, 4),
            green_x: coordinate(4, red_green_low, 2),
            green_y: coordinate(5, red_green_low, 0),
            blue_x: coordinate(6, blue_white_low, 6),
            blue_y: coordinate(7, blue_white_low, 4),
            white_x: coordinate(8, blue_white_low, 2),
            white_y: coordinate(9, blue_white_low, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EstablishedTimings(u32);
bitflags! {
    impl EstablishedTimings: u32 {
        const Mode720x400At70Hz = 1 << 23;
        const Mode720x400At88Hz = 1 << 22;
        const Mode640x480At60Hz = 1 << 21;
        const Mode640x480At67Hz = 1 << 20;
        const Mode640x480At72Hz = 1 << 19;
        const Mode640x480At75Hz = 1 << 18;
        const Mode800x600At56Hz = 1 << 17;
        const Mode800x600At60Hz = 1 << 16;
        const Mode800x600At72Hz = 1 << 15;
        const Mode800x600At75Hz = 1 << 14;
        const Mode832x624At75Hz = 1 << 13;
        const Mode1024x768At87HzInterlaced = 1 << 12;
        const Mode1024x768At60Hz = 1 << 11;
        const Mode1024x768At70Hz = 1 << 10;
        const Mode1024x768At75Hz = 1 << 9;
        const Mode1280x1024At75Hz = 1 << 8;
        const Mode1152x870At75Hz = 1 << 7;
    }
}

static ESTABLISHED_TIMING_NAMES: [(EstablishedTimings, &str); 17] = [
    (EstablishedTimings::Mode720x400At70Hz, "720x400 @ 70 Hz"),
    (EstablishedTimings::Mode720x400At88Hz, "720x400 @ 88 Hz"),
    (EstablishedTimings::Mode640x480At60Hz, "640x480 @ 60 Hz"),
    (EstablishedTimings::Mode640x480At67Hz, "640x480 @ 67 Hz"),
    (EstablishedTimings::Mode640x480At72Hz, "640x480 @ 72 Hz"),
    (EstablishedTimings::Mode640x480At75Hz, "640x480 @ 75 Hz"),
    (EstablishedTimings::Mode800x600At56Hz, "800x600 @ 56 Hz"),
    (EstablishedTimings::Mode800x600At60Hz, "800x600 @ 60 Hz"),
    (EstablishedTimings::Mode800x600At72Hz, "800x600 @ 72 Hz"),
    (EstablishedTimings::Mode800x600At75Hz, "800x600 @ 75 Hz"),
    (EstablishedTimings::Mode832x624At75Hz, "832x624 @ 75 Hz"),
    (
        EstablishedTimings::Mode1024x768At87HzInterlaced,
        "1024x768 @ 87 Hz (interlaced)",
    ),
    (EstablishedTimings::Mode1024x768At60Hz, "1024x768 @ 60 Hz"),
    (EstablishedTimings::Mode1024x768At70Hz, "1024x768 @ 70 Hz"),
    (EstablishedTimings::Mode1024x768At75Hz, "1024x768 @ 75 Hz"),
    (EstablishedTimings::Mode1280x1024At75Hz, "1280x1024 @ 75 Hz"),
    (EstablishedTimings::Mode1152x870At75Hz, "1152x870 @ 75 Hz"),
];

impl EstablishedTimings {
    pub fn from_bitmap(bitmap: u32) -> Self {
        Self::from_bits_retain(bitmap)
    }

    pub fn mode_names(&self) -> Vec<&'static str> {
        ESTABLISHED_TIMING_NAMES
            .iter()
            .filter(|(mode, _)| self.contains(*mode))
            .map(|(_, name)| *name)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, FromRepr, strum::Display)]
#[repr(u8)]
pub enum PixelRatio {
    #[strum(serialize = "16:10")]
    Ratio16_10 = 0,
    #[strum(serialize = "4:3")]
    Ratio4_3 = 1,
    #[strum(serialize = "5:4")]
    Ratio5_4 = 2,
    #[strum(serialize = "16:9")]
    Ratio16_9 = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandardDisplayMode {
    pub x_resolution: u16,
    pub xy_pixel_ratio: PixelRatio,
    pub vert_freq: u8,
}

impl StandardDisplayMode {
    /// Returns `None` for the `01 01` unused slot marker.
    pub fn parse(bytes: [u8; 2]) -> Option<Self> {
        if bytes == UNUSED_STANDARD_TIMING {
            return None;
        }
        Some(Self {
            x_resolution: (bytes[0] as u16 + 31) * 8,
            xy_pixel_ratio: PixelRatio::from_repr(read_bits(bytes[1], 6, 0x03))
                .unwrap_or(PixelRatio::Ratio16_9),
            vert_freq: read_bits(bytes[1], 0, 0x3F) + 60,
        })
    }

    pub fn y_resolution(&self) -> u16 {
        let x = self.x_resolution as u32;
        let y = match self.xy_pixel_ratio {
            PixelRatio::Ratio16_10 => x * 10 / 16,
            PixelRatio::Ratio4_3 => x * 3 / 4,
            PixelRatio::Ratio5_4 => x * 4 / 5,
            PixelRatio::Ratio16_9 => x * 9 / 16,
        };
        y as u16
    }
}

/// Everything the 128-byte base block describes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseBlock {
    pub valid_header: HeaderStatus,
    pub display_size: Option<(u16, u16)>,
    pub eisa_id: String,
    pub product_code: u16,
    pub serial_number: SerialNumber,
    pub manufacture_date: String,
    pub edid_version: String,
    pub bdp: BasicDisplayParameters,
    pub chromaticity: Chromaticity,
    pub timing_bitmap: u32,
    pub standard_display_modes: Vec<StandardDisplayMode>,
    pub dtds: Vec<DetailedTimingDescriptor>,
    pub model_name: Option<String>,
    pub number_of_extensions: u8,
    pub checksum: u8,
}

impl BaseBlock {
    pub fn parse(block: &[u8; EDID_BLOCK_LENGTH]) -> Result<Self> {
        let raw = read_structure::<RawBaseBlock>(block, 0)?;
        trace!("Raw base block: {:?}", raw);

        let valid_header = if raw.header == EDID_HEADER {
            HeaderStatus::Ok
        } else {
            debug!("Unexpected EDID header {:02X?}", raw.header);
            HeaderStatus::Error
        };

        let (dtds, descriptors_left) =
            read_detailed_timings(block, DESCRIPTORS_OFFSET, DESCRIPTORS_END);

        Ok(Self {
            valid_header,
            display_size: display_size(raw.max_horizontal_size_cm, raw.max_vertical_size_cm),
            eisa_id: raw.manufacturer_id.eisa_id(),
            product_code: raw.product_code,
            serial_number: find_serial_string(block)
                .map(SerialNumber::Text)
                .unwrap_or(SerialNumber::Numeric(raw.serial_number)),
            manufacture_date: manufacture_date(raw.manufacture_week, raw.manufacture_year),
            edid_version: edid_version(raw.version, raw.revision),
            bdp: BasicDisplayParameters::from_raw(&raw),
            chromaticity: Chromaticity::from(raw.chromaticity),
            timing_bitmap: u32::from_be_bytes([
                0,
                raw.established_timings[0],
                raw.established_timings[1],
                raw.established_timings[2],
            ]),
            standard_display_modes: raw
                .standard_timings
                .iter()
                .filter_map(|bytes| StandardDisplayMode::parse(*bytes))
                .collect(),
            dtds,
            model_name: find_model_name(block, descriptors_left),
            number_of_extensions: raw.extension_count,
            checksum: raw.checksum,
        })
    }
}

fn display_size(horizontal_cm: u8, vertical_cm: u8) -> Option<(u16, u16)> {
    if horizontal_cm == 0 && vertical_cm == 0 {
        None
    } else {
        Some((horizontal_cm as u16 * 10, vertical_cm as u16 * 10))
    }
}

fn manufacture_date(week: u8, year: u8) -> String {
    let full_year = MANUFACTURE_YEAR_BASE + year as u16;
    match week {
        0 if year == 0 => String::new(),
        1..=54 => format!("{}/{}", week, full_year),
        _ => full_year.to_string(),
    }
}

fn edid_version(version: u8, revision: u8) -> String {
    if revision == 0 {
        version.to_string()
    } else {
        format!("{}.{}", version, revision)
    }
}

fn descriptor_text(block: &[u8], start: usize, terminators: &[u8]) -> String {
    (start..start + DESCRIPTOR_TEXT_LENGTH)
        .take_while(|index| *index < block.len())
        .map(|index| byte_at(block, index))
        .take_while(|byte| !terminators.contains(byte))
        .map(|byte| byte as char)
        .collect()
}

/// Scans the whole block for a serial number descriptor.
fn find_serial_string(block: &[u8]) -> Option<String> {
    let position = block
        .windows(SERIAL_NUMBER_MARKER.len())
        .position(|window| window == SERIAL_NUMBER_MARKER)?;
    trace!("Serial number descriptor marker at {}", position);
    Some(descriptor_text(
        block,
        position + DESCRIPTOR_TEXT_OFFSET,
        &SERIAL_NUMBER_TERMINATORS,
    ))
}

/// Looks for a monitor name among the display descriptors following the timings.
fn find_model_name(block: &[u8], start: usize) -> Option<String> {
    let mut offset = start;
    while offset < DESCRIPTORS_END && byte_at(block, offset) == 0 {
        if byte_at(block, offset + 3) == MONITOR_NAME_TAG {
            let name = descriptor_text(block, offset + DESCRIPTOR_TEXT_OFFSET, &[0x0A, 0x00]);
            return Some(name.trim().to_string());
        }
        offset += DTD_LENGTH;
    }
    None
}
