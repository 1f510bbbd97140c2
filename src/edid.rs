// SPDX-License-Identifier: MIT

use crate::base::{
    BaseBlock, BasicDisplayParameters, Chromaticity, EstablishedTimings, HeaderStatus,
    SerialNumber, StandardDisplayMode,
};
use crate::cea::EdidExtension;
use crate::dtd::DetailedTimingDescriptor;
use crate::manufacturer::{self, ManufacturerInfo};
use crate::raw::RawEdid;
use crate::Result;
use log::{debug, error, warn};
use serde::Serialize;

/// Decoded EDID: every base block field plus one entry per extension block present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edid {
    pub valid_header: HeaderStatus,
    pub display_size: Option<(u16, u16)>,
    pub eisa_id: String,
    pub eisa_info: Option<ManufacturerInfo>,
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
    pub exts: Vec<EdidExtension>,
}

impl Edid {
    pub fn from_hex(hex_string: &str) -> Result<Self> {
        let raw = RawEdid::from_hex(hex_string)?;
        Self::from_raw(&raw)
    }

    pub fn from_raw(raw: &RawEdid) -> Result<Self> {
        let base = BaseBlock::parse(&raw.base_block())?;
        let eisa_info = manufacturer::lookup(&base.eisa_id);
        if eisa_info.is_none() {
            debug!("Unknown manufacturer {:?}", base.eisa_id);
        }

        let exts = read_extensions(raw, base.number_of_extensions);

        Ok(Self {
            valid_header: base.valid_header,
            display_size: base.display_size,
            eisa_id: base.eisa_id,
            eisa_info,
            product_code: base.product_code,
            serial_number: base.serial_number,
            manufacture_date: base.manufacture_date,
            edid_version: base.edid_version,
            bdp: base.bdp,
            chromaticity: base.chromaticity,
            timing_bitmap: base.timing_bitmap,
            standard_display_modes: base.standard_display_modes,
            dtds: base.dtds,
            model_name: base.model_name,
            number_of_extensions: base.number_of_extensions,
            checksum: base.checksum,
            exts,
        })
    }

    pub fn established_timings(&self) -> Vec<&'static str> {
        EstablishedTimings::from_bitmap(self.timing_bitmap).mode_names()
    }
}

fn read_extensions(raw: &RawEdid, count: u8) -> Vec<EdidExtension> {
    let mut exts = Vec::new();
    for number in 1..=count {
        let Some(block) = raw.extension_block(number as usize) else {
            break;
        };
        match EdidExtension::parse(number, &block) {
            Ok(extension) => exts.push(extension),
            Err(err) => warn!("Failed to read extension block {}: {:?}", number, err),
        }
    }
    exts
}

/// Decodes a hex-encoded EDID. Returns `None` when the input is not usable hex.
pub fn parse(hex_string: &str) -> Option<Edid> {
    match Edid::from_hex(hex_string) {
        Ok(edid) => Some(edid),
        Err(err) => {
            error!("Failed to parse EDID: {}", err);
            None
        }
    }
}
