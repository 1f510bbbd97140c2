// SPDX-License-Identifier: MIT

use binread::{BinRead, BinReaderExt};
use log::trace;
use std::any::type_name;
use std::fmt::Debug;
use std::io::{Cursor, Seek, SeekFrom};

pub mod base;
pub mod bits;
pub mod cea;
pub mod dtd;
pub mod edid;
pub mod manufacturer;
pub mod raw;

pub use edid::{parse, Edid};
pub use raw::RawEdid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO Error: `{0}`")]
    IOError(#[from] std::io::Error),
    #[error("Input is not a hex string: `{0}`")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Input contains no EDID data")]
    EmptyInput,
    #[error("Binary format parsing Error: `{0}`")]
    BinReadError(#[from] binread::Error),
}

/// Reads a fixed-layout little-endian structure at `offset` in `data`.
fn read_structure<B: BinRead<Args = ()> + Debug>(data: &[u8], offset: usize) -> Result<B> {
    let mut source = Cursor::new(data);
    source.seek(SeekFrom::Start(offset as u64))?;
    trace!("Trying to parse {} at {}", type_name::<B>(), offset);
    let structure = source.read_le::<B>();
    if structure.is_err() {
        trace!("Failed to parse structure at {}: {:?}", offset, structure);
    }
    Ok(structure?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtd::RawDetailedTiming;
    use log::LevelFilter;
    use simplelog::{Config, TestLogger};

    #[test]
    fn test_read_structure_at_offset() {
        let _ = TestLogger::init(LevelFilter::Trace, Config::default());
        let mut data = vec![0xEEu8; 4];
        data.extend_from_slice(&crate::dtd::tests::DTD_1080P);
        let timing = read_structure::<RawDetailedTiming>(&data, 4).unwrap();
        assert_eq!(14850, timing.pixel_clock);
    }

    #[test]
    fn test_read_structure_past_end() {
        let _ = TestLogger::init(LevelFilter::Trace, Config::default());
        let data = [0u8; 10];
        assert!(matches!(
            read_structure::<RawDetailedTiming>(&data, 0),
            Err(Error::BinReadError(_))
        ));
    }
}
