// SPDX-License-Identifier: MIT

use clap::{Parser, ValueEnum};
use edid_parser::{Edid, RawEdid};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// EDID dump, either raw binary or hex text
    #[arg(required_unless_present = "hex", conflicts_with = "hex")]
    edid_file: Option<PathBuf>,

    /// EDID as a hex string
    #[arg(long)]
    hex: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Output::Debug)]
    output: Output,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Output {
    Debug,
    Json,
}

/// Reads the dump as hex text when it is valid UTF-8 made of hex digits, as binary otherwise.
fn read_hex(path: &Path) -> String {
    let content =
        fs::read(path).unwrap_or_else(|err| panic!("Cannot open EDID file at {:?}: {}", path, err));
    match std::str::from_utf8(&content) {
        Ok(text) if text.chars().all(|c| c.is_ascii_hexdigit() || c.is_whitespace()) => {
            text.to_string()
        }
        _ => {
            info!("Reading {:?} as a binary EDID dump", path);
            hex::encode(&content)
        }
    }
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let hex_string = match (&args.hex, &args.edid_file) {
        (Some(hex_string), _) => hex_string.clone(),
        (None, Some(path)) => read_hex(path),
        (None, None) => unreachable!("clap requires a file or --hex"),
    };

    let raw = RawEdid::from_hex(&hex_string).expect("Cannot decode EDID hex string");
    for (index, valid) in raw.checksums().iter().enumerate() {
        if !valid {
            warn!("Block {} has an invalid checksum", index);
        }
    }
    let edid = Edid::from_raw(&raw).expect("Cannot parse EDID");

    match &args.output {
        Output::Debug => {
            println!("{:#?}", edid);
        }
        Output::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&edid)
                    .expect("Cannot serialize EDID into JSON, try another output format")
            );
        }
    }
}
