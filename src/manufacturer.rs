// SPDX-License-Identifier: MIT

use serde::Serialize;

/// Display name of a PnP manufacturer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ManufacturerInfo {
    #[serde(skip)]
    pub code: &'static str,
    pub full_name: &'static str,
    pub name: &'static str,
}

impl ManufacturerInfo {
    const fn new(code: &'static str, full_name: &'static str, name: &'static str) -> Self {
        Self {
            code,
            full_name,
            name,
        }
    }
}

/// Looks up a three-letter PnP ID. Matching is exact apart from letter case.
pub fn lookup(eisa_id: &str) -> Option<ManufacturerInfo> {
    if eisa_id.len() != 3 {
        return None;
    }
    let code = eisa_id.to_ascii_uppercase();
    MANUFACTURERS
        .binary_search_by(|info| info.code.cmp(code.as_str()))
        .ok()
        .map(|index| MANUFACTURERS[index])
}

// Sorted by code.
static MANUFACTURERS: &[ManufacturerInfo] = &[
    ManufacturerInfo::new("AAC", "AcerView", "Acer"),
    ManufacturerInfo::new("ACI", "Asus Computer Inc", "Asus"),
    ManufacturerInfo::new("ACR", "Acer Technologies", "Acer"),
    ManufacturerInfo::new("ACT", "Targa", "Targa"),
    ManufacturerInfo::new("ADI", "ADI Systems Inc", "ADI"),
    ManufacturerInfo::new("AIC", "Arnos Instruments", "Arnos"),
    ManufacturerInfo::new("AMI", "American Megatrends Inc", "AMI"),
    ManufacturerInfo::new("AMW", "AMW", "AMW"),
    ManufacturerInfo::new("AOC", "AOC International (USA) Ltd.", "AOC"),
    ManufacturerInfo::new("API", "A Plus Info Corporation", "A Plus"),
    ManufacturerInfo::new("APP", "Apple Computer Inc", "Apple"),
    ManufacturerInfo::new("ART", "ArtMedia", "ArtMedia"),
    ManufacturerInfo::new("AST", "AST Research", "AST"),
    ManufacturerInfo::new("AUO", "AU Optronics", "AUO"),
    ManufacturerInfo::new("AUS", "ASUSTek Computer Inc", "Asus"),
    ManufacturerInfo::new("AVO", "Avocent Corporation", "Avocent"),
    ManufacturerInfo::new("BMM", "BMM", "BMM"),
    ManufacturerInfo::new("BNQ", "BenQ Corporation", "BenQ"),
    ManufacturerInfo::new("BOE", "BOE Technology Group Co., Ltd", "BOE"),
    ManufacturerInfo::new("CHD", "ChangHong Electric Co.,Ltd", "ChangHong"),
    ManufacturerInfo::new("CMN", "Chimei Innolux Corporation", "Innolux"),
    ManufacturerInfo::new("CMO", "Chi Mei Optoelectronics corp.", "Chi Mei"),
    ManufacturerInfo::new("CPL", "Compal Electronics Inc", "Compal"),
    ManufacturerInfo::new("CPQ", "Compaq Computer Company", "Compaq"),
    ManufacturerInfo::new("CPT", "Chunghwa Picture Tubes, Ltd.", "CPT"),
    ManufacturerInfo::new("CTX", "Creative Technology Ltd", "CTX"),
    ManufacturerInfo::new("DEC", "Digital Equipment Corporation", "DEC"),
    ManufacturerInfo::new("DEL", "Dell Inc.", "Dell"),
    ManufacturerInfo::new("DPC", "Delta Electronics Inc", "Delta"),
    ManufacturerInfo::new("DWE", "Daewoo Electronics Company Ltd", "Daewoo"),
    ManufacturerInfo::new("ECS", "Elitegroup Computer Systems Company Ltd", "ECS"),
    ManufacturerInfo::new("EIZ", "EIZO GmbH Display Technologies", "Eizo"),
    ManufacturerInfo::new("ELO", "Elo TouchSystems Inc", "Elo"),
    ManufacturerInfo::new("EMA", "eMachines Inc", "eMachines"),
    ManufacturerInfo::new("ENC", "Eizo Nanao Corporation", "Eizo"),
    ManufacturerInfo::new("EPI", "Envision Peripherals, Inc", "Envision"),
    ManufacturerInfo::new("FCM", "Funai Electric Company of Taiwan", "Funai"),
    ManufacturerInfo::new("FNI", "Funai Electric Co., Ltd.", "Funai"),
    ManufacturerInfo::new("FUS", "Fujitsu Siemens Computers GmbH", "Fujitsu Siemens"),
    ManufacturerInfo::new("GBT", "GIGA-BYTE Technology Co., Ltd.", "Gigabyte"),
    ManufacturerInfo::new("GFN", "Gefen Inc.", "Gefen"),
    ManufacturerInfo::new("GGL", "Google Inc.", "Google"),
    ManufacturerInfo::new("GRU", "Grundig", "Grundig"),
    ManufacturerInfo::new("GSM", "LG Electronics", "LG"),
    ManufacturerInfo::new("GWY", "Gateway 2000", "Gateway"),
    ManufacturerInfo::new("HEC", "Hisense Electric Co., Ltd.", "Hisense"),
    ManufacturerInfo::new("HEI", "Hyundai Electronics Industries Co., Ltd.", "Hyundai"),
    ManufacturerInfo::new("HIQ", "Hyundai ImageQuest", "Hyundai"),
    ManufacturerInfo::new("HIT", "Hitachi America Ltd", "Hitachi"),
    ManufacturerInfo::new("HPN", "HP Inc.", "HP"),
    ManufacturerInfo::new("HRE", "Qingdao Haier Electronics Co., Ltd.", "Haier"),
    ManufacturerInfo::new("HSD", "HannStar Display Corp", "Hanns.G"),
    ManufacturerInfo::new("HSL", "Hansol Electronics", "Hansol"),
    ManufacturerInfo::new("HTC", "Hitachi Ltd", "Hitachi"),
    ManufacturerInfo::new("HWP", "Hewlett Packard", "HP"),
    ManufacturerInfo::new("IBM", "IBM Brasil", "IBM"),
    ManufacturerInfo::new("ICL", "Fujitsu ICL", "Fujitsu"),
    ManufacturerInfo::new("INL", "InnoLux Display Corporation", "InnoLux"),
    ManufacturerInfo::new("INZ", "Best Buy", "Insignia"),
    ManufacturerInfo::new("IQT", "IMAGEQUEST Co., Ltd", "Hyundai"),
    ManufacturerInfo::new("IVM", "Iiyama North America", "Iiyama"),
    ManufacturerInfo::new("IVO", "InfoVision Optoelectronics", "IVO"),
    ManufacturerInfo::new("JVC", "JVC", "JVC"),
    ManufacturerInfo::new("KDS", "Korea Data Systems", "KDS"),
    ManufacturerInfo::new("LCD", "Toshiba Matsushita Display Technology Co., Ltd", "Toshiba"),
    ManufacturerInfo::new("LEN", "Lenovo Group Limited", "Lenovo"),
    ManufacturerInfo::new("LGD", "LG Display", "LG"),
    ManufacturerInfo::new("LPL", "LG Philips", "LG Philips"),
    ManufacturerInfo::new("LTN", "Lite-On Technology Corporation", "Lite-On"),
    ManufacturerInfo::new("MAG", "MAG InnoVision", "MAG"),
    ManufacturerInfo::new("MAX", "Belinea", "Belinea"),
    ManufacturerInfo::new("MED", "Medion AG", "Medion"),
    ManufacturerInfo::new("MEI", "Panasonic Industry Company", "Panasonic"),
    ManufacturerInfo::new("MEL", "Mitsubishi Electric Corporation", "Mitsubishi"),
    ManufacturerInfo::new("MJI", "Marantz Japan Inc.", "Marantz"),
    ManufacturerInfo::new("MSF", "Microsoft Corporation", "Microsoft"),
    ManufacturerInfo::new("MSI", "Micro-Star International Co., Ltd.", "MSI"),
    ManufacturerInfo::new("NAN", "Nanao", "Nanao"),
    ManufacturerInfo::new("NEC", "NEC Corporation", "NEC"),
    ManufacturerInfo::new("NOK", "Nokia Display Products", "Nokia"),
    ManufacturerInfo::new("NVD", "Nvidia", "Nvidia"),
    ManufacturerInfo::new("ONK", "Onkyo Corporation", "Onkyo"),
    ManufacturerInfo::new("OQI", "Optiquest", "Optiquest"),
    ManufacturerInfo::new("OTM", "Optoma Corporation", "Optoma"),
    ManufacturerInfo::new("PGS", "Princeton Graphic Systems", "Princeton"),
    ManufacturerInfo::new("PHL", "Philips Consumer Electronics Company", "Philips"),
    ManufacturerInfo::new("PIO", "Pioneer Electronic Corporation", "Pioneer"),
    ManufacturerInfo::new("PLN", "Planar Systems, Inc.", "Planar"),
    ManufacturerInfo::new("PNR", "Planar Systems, Inc.", "Planar"),
    ManufacturerInfo::new("PRT", "Princeton", "Princeton"),
    ManufacturerInfo::new("QDS", "Quanta Display Inc.", "Quanta"),
    ManufacturerInfo::new("REL", "Relisys", "Relisys"),
    ManufacturerInfo::new("RHT", "Red Hat, Inc.", "Red Hat"),
    ManufacturerInfo::new("SAM", "Samsung Electric Company", "Samsung"),
    ManufacturerInfo::new("SAN", "Sanyo Electric Co.,Ltd.", "Sanyo"),
    ManufacturerInfo::new("SDC", "Samsung Display Corp.", "Samsung"),
    ManufacturerInfo::new("SEC", "Seiko Epson Corporation", "Epson"),
    ManufacturerInfo::new("SGI", "Silicon Graphics Inc", "SGI"),
    ManufacturerInfo::new("SHP", "Sharp Corporation", "Sharp"),
    ManufacturerInfo::new("SII", "Silicon Image, Inc.", "Silicon Image"),
    ManufacturerInfo::new("SMC", "Samtron", "Samtron"),
    ManufacturerInfo::new("SNI", "Siemens Nixdorf Info Systems", "Siemens"),
    ManufacturerInfo::new("SNY", "Sony", "Sony"),
    ManufacturerInfo::new("SPT", "Sceptre Tech Inc.", "Sceptre"),
    ManufacturerInfo::new("SRC", "Integrated Tech Express Inc", "Shamrock"),
    ManufacturerInfo::new("STN", "Samtron", "Samtron"),
    ManufacturerInfo::new("SYN", "Synaptics Inc", "Synaptics"),
    ManufacturerInfo::new("TAT", "Tatung Co. of America Inc", "Tatung"),
    ManufacturerInfo::new("TCL", "Technical Concepts Ltd", "TCL"),
    ManufacturerInfo::new("TOS", "Toshiba Corporation", "Toshiba"),
    ManufacturerInfo::new("TPV", "Top Victory Electronics ( Fujian ) Company Ltd", "TPV"),
    ManufacturerInfo::new("TSB", "Toshiba America Info Systems Inc", "Toshiba"),
    ManufacturerInfo::new("TTE", "TTE, Inc.", "TTE"),
    ManufacturerInfo::new("UNM", "Unisys Corporation", "Unisys"),
    ManufacturerInfo::new("VES", "Vestel Elektronik Sanayi ve Ticaret A. S.", "Vestel"),
    ManufacturerInfo::new("VIZ", "VIZIO, Inc", "Vizio"),
    ManufacturerInfo::new("VSC", "ViewSonic Corporation", "ViewSonic"),
    ManufacturerInfo::new("WAC", "Wacom Tech", "Wacom"),
    ManufacturerInfo::new("WTC", "Wen Technology", "Wen"),
    ManufacturerInfo::new("XMI", "Beijing Xiaomi Electronics Co., Ltd.", "Xiaomi"),
    ManufacturerInfo::new("YMH", "Yamaha Corporation", "Yamaha"),
    ManufacturerInfo::new("ZCM", "Zenith Data Systems", "Zenith"),
];
