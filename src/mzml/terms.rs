//! PSI-MS and unit ontology accessions the reader acts on

pub(super) const MS_LEVEL: &str = "MS:1000511";
pub(super) const SCAN_START_TIME: &str = "MS:1000016";

pub(super) const MZ_ARRAY: &str = "MS:1000514";
pub(super) const INTENSITY_ARRAY: &str = "MS:1000515";
pub(super) const FLOAT_32: &str = "MS:1000521";
pub(super) const FLOAT_64: &str = "MS:1000523";
pub(super) const ZLIB: &str = "MS:1000574";

/// MS-Numpress linear, pic and slof, alone and followed by zlib
pub(super) const NUMPRESS: [&str; 6] = [
    "MS:1002312",
    "MS:1002313",
    "MS:1002314",
    "MS:1002746",
    "MS:1002747",
    "MS:1002748",
];

const UNIT_MINUTE: &str = "UO:0000031";
const UNIT_MILLISECOND: &str = "UO:0000028";

/// Scan start time in seconds; values without a recognized unit are taken as seconds
pub(super) fn seconds(value: f64, unit: Option<&str>) -> f64 {
    match unit {
        Some(UNIT_MINUTE) => value * 60.0,
        Some(UNIT_MILLISECOND) => value / 1000.0,
        _ => value,
    }
}
