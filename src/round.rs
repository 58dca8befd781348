//! Output-boundary rounding. Values stay at full precision in memory and are
//! rounded to 4 decimal places only when serialized.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::Serializer;

pub const OUTPUT_DECIMALS: usize = 4;

/// Rounds through the shortest exact decimal rendering, so ties on the exact
/// binary value go to the even digit: `0.03125` becomes `0.0312`.
pub fn round4(value: f64) -> f64 {
    let rounded = format!("{:.*}", OUTPUT_DECIMALS, value)
        .parse::<f64>()
        .unwrap_or(value);
    // Keep -0.0 out of the JSON.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round4(*value))
}

pub fn serialize_map<S: Serializer>(
    map: &BTreeMap<String, f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (k, v) in map {
        out.serialize_entry(k, &round4(*v))?;
    }
    out.end()
}
