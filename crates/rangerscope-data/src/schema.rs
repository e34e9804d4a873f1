//! On-disk shape of the color configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A flat `faction -> color string` table. Outline colors use the key
/// `line<Faction>`.
///
/// RON: `{"Maloc": "red", "lineMaloc": "#ff0000"}`
/// JSON: `{"Maloc": "red"}`
/// TOML: `Maloc = "red"`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteFile {
    pub colors: BTreeMap<String, String>,
}
