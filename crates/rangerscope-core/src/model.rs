//! Entity types assembled from a dump.
//!
//! Entities reference each other by plain ID values; the [`crate::graph`]
//! module resolves them at query time.

use crate::geometry::Point;
use crate::goods::Market;
use crate::id::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Owner label that defers star ownership to the dominant series.
pub const KLING_OWNER: &str = "Klings";

/// Extra-attribute key holding a treasure's burial depth.
pub const DEPTH_ATTR: &str = "Depth";

// ---------------------------------------------------------------------------
// Ships, stars, planets, black holes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub race: String,
    /// `None` while the ship is in transit between stars.
    pub star: Option<StarId>,
    pub market: Option<Market>,
}

impl Ship {
    pub fn has_market(&self) -> bool {
        self.market.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: StarId,
    pub name: String,
    pub owner: String,
    pub position: Point,
    pub dom_series: String,
}

impl Star {
    /// The owner shown to consumers. Kling-held stars report the dominant
    /// series instead of the literal owner.
    pub fn effective_owner(&self) -> &str {
        if self.owner == KLING_OWNER {
            &self.dom_series
        } else {
            &self.owner
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub star: StarId,
    pub name: String,
    pub owner: String,
    pub race: String,
    pub economy: String,
    pub tech_level: u32,
    pub size: u32,
    pub market: Option<Market>,
}

impl Planet {
    pub fn has_market(&self) -> bool {
        self.market.is_some()
    }
}

/// A wormhole connecting exactly two stars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackHole {
    pub id: BlackHoleId,
    pub star1: StarId,
    pub star2: StarId,
    /// Zero or negative means the hole is not closing soon.
    pub turns_to_close: i32,
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// Where an equipment item currently lies, with the ID of its holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    ShipEquipped(ShipId),
    ShipStorage(ShipId),
    ShipShop(ShipId),
    StarJunk(StarId),
    PlanetShop(PlanetId),
    PlanetStorage(PlanetId),
    PlanetTreasure(PlanetId),
}

/// The holder of an item with the sub-kind stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Holder {
    Ship(ShipId),
    Star(StarId),
    Planet(PlanetId),
}

impl Location {
    pub fn holder(&self) -> Holder {
        match *self {
            Location::ShipEquipped(id) | Location::ShipStorage(id) | Location::ShipShop(id) => {
                Holder::Ship(id)
            }
            Location::StarJunk(id) => Holder::Star(id),
            Location::PlanetShop(id)
            | Location::PlanetStorage(id)
            | Location::PlanetTreasure(id) => Holder::Planet(id),
        }
    }

    /// Short label for table display.
    pub fn label(&self) -> &'static str {
        match self {
            Location::ShipEquipped(_) => "Equipped",
            Location::ShipStorage(_) => "Ship storage",
            Location::ShipShop(_) => "Ship shop",
            Location::StarJunk(_) => "Junk",
            Location::PlanetShop(_) => "Shop",
            Location::PlanetStorage(_) => "Storage",
            Location::PlanetTreasure(_) => "Treasure",
        }
    }
}

/// Value of an open-ended equipment attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// Infers the narrowest value type from dump text.
    pub fn parse(raw: &str) -> AttrValue {
        if let Ok(v) = raw.parse::<i64>() {
            AttrValue::Int(v)
        } else if let Ok(v) = raw.parse::<f64>() {
            AttrValue::Float(v)
        } else {
            AttrValue::Text(raw.to_string())
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            AttrValue::Float(v) => Some(*v as i64),
            AttrValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub kind: String,
    pub size: u32,
    pub owner: String,
    pub cost: u32,
    pub tech_level: u32,
    pub durability: f64,
    pub bonus: String,
    pub location: Location,
    pub extra: BTreeMap<String, AttrValue>,
}

impl Equipment {
    pub fn extra(&self, key: &str) -> Option<&AttrValue> {
        self.extra.get(key)
    }

    /// Burial depth of a treasure, -1 for every other location.
    pub fn depth(&self) -> i64 {
        match self.location {
            Location::PlanetTreasure(_) => self
                .extra(DEPTH_ATTR)
                .and_then(AttrValue::as_int)
                .unwrap_or(0),
            _ => -1,
        }
    }
}
