use serde::{Deserialize, Serialize};

/// Identifies a ship. ID 0 is the player ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u32);

/// Identifies a star system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StarId(pub u32);

/// Identifies a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanetId(pub u32);

/// Identifies a black hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlackHoleId(pub u32);

/// Identifies an equipment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EquipmentId(pub u32);

impl ShipId {
    /// The reserved ID of the player ship.
    pub const PLAYER: ShipId = ShipId(0);

    pub fn is_player(self) -> bool {
        self == Self::PLAYER
    }
}

impl StarId {
    /// Maps the dump's star reference to an ID. The dump writes 0 for
    /// "no star" (a ship in transit).
    pub fn from_raw(raw: u32) -> Option<StarId> {
        (raw != 0).then_some(StarId(raw))
    }
}

/// Identifies a market row owner: either a planet or a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketId {
    Planet(PlanetId),
    Ship(ShipId),
}

impl MarketId {
    /// The raw numeric ID, without the kind.
    pub fn raw(self) -> u32 {
        match self {
            MarketId::Planet(id) => id.0,
            MarketId::Ship(id) => id.0,
        }
    }
}
