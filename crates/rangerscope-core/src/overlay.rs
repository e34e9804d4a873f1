//! Per-star data for the galaxy map painter.
//!
//! The painter itself is not part of this crate. It receives star
//! positions, ownership colors, short summaries of the bases, planets and
//! ships at each star, and which stars touch a black hole.

use crate::geometry::{Point, Rect};
use crate::graph::Galaxy;
use crate::id::StarId;
use crate::palette::{Color, Palette};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Planets with this owner are uninhabited and not drawn.
pub const UNINHABITED_OWNER: &str = "None";

/// Ship counts per race at one star.
///
/// The player ship is never counted, and ships in transit belong to no
/// star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShipTally {
    pub normals: u32,
    pub pirates: u32,
    pub kellers: u32,
    pub terrons: u32,
    pub blazers: u32,
}

impl ShipTally {
    /// Counts a ship by race. Returns false for races the map does not show.
    pub fn count(&mut self, race: &str) -> bool {
        let slot = match race {
            "Normal" => &mut self.normals,
            "Pirate" => &mut self.pirates,
            "Keller" => &mut self.kellers,
            "Terron" => &mut self.terrons,
            "Blazer" => &mut self.blazers,
            _ => return false,
        };
        *slot += 1;
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == ShipTally::default()
    }

    /// Non-zero counts with the outline color of their faction, in drawing
    /// order.
    pub fn entries(&self, palette: &Palette) -> Vec<(u32, Color)> {
        [
            (self.normals, "Normals"),
            (self.pirates, "Pirates"),
            (self.kellers, "Keller"),
            (self.terrons, "Terron"),
            (self.blazers, "Blazer"),
        ]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, faction)| (n, palette.line(faction)))
        .collect()
    }
}

/// One inhabited planet as drawn next to its star.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetBadge {
    pub size: u32,
    /// Lowercase first letter of the economy.
    pub economy: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarMarker {
    pub id: StarId,
    pub name: String,
    pub position: Point,
    pub owner: String,
    pub fill: Color,
    pub line: Color,
    /// Two-letter labels of the market ships (bases) at the star.
    pub bases: Vec<String>,
    pub planets: Vec<PlanetBadge>,
    pub ships: ShipTally,
    pub has_black_hole: bool,
}

impl StarMarker {
    pub fn bases_label(&self) -> String {
        self.bases.join(",")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOverlay {
    /// Bounding rectangle of all stars.
    pub bounds: Rect,
    /// One marker per star, in star ID order.
    pub stars: Vec<StarMarker>,
}

/// Collects the map data of every star.
pub fn map_overlay(galaxy: &Galaxy, palette: &Palette) -> MapOverlay {
    let mut bases: BTreeMap<StarId, Vec<String>> = BTreeMap::new();
    for row in galaxy.markets().filter(|m| !m.is_planet()) {
        if let Some(star) = row.star_id() {
            bases
                .entry(star)
                .or_default()
                .push(row.name().chars().take(2).collect());
        }
    }

    let mut planets: BTreeMap<StarId, Vec<PlanetBadge>> = BTreeMap::new();
    let mut by_id: Vec<_> = galaxy
        .planets()
        .filter(|p| p.owner != UNINHABITED_OWNER)
        .collect();
    by_id.sort_by_key(|p| p.id);
    for planet in by_id {
        planets.entry(planet.star).or_default().push(PlanetBadge {
            size: planet.size,
            economy: planet.economy.chars().take(1).flat_map(char::to_lowercase).collect(),
            color: palette.fill(&planet.race),
        });
    }

    let hole_stars: BTreeSet<StarId> = galaxy
        .black_holes()
        .flat_map(|h| [h.star1, h.star2])
        .collect();

    let mut ships: BTreeMap<StarId, ShipTally> = BTreeMap::new();
    for ship in galaxy.ships().filter(|s| !s.id.is_player()) {
        let Some(star) = ship.star else {
            continue;
        };
        if !ships.entry(star).or_default().count(&ship.race) {
            warn!(ship = ship.id.0, race = %ship.race, "unexpected ship race");
        }
    }

    let stars = galaxy
        .stars()
        .map(|star| {
            let owner = star.effective_owner().to_string();
            StarMarker {
                id: star.id,
                name: star.name.clone(),
                position: star.position,
                fill: palette.fill(&owner),
                line: palette.line(&owner),
                owner,
                bases: bases.remove(&star.id).unwrap_or_default(),
                planets: planets.remove(&star.id).unwrap_or_default(),
                ships: ships.get(&star.id).copied().unwrap_or_default(),
                has_black_hole: hole_stars.contains(&star.id),
            }
        })
        .collect();

    MapOverlay {
        bounds: galaxy.galaxy_rect(),
        stars,
    }
}
