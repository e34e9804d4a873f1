//! Shared fixtures for unit tests and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::geometry::Point;
use crate::goods::{GoodsArray, Market};
use crate::graph::{Galaxy, GalaxyBuilder};
use crate::id::*;
use crate::model::*;
use std::collections::BTreeMap;

// ===========================================================================
// Entity constructors
// ===========================================================================

pub fn make_star(id: u32, name: &str, x: f64, y: f64) -> Star {
    Star {
        id: StarId(id),
        name: name.to_string(),
        owner: "People".to_string(),
        position: Point::new(x, y),
        dom_series: String::new(),
    }
}

pub fn make_ship(id: u32, star: Option<u32>) -> Ship {
    Ship {
        id: ShipId(id),
        name: format!("Ship {id}"),
        race: "Normal".to_string(),
        star: star.and_then(StarId::from_raw),
        market: None,
    }
}

pub fn make_planet(id: u32, star: u32, name: &str) -> Planet {
    Planet {
        id: PlanetId(id),
        star: StarId(star),
        name: name.to_string(),
        owner: "People".to_string(),
        race: "People".to_string(),
        economy: "Industrial".to_string(),
        tech_level: 1,
        size: 3,
        market: None,
    }
}

/// Market with every commodity at the same quantity, sale and buy price.
pub fn flat_market(quantity: u32, sale: u32, buy: u32) -> Market {
    Market {
        quantity: GoodsArray::splat(quantity),
        sale: GoodsArray::splat(sale),
        buy: GoodsArray::splat(buy),
    }
}

pub fn make_market_planet(id: u32, star: u32, name: &str, sale: u32, buy: u32) -> Planet {
    Planet {
        market: Some(flat_market(10, sale, buy)),
        ..make_planet(id, star, name)
    }
}

/// Inhabited planet with the given tech level, for tech-level histograms.
pub fn make_tech_planet(id: u32, owner: &str, tech_level: u32) -> Planet {
    Planet {
        owner: owner.to_string(),
        tech_level,
        ..make_planet(id, 1, "Colony")
    }
}

pub fn make_black_hole(id: u32, star1: u32, star2: u32, turns_to_close: i32) -> BlackHole {
    BlackHole {
        id: BlackHoleId(id),
        star1: StarId(star1),
        star2: StarId(star2),
        turns_to_close,
    }
}

pub fn make_equipment(id: u32, location: Location) -> Equipment {
    Equipment {
        id: EquipmentId(id),
        name: format!("Item {id}"),
        kind: "Engine".to_string(),
        size: 20,
        owner: "People".to_string(),
        cost: 1000,
        tech_level: 2,
        durability: 0.75,
        bonus: String::new(),
        location,
        extra: BTreeMap::new(),
    }
}

// ===========================================================================
// Prebuilt galaxy
// ===========================================================================

/// A small galaxy:
///
/// - stars 1 Solar (0,0), 2 Rigel (3,4, Klings/Xaltec), 3 Vega (6,8, Maloc)
/// - player ship 0 at Solar; base ship 10 at Rigel with a market; pirate
///   ship 11 in transit
/// - market planets 1 Earth (Solar) and 2 Boyd (Vega); planet 3 Rock (Rigel)
///   without market and owner "None"
/// - black hole 1 between Solar and Vega, closing in 200 turns
/// - equipment 1 junk at Rigel, 2 aboard the pirate, 3 buried on Boyd at
///   depth 4, 4 in Earth's shop
/// - current day 10
pub fn small_galaxy() -> Galaxy {
    small_galaxy_builder().build()
}

pub fn small_galaxy_builder() -> GalaxyBuilder {
    let mut b = GalaxyBuilder::new();
    b.set_current_day(10);

    b.add_star(make_star(1, "Solar", 0.0, 0.0));
    b.add_star(Star {
        owner: "Klings".to_string(),
        dom_series: "Xaltec".to_string(),
        ..make_star(2, "Rigel", 3.0, 4.0)
    });
    b.add_star(Star {
        owner: "Maloc".to_string(),
        ..make_star(3, "Vega", 6.0, 8.0)
    });

    b.add_ship(Ship {
        name: "Player".to_string(),
        race: "Ranger".to_string(),
        ..make_ship(0, Some(1))
    });
    b.add_ship(Ship {
        name: "Alpha base".to_string(),
        market: Some(flat_market(5, 30, 20)),
        ..make_ship(10, Some(2))
    });
    b.add_ship(Ship {
        name: "Raider".to_string(),
        race: "Pirate".to_string(),
        ..make_ship(11, None)
    });

    b.add_planet(Planet {
        tech_level: 5,
        size: 7,
        ..make_market_planet(1, 1, "Earth", 50, 40)
    });
    b.add_planet(Planet {
        owner: "Maloc".to_string(),
        race: "Maloc".to_string(),
        economy: "Agricultural".to_string(),
        tech_level: 3,
        size: 3,
        ..make_market_planet(2, 3, "Boyd", 60, 45)
    });
    b.add_planet(Planet {
        owner: "None".to_string(),
        race: "None".to_string(),
        ..make_planet(3, 2, "Rock")
    });

    b.add_black_hole(make_black_hole(1, 1, 3, 200));

    b.add_equipment(make_equipment(1, Location::StarJunk(StarId(2))));
    b.add_equipment(make_equipment(2, Location::ShipEquipped(ShipId(11))));
    let mut treasure = make_equipment(3, Location::PlanetTreasure(PlanetId(2)));
    treasure
        .extra
        .insert(DEPTH_ATTR.to_string(), AttrValue::Int(4));
    b.add_equipment(treasure);
    b.add_equipment(make_equipment(4, Location::PlanetShop(PlanetId(1))));
    b
}
