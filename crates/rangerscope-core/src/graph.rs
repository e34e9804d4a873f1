//! The entity graph of one dump.
//!
//! Two-phase lifecycle, like any frozen registry: entities are inserted into
//! a [`GalaxyBuilder`] while a dump is ingested, then [`GalaxyBuilder::build`]
//! freezes them into a read-only [`Galaxy`]. Nothing observes a partially
//! ingested graph.
//!
//! Inserting a second entity with an ID already present for its kind is a
//! contract violation and panics. Looking up an ID that is not in the graph
//! through the panicking accessors (`ship`, `star`, ...) is a caller bug;
//! use the `try_` variants when the ID did not come from the graph.

use crate::geometry::{Bounds, Rect};
use crate::goods::PriceExtremes;
use crate::id::*;
use crate::model::*;
use std::collections::BTreeMap;

// ===========================================================================
// Builder
// ===========================================================================

#[derive(Debug, Default)]
pub struct GalaxyBuilder {
    ships: BTreeMap<ShipId, Ship>,
    stars: BTreeMap<StarId, Star>,
    planets: BTreeMap<PlanetId, Planet>,
    black_holes: BTreeMap<BlackHoleId, BlackHole>,
    equipment: BTreeMap<EquipmentId, Equipment>,

    ship_order: Vec<ShipId>,
    planet_order: Vec<PlanetId>,
    black_hole_order: Vec<BlackHoleId>,
    equipment_order: Vec<EquipmentId>,
    planet_markets: Vec<PlanetId>,
    ship_markets: Vec<ShipId>,

    bounds: Bounds,
    prices: PriceExtremes,
    current_day: i32,
}

impl GalaxyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entity and resets all indices and aggregates.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn add_ship(&mut self, ship: Ship) {
        assert!(
            !self.ships.contains_key(&ship.id),
            "galaxy: ship {} inserted twice",
            ship.id.0
        );
        if ship.has_market() {
            self.ship_markets.push(ship.id);
        }
        self.ship_order.push(ship.id);
        self.ships.insert(ship.id, ship);
    }

    pub fn add_star(&mut self, star: Star) {
        assert!(
            !self.stars.contains_key(&star.id),
            "galaxy: star {} inserted twice",
            star.id.0
        );
        self.bounds.extend(Rect::unit_at(star.position));
        self.stars.insert(star.id, star);
    }

    pub fn add_planet(&mut self, planet: Planet) {
        assert!(
            !self.planets.contains_key(&planet.id),
            "galaxy: planet {} inserted twice",
            planet.id.0
        );
        if let Some(market) = &planet.market {
            self.planet_markets.push(planet.id);
            self.prices.include(market);
        }
        self.planet_order.push(planet.id);
        self.planets.insert(planet.id, planet);
    }

    pub fn add_black_hole(&mut self, hole: BlackHole) {
        assert!(
            !self.black_holes.contains_key(&hole.id),
            "galaxy: black hole {} inserted twice",
            hole.id.0
        );
        self.black_hole_order.push(hole.id);
        self.black_holes.insert(hole.id, hole);
    }

    pub fn add_equipment(&mut self, item: Equipment) {
        assert!(
            !self.equipment.contains_key(&item.id),
            "galaxy: equipment {} inserted twice",
            item.id.0
        );
        self.equipment_order.push(item.id);
        self.equipment.insert(item.id, item);
    }

    pub fn set_current_day(&mut self, day: i32) {
        self.current_day = day;
    }

    /// Per-commodity minimum sale and maximum buy price over the market
    /// planets inserted so far.
    pub fn price_extremes(&self) -> &PriceExtremes {
        &self.prices
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    pub fn black_hole_count(&self) -> usize {
        self.black_holes.len()
    }

    pub fn equipment_count(&self) -> usize {
        self.equipment.len()
    }

    pub fn build(self) -> Galaxy {
        Galaxy {
            ships: self.ships,
            stars: self.stars,
            planets: self.planets,
            black_holes: self.black_holes,
            equipment: self.equipment,
            ship_order: self.ship_order,
            planet_order: self.planet_order,
            black_hole_order: self.black_hole_order,
            equipment_order: self.equipment_order,
            planet_markets: self.planet_markets,
            ship_markets: self.ship_markets,
            bounds: self.bounds,
            prices: self.prices,
            current_day: self.current_day,
        }
    }
}

// ===========================================================================
// Frozen graph
// ===========================================================================

/// Read-only entity graph of one dump. Safe to share between readers.
#[derive(Debug, Clone, Default)]
pub struct Galaxy {
    ships: BTreeMap<ShipId, Ship>,
    stars: BTreeMap<StarId, Star>,
    planets: BTreeMap<PlanetId, Planet>,
    black_holes: BTreeMap<BlackHoleId, BlackHole>,
    equipment: BTreeMap<EquipmentId, Equipment>,

    ship_order: Vec<ShipId>,
    planet_order: Vec<PlanetId>,
    black_hole_order: Vec<BlackHoleId>,
    equipment_order: Vec<EquipmentId>,
    pub(crate) planet_markets: Vec<PlanetId>,
    pub(crate) ship_markets: Vec<ShipId>,

    bounds: Bounds,
    prices: PriceExtremes,
    current_day: i32,
}

impl Galaxy {
    // -----------------------------------------------------------------------
    // Counts
    // -----------------------------------------------------------------------

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    pub fn black_hole_count(&self) -> usize {
        self.black_holes.len()
    }

    pub fn equipment_count(&self) -> usize {
        self.equipment.len()
    }

    /// Planet markets plus ship markets.
    pub fn markets_count(&self) -> usize {
        self.planet_markets.len() + self.ship_markets.len()
    }

    // -----------------------------------------------------------------------
    // Direct lookup
    // -----------------------------------------------------------------------

    pub fn try_ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    pub fn try_star(&self, id: StarId) -> Option<&Star> {
        self.stars.get(&id)
    }

    pub fn try_planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(&id)
    }

    pub fn try_black_hole(&self, id: BlackHoleId) -> Option<&BlackHole> {
        self.black_holes.get(&id)
    }

    pub fn try_equipment(&self, id: EquipmentId) -> Option<&Equipment> {
        self.equipment.get(&id)
    }

    pub fn ship(&self, id: ShipId) -> &Ship {
        self.try_ship(id)
            .unwrap_or_else(|| panic!("galaxy: no ship with id {}", id.0))
    }

    pub fn star(&self, id: StarId) -> &Star {
        self.try_star(id)
            .unwrap_or_else(|| panic!("galaxy: no star with id {}", id.0))
    }

    pub fn planet(&self, id: PlanetId) -> &Planet {
        self.try_planet(id)
            .unwrap_or_else(|| panic!("galaxy: no planet with id {}", id.0))
    }

    pub fn black_hole(&self, id: BlackHoleId) -> &BlackHole {
        self.try_black_hole(id)
            .unwrap_or_else(|| panic!("galaxy: no black hole with id {}", id.0))
    }

    pub fn equipment(&self, id: EquipmentId) -> &Equipment {
        self.try_equipment(id)
            .unwrap_or_else(|| panic!("galaxy: no equipment with id {}", id.0))
    }

    // -----------------------------------------------------------------------
    // Iteration
    // -----------------------------------------------------------------------

    /// Ships in insertion order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ship_order.iter().map(|id| &self.ships[id])
    }

    /// Stars in ID order.
    pub fn stars(&self) -> impl Iterator<Item = &Star> + '_ {
        self.stars.values()
    }

    /// Planets in insertion order.
    pub fn planets(&self) -> impl Iterator<Item = &Planet> + '_ {
        self.planet_order.iter().map(|id| &self.planets[id])
    }

    /// Black holes in insertion order.
    pub fn black_holes(&self) -> impl Iterator<Item = &BlackHole> + '_ {
        self.black_hole_order.iter().map(|id| &self.black_holes[id])
    }

    /// Equipment in insertion order.
    pub fn equipment_items(&self) -> impl Iterator<Item = &Equipment> + '_ {
        self.equipment_order.iter().map(|id| &self.equipment[id])
    }

    pub(crate) fn black_hole_at(&self, row: usize) -> &BlackHole {
        let id = self.black_hole_order[row];
        &self.black_holes[&id]
    }

    pub(crate) fn equipment_at(&self, row: usize) -> &Equipment {
        let id = self.equipment_order[row];
        &self.equipment[&id]
    }

    // -----------------------------------------------------------------------
    // Scalars
    // -----------------------------------------------------------------------

    /// Bounding rectangle of all star cells, for the map painter.
    pub fn galaxy_rect(&self) -> Rect {
        self.bounds.rect()
    }

    pub fn current_day(&self) -> i32 {
        self.current_day
    }

    pub fn price_extremes(&self) -> &PriceExtremes {
        &self.prices
    }

    /// Effective owner of a star; empty for "no star".
    pub fn star_owner(&self, star: Option<StarId>) -> &str {
        match star {
            Some(id) => self.star(id).effective_owner(),
            None => "",
        }
    }

    /// Name of a star, or `fallback` for "no star".
    pub fn star_name_or<'a>(&'a self, star: Option<StarId>, fallback: &'a str) -> &'a str {
        match star {
            Some(id) => &self.star(id).name,
            None => fallback,
        }
    }

    // -----------------------------------------------------------------------
    // Player and distances
    // -----------------------------------------------------------------------

    pub fn has_player(&self) -> bool {
        self.ships.contains_key(&ShipId::PLAYER)
    }

    /// The player ship. Panics when the dump had no player section.
    pub fn player(&self) -> &Ship {
        self.try_ship(ShipId::PLAYER)
            .unwrap_or_else(|| panic!("galaxy: no player ship loaded"))
    }

    pub fn player_star(&self) -> Option<StarId> {
        self.player().star
    }

    /// Distance between two stars. Infinite when either side is "no star",
    /// so orderings over distances stay total.
    pub fn distance_between(&self, a: Option<StarId>, b: Option<StarId>) -> f64 {
        match (a, b) {
            (Some(a), Some(b)) => self.star(a).position.distance(&self.star(b).position),
            _ => f64::INFINITY,
        }
    }

    /// Distance from the player's current star. Requires a player ship.
    pub fn distance_from_player(&self, star: Option<StarId>) -> f64 {
        self.distance_between(self.player_star(), star)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goods::{GoodsArray, Market};
    use crate::test_utils::*;

    #[test]
    fn counts_follow_inserts() {
        let mut b = GalaxyBuilder::new();
        b.add_star(make_star(1, "Solar", 0.0, 0.0));
        b.add_planet(make_planet(1, 1, "Earth"));
        b.add_ship(make_ship(0, Some(1)));
        b.add_black_hole(make_black_hole(1, 1, 1, 10));
        b.add_equipment(make_equipment(1, Location::StarJunk(StarId(1))));
        let g = b.build();
        assert_eq!(g.star_count(), 1);
        assert_eq!(g.planet_count(), 1);
        assert_eq!(g.ship_count(), 1);
        assert_eq!(g.black_hole_count(), 1);
        assert_eq!(g.equipment_count(), 1);
        assert_eq!(g.markets_count(), 0);
    }

    #[test]
    #[should_panic(expected = "ship 5 inserted twice")]
    fn duplicate_ship_panics() {
        let mut b = GalaxyBuilder::new();
        b.add_ship(make_ship(5, None));
        b.add_ship(make_ship(5, None));
    }

    #[test]
    #[should_panic(expected = "star 1 inserted twice")]
    fn duplicate_star_panics() {
        let mut b = GalaxyBuilder::new();
        b.add_star(make_star(1, "A", 0.0, 0.0));
        b.add_star(make_star(1, "B", 1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "planet 2 inserted twice")]
    fn duplicate_planet_panics() {
        let mut b = GalaxyBuilder::new();
        b.add_planet(make_planet(2, 1, "A"));
        b.add_planet(make_planet(2, 1, "B"));
    }

    #[test]
    #[should_panic(expected = "black hole 3 inserted twice")]
    fn duplicate_black_hole_panics() {
        let mut b = GalaxyBuilder::new();
        b.add_black_hole(make_black_hole(3, 1, 2, 0));
        b.add_black_hole(make_black_hole(3, 2, 1, 0));
    }

    #[test]
    #[should_panic(expected = "equipment 4 inserted twice")]
    fn duplicate_equipment_panics() {
        let mut b = GalaxyBuilder::new();
        b.add_equipment(make_equipment(4, Location::StarJunk(StarId(1))));
        b.add_equipment(make_equipment(4, Location::StarJunk(StarId(1))));
    }

    #[test]
    fn bounds_grow_with_stars() {
        let mut b = GalaxyBuilder::new();
        b.add_star(make_star(1, "A", 10.0, 20.0));
        b.add_star(make_star(2, "B", -5.0, 40.0));
        let g = b.build();
        assert_eq!(g.galaxy_rect(), Rect::new(-5.0, 20.0, 16.0, 21.0));
    }

    #[test]
    fn price_extremes_ignore_ship_markets() {
        let mut b = GalaxyBuilder::new();
        let mut base = make_ship(7, None);
        base.market = Some(Market {
            quantity: GoodsArray::splat(1),
            sale: GoodsArray::splat(1),
            buy: GoodsArray::splat(1000),
        });
        b.add_ship(base);
        assert_eq!(*b.price_extremes(), PriceExtremes::default());

        b.add_planet(make_market_planet(1, 1, "Earth", 50, 40));
        assert_eq!(b.price_extremes().min_sale, GoodsArray::splat(50));
        assert_eq!(b.price_extremes().max_buy, GoodsArray::splat(40));
    }

    #[test]
    fn clear_resets_everything() {
        let mut b = GalaxyBuilder::new();
        b.add_star(make_star(1, "A", 3.0, 3.0));
        b.add_planet(make_market_planet(1, 1, "Earth", 50, 40));
        b.set_current_day(99);
        b.clear();
        assert_eq!(b.star_count(), 0);
        assert_eq!(b.planet_count(), 0);
        assert_eq!(*b.price_extremes(), PriceExtremes::default());
        let g = b.build();
        assert_eq!(g.current_day(), 0);
        assert_eq!(g.galaxy_rect(), Rect::default());
        assert_eq!(g.markets_count(), 0);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut b = GalaxyBuilder::new();
        for id in [9, 2, 5] {
            b.add_ship(make_ship(id, None));
            b.add_planet(make_planet(id, 1, "P"));
        }
        let g = b.build();
        let ships: Vec<u32> = g.ships().map(|s| s.id.0).collect();
        let planets: Vec<u32> = g.planets().map(|p| p.id.0).collect();
        assert_eq!(ships, vec![9, 2, 5]);
        assert_eq!(planets, vec![9, 2, 5]);
    }

    #[test]
    fn lookup_and_try_lookup() {
        let mut b = GalaxyBuilder::new();
        b.add_star(make_star(3, "Vega", 0.0, 0.0));
        let g = b.build();
        assert_eq!(g.star(StarId(3)).name, "Vega");
        assert!(g.try_star(StarId(4)).is_none());
    }

    #[test]
    #[should_panic(expected = "no star with id 4")]
    fn lookup_of_absent_id_panics() {
        let g = GalaxyBuilder::new().build();
        g.star(StarId(4));
    }

    #[test]
    fn star_owner_resolution() {
        let mut b = GalaxyBuilder::new();
        let mut kling = make_star(1, "Rigel", 0.0, 0.0);
        kling.owner = "Klings".to_string();
        kling.dom_series = "Xaltec".to_string();
        b.add_star(kling);
        let mut human = make_star(2, "Solar", 0.0, 0.0);
        human.owner = "People".to_string();
        b.add_star(human);
        let g = b.build();
        assert_eq!(g.star_owner(Some(StarId(1))), "Xaltec");
        assert_eq!(g.star_owner(Some(StarId(2))), "People");
        assert_eq!(g.star_owner(None), "");
    }

    #[test]
    fn distances_from_player() {
        let g = small_galaxy();
        assert!((g.distance_from_player(Some(StarId(2))) - 5.0).abs() < 1e-9);
        assert_eq!(g.distance_from_player(Some(StarId(1))), 0.0);
        assert_eq!(g.distance_from_player(None), f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "no player ship loaded")]
    fn distance_without_player_panics() {
        let mut b = GalaxyBuilder::new();
        b.add_star(make_star(1, "A", 0.0, 0.0));
        b.build().distance_from_player(Some(StarId(1)));
    }
}
