//! Row view over equipment items, in insertion order.

use crate::graph::Galaxy;
use crate::id::{EquipmentId, StarId};
use crate::model::{Equipment, Holder, Location};

/// Star name shown for items whose holder is between stars.
pub const IN_TRANSIT_STAR_NAME: &str = "Tranclucator";

#[derive(Debug, Clone, Copy)]
pub struct EquipmentRow<'a> {
    galaxy: &'a Galaxy,
    item: &'a Equipment,
}

impl Galaxy {
    /// The item at `row`. Panics when `row >= equipment_count()`.
    pub fn equipment_row(&self, row: usize) -> EquipmentRow<'_> {
        assert!(
            row < self.equipment_count(),
            "equipment row {row} out of range ({} items)",
            self.equipment_count()
        );
        EquipmentRow {
            galaxy: self,
            item: self.equipment_at(row),
        }
    }

    pub fn equipment_rows(&self) -> impl Iterator<Item = EquipmentRow<'_>> + '_ {
        (0..self.equipment_count()).map(move |row| self.equipment_row(row))
    }
}

impl<'a> EquipmentRow<'a> {
    pub fn item(&self) -> &'a Equipment {
        self.item
    }

    pub fn id(&self) -> EquipmentId {
        self.item.id
    }

    pub fn name(&self) -> &'a str {
        &self.item.name
    }

    pub fn kind(&self) -> &'a str {
        &self.item.kind
    }

    pub fn size(&self) -> u32 {
        self.item.size
    }

    pub fn owner(&self) -> &'a str {
        &self.item.owner
    }

    pub fn cost(&self) -> u32 {
        self.item.cost
    }

    pub fn tech_level(&self) -> u32 {
        self.item.tech_level
    }

    pub fn durability(&self) -> f64 {
        self.item.durability
    }

    pub fn bonus(&self) -> &'a str {
        &self.item.bonus
    }

    pub fn location(&self) -> Location {
        self.item.location
    }

    pub fn location_label(&self) -> &'static str {
        self.item.location.label()
    }

    /// Name of the ship, star or planet holding the item.
    pub fn location_name(&self) -> &'a str {
        match self.item.location.holder() {
            Holder::Ship(id) => &self.galaxy.ship(id).name,
            Holder::Star(id) => &self.galaxy.star(id).name,
            Holder::Planet(id) => &self.galaxy.planet(id).name,
        }
    }

    /// Star the item is at. `None` when its ship is in transit.
    pub fn star_id(&self) -> Option<StarId> {
        match self.item.location.holder() {
            Holder::Ship(id) => self.galaxy.ship(id).star,
            Holder::Star(id) => Some(id),
            Holder::Planet(id) => Some(self.galaxy.planet(id).star),
        }
    }

    pub fn star_name(&self) -> &'a str {
        self.galaxy.star_name_or(self.star_id(), IN_TRANSIT_STAR_NAME)
    }

    pub fn star_owner(&self) -> &'a str {
        self.galaxy.star_owner(self.star_id())
    }

    /// Distance from the player's star; infinite for items in transit.
    pub fn distance_from_player(&self) -> f64 {
        self.galaxy.distance_from_player(self.star_id())
    }

    /// Burial depth for treasures, -1 otherwise.
    pub fn depth(&self) -> i64 {
        self.item.depth()
    }
}
