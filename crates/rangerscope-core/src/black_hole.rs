//! Row view over black holes, in insertion order.

use crate::graph::Galaxy;
use crate::id::{BlackHoleId, StarId};
use crate::loot::LootSchedule;
use crate::model::BlackHole;

#[derive(Debug, Clone, Copy)]
pub struct BlackHoleRow<'a> {
    galaxy: &'a Galaxy,
    hole: &'a BlackHole,
}

impl Galaxy {
    /// The black hole at `row`. Panics when `row >= black_hole_count()`.
    pub fn black_hole_row(&self, row: usize) -> BlackHoleRow<'_> {
        assert!(
            row < self.black_hole_count(),
            "black hole row {row} out of range ({} holes)",
            self.black_hole_count()
        );
        BlackHoleRow {
            galaxy: self,
            hole: self.black_hole_at(row),
        }
    }

    pub fn black_hole_rows(&self) -> impl Iterator<Item = BlackHoleRow<'_>> + '_ {
        (0..self.black_hole_count()).map(move |row| self.black_hole_row(row))
    }
}

impl<'a> BlackHoleRow<'a> {
    pub fn id(&self) -> BlackHoleId {
        self.hole.id
    }

    pub fn star1(&self) -> StarId {
        self.hole.star1
    }

    pub fn star2(&self) -> StarId {
        self.hole.star2
    }

    pub fn star1_name(&self) -> &'a str {
        &self.galaxy.star(self.hole.star1).name
    }

    pub fn star2_name(&self) -> &'a str {
        &self.galaxy.star(self.hole.star2).name
    }

    pub fn star1_distance(&self) -> f64 {
        self.galaxy.distance_from_player(Some(self.hole.star1))
    }

    pub fn star2_distance(&self) -> f64 {
        self.galaxy.distance_from_player(Some(self.hole.star2))
    }

    pub fn turns_to_close(&self) -> i32 {
        self.hole.turns_to_close
    }

    pub fn next_loot_changes(&self) -> LootSchedule {
        self.galaxy.next_loot_changes(self.hole)
    }
}
