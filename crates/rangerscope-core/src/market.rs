//! Row view over all markets.
//!
//! Rows `0..P` are the market planets in insertion order, rows `P..P+S` the
//! market ships in insertion order. The order is fixed at ingestion and never
//! re-sorted here; sorting belongs to the presentation layer.

use crate::goods::{GoodsArray, Market};
use crate::graph::Galaxy;
use crate::id::{MarketId, StarId};
use crate::model::{Planet, Ship};

/// What a market row points at.
#[derive(Debug, Clone, Copy)]
pub enum MarketHolder<'a> {
    Planet(&'a Planet),
    Ship(&'a Ship),
}

/// One market row. Borrowed from the galaxy; cheap to create.
#[derive(Debug, Clone, Copy)]
pub struct MarketRow<'a> {
    galaxy: &'a Galaxy,
    holder: MarketHolder<'a>,
}

impl Galaxy {
    /// The market at `row`. Panics when `row >= markets_count()`.
    pub fn market(&self, row: usize) -> MarketRow<'_> {
        assert!(
            row < self.markets_count(),
            "market row {row} out of range ({} markets)",
            self.markets_count()
        );
        let planet_rows = self.planet_markets.len();
        let holder = if row < planet_rows {
            MarketHolder::Planet(self.planet(self.planet_markets[row]))
        } else {
            MarketHolder::Ship(self.ship(self.ship_markets[row - planet_rows]))
        };
        MarketRow {
            galaxy: self,
            holder,
        }
    }

    /// All market rows in row order.
    pub fn markets(&self) -> impl Iterator<Item = MarketRow<'_>> + '_ {
        (0..self.markets_count()).map(move |row| self.market(row))
    }
}

impl<'a> MarketRow<'a> {
    pub fn holder(&self) -> MarketHolder<'a> {
        self.holder
    }

    pub fn id(&self) -> MarketId {
        match self.holder {
            MarketHolder::Planet(p) => MarketId::Planet(p.id),
            MarketHolder::Ship(s) => MarketId::Ship(s.id),
        }
    }

    pub fn is_planet(&self) -> bool {
        matches!(self.holder, MarketHolder::Planet(_))
    }

    pub fn name(&self) -> &'a str {
        match self.holder {
            MarketHolder::Planet(p) => &p.name,
            MarketHolder::Ship(s) => &s.name,
        }
    }

    // Planet-only columns; ship rows report empty values.

    pub fn economy(&self) -> &'a str {
        match self.holder {
            MarketHolder::Planet(p) => &p.economy,
            MarketHolder::Ship(_) => "",
        }
    }

    pub fn owner(&self) -> &'a str {
        match self.holder {
            MarketHolder::Planet(p) => &p.owner,
            MarketHolder::Ship(_) => "",
        }
    }

    pub fn size(&self) -> u32 {
        match self.holder {
            MarketHolder::Planet(p) => p.size,
            MarketHolder::Ship(_) => 0,
        }
    }

    pub fn tech_level(&self) -> u32 {
        match self.holder {
            MarketHolder::Planet(p) => p.tech_level,
            MarketHolder::Ship(_) => 0,
        }
    }

    fn market_data(&self) -> &'a Market {
        let market = match self.holder {
            MarketHolder::Planet(p) => p.market.as_ref(),
            MarketHolder::Ship(s) => s.market.as_ref(),
        };
        market.unwrap_or_else(|| panic!("market row {:?} has no market", self.id()))
    }

    pub fn quantity(&self) -> &'a GoodsArray {
        &self.market_data().quantity
    }

    pub fn sale(&self) -> &'a GoodsArray {
        &self.market_data().sale
    }

    pub fn buy(&self) -> &'a GoodsArray {
        &self.market_data().buy
    }

    /// Star of the market; `None` for a ship market in transit.
    pub fn star_id(&self) -> Option<StarId> {
        match self.holder {
            MarketHolder::Planet(p) => Some(p.star),
            MarketHolder::Ship(s) => s.star,
        }
    }

    pub fn star_name(&self) -> &'a str {
        self.galaxy.star_name_or(self.star_id(), "")
    }

    /// Distance from the player's star. Requires a player ship.
    pub fn distance_from_player(&self) -> f64 {
        self.galaxy.distance_from_player(self.star_id())
    }
}
