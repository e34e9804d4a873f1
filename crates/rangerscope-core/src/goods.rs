//! Commodity enumeration and the fixed-length per-commodity arrays that
//! markets carry.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of tradable commodities.
pub const GOODS_COUNT: usize = 8;

/// The tradable commodities, in dump column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Goods {
    Food,
    Medicine,
    Alcohol,
    Minerals,
    Luxury,
    Technics,
    Arms,
    Narcotics,
}

impl Goods {
    pub const ALL: [Goods; GOODS_COUNT] = [
        Goods::Food,
        Goods::Medicine,
        Goods::Alcohol,
        Goods::Minerals,
        Goods::Luxury,
        Goods::Technics,
        Goods::Arms,
        Goods::Narcotics,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Goods::Food => "Food",
            Goods::Medicine => "Medicine",
            Goods::Alcohol => "Alcohol",
            Goods::Minerals => "Minerals",
            Goods::Luxury => "Luxury",
            Goods::Technics => "Technics",
            Goods::Arms => "Arms",
            Goods::Narcotics => "Narcotics",
        }
    }
}

/// One value per commodity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GoodsArray(pub [u32; GOODS_COUNT]);

impl GoodsArray {
    pub fn splat(value: u32) -> Self {
        Self([value; GOODS_COUNT])
    }

    /// Element-wise minimum.
    pub fn min(&self, other: &GoodsArray) -> GoodsArray {
        let mut out = *self;
        for (slot, rhs) in out.0.iter_mut().zip(other.0.iter()) {
            *slot = (*slot).min(*rhs);
        }
        out
    }

    /// Element-wise maximum.
    pub fn max(&self, other: &GoodsArray) -> GoodsArray {
        let mut out = *self;
        for (slot, rhs) in out.0.iter_mut().zip(other.0.iter()) {
            *slot = (*slot).max(*rhs);
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (Goods, u32)> + '_ {
        Goods::ALL.iter().map(move |g| (*g, self.0[g.index()]))
    }
}

impl Index<Goods> for GoodsArray {
    type Output = u32;

    fn index(&self, goods: Goods) -> &u32 {
        &self.0[goods.index()]
    }
}

impl IndexMut<Goods> for GoodsArray {
    fn index_mut(&mut self, goods: Goods) -> &mut u32 {
        &mut self.0[goods.index()]
    }
}

/// Quantity, sale price and buy price of every commodity at one market.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Market {
    pub quantity: GoodsArray,
    pub sale: GoodsArray,
    pub buy: GoodsArray,
}

/// Running per-commodity price extremes over planet markets.
///
/// `min_sale` starts at `u32::MAX` and `max_buy` at 0, so both are only
/// meaningful once at least one market has been included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceExtremes {
    pub min_sale: GoodsArray,
    pub max_buy: GoodsArray,
}

impl Default for PriceExtremes {
    fn default() -> Self {
        Self {
            min_sale: GoodsArray::splat(u32::MAX),
            max_buy: GoodsArray::splat(0),
        }
    }
}

impl PriceExtremes {
    pub fn include(&mut self, market: &Market) {
        self.min_sale = self.min_sale.min(&market.sale);
        self.max_buy = self.max_buy.max(&market.buy);
    }
}
