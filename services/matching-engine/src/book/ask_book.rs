//! Ask (sell-side) order book
//!
//! Maintains sell levels keyed by price; the best ask is the lowest price.
//! Uses BTreeMap so level walks are in deterministic price order.

use std::collections::BTreeMap;
use types::numeric::Price;

use super::arena::{OrderArena, OrderSlot};
use super::price_level::PriceLevel;

/// Ask (sell) side order book
///
/// Levels are deleted the moment they empty, so every present level holds at
/// least one order.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Append an order at the tail of its price level
    pub fn insert(&mut self, arena: &mut OrderArena, price: Price, slot: OrderSlot) {
        self.levels
            .entry(price)
            .or_insert_with(PriceLevel::new)
            .push_back(arena, slot);
    }

    /// Detach an order from its level, deleting the level if it empties
    ///
    /// The slot must currently rest at `price` on this side.
    pub fn remove(&mut self, arena: &mut OrderArena, price: Price, slot: OrderSlot) {
        if let Some(level) = self.levels.get_mut(&price) {
            level.unlink(arena, slot);
            if level.is_empty() {
                self.levels.remove(&price);
            }
        }
    }

    /// Best ask price (lowest)
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Worst ask price (highest); a buy market order is repriced here
    pub fn worst_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Head order of the level at `price`
    pub fn front_at(&self, price: Price) -> Option<OrderSlot> {
        self.levels.get(&price).and_then(|level| level.front())
    }

    /// Pop the head order of the level at `price`, deleting the level if it
    /// empties
    pub fn pop_front_at(&mut self, arena: &mut OrderArena, price: Price) -> Option<OrderSlot> {
        let level = self.levels.get_mut(&price)?;
        let slot = level.pop_front(arena)?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(slot)
    }

    /// Prices from the best ask up to `limit` (inclusive), in priority order
    pub fn prices_up_to(&self, limit: Price) -> impl Iterator<Item = Price> + '_ {
        self.levels.range(..=limit).map(|(price, _)| *price)
    }

    /// Levels in priority order (best ask first)
    pub fn iter(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().map(|(price, level)| (*price, level))
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of distinct price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
