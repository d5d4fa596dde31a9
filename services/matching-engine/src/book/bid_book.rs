//! Bid (buy-side) order book
//!
//! Maintains buy levels keyed by price; the best bid is the highest price.
//! Uses BTreeMap so level walks are in deterministic price order.

use std::collections::BTreeMap;
use types::numeric::Price;

use super::arena::{OrderArena, OrderSlot};
use super::price_level::PriceLevel;

/// Bid (buy) side order book
///
/// Levels are deleted the moment they empty, so every present level holds at
/// least one order.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
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

    /// Best bid price (highest)
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Worst bid price (lowest); a sell market order is repriced here
    pub fn worst_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
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

    /// Prices from the best bid down to `limit` (inclusive), in priority
    /// order
    pub fn prices_down_to(&self, limit: Price) -> impl Iterator<Item = Price> + '_ {
        self.levels.range(limit..).rev().map(|(price, _)| *price)
    }

    /// Levels in priority order (best bid first)
    pub fn iter(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of distinct price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::OrderId;
    use types::numeric::Quantity;
    use types::order::{Order, OrderType, Side};

    fn insert_bid(book: &mut BidBook, arena: &mut OrderArena, id: u64, price: i32) -> OrderSlot {
        let order = Order::new(
            OrderType::GoodTillCancel,
            OrderId::new(id),
            Side::Buy,
            Price::new(price),
            Quantity::new(10),
        );
        let slot = arena.insert(order);
        book.insert(arena, Price::new(price), slot);
        slot
    }

    #[test]
    fn test_best_and_worst_price() {
        let mut arena = OrderArena::new();
        let mut book = BidBook::new();

        insert_bid(&mut book, &mut arena, 1, 100);
        insert_bid(&mut book, &mut arena, 2, 102);
        insert_bid(&mut book, &mut arena, 3, 99);

        assert_eq!(book.best_price(), Some(Price::new(102)));
        assert_eq!(book.worst_price(), Some(Price::new(99)));
        assert_eq!(book.level_count(), 3);
    }

    #[test]
    fn test_remove_deletes_empty_level() {
        let mut arena = OrderArena::new();
        let mut book = BidBook::new();

        let slot = insert_bid(&mut book, &mut arena, 1, 100);
        book.remove(&mut arena, Price::new(100), slot);

        assert!(book.is_empty());
        assert_eq!(book.best_price(), None);
    }

    #[test]
    fn test_pop_front_at() {
        let mut arena = OrderArena::new();
        let mut book = BidBook::new();

        let first = insert_bid(&mut book, &mut arena, 1, 100);
        let second = insert_bid(&mut book, &mut arena, 2, 100);

        assert_eq!(book.pop_front_at(&mut arena, Price::new(100)), Some(first));
        assert_eq!(book.front_at(Price::new(100)), Some(second));
        assert_eq!(book.pop_front_at(&mut arena, Price::new(100)), Some(second));
        assert!(book.is_empty());
    }

    #[test]
    fn test_prices_down_to() {
        let mut arena = OrderArena::new();
        let mut book = BidBook::new();

        for (id, price) in [(1, 100), (2, 102), (3, 99), (4, 97)] {
            insert_bid(&mut book, &mut arena, id, price);
        }

        let walk: Vec<i32> = book
            .prices_down_to(Price::new(99))
            .map(|p| p.as_i32())
            .collect();
        assert_eq!(walk, vec![102, 100, 99]);
    }

    #[test]
    fn test_iter_best_first() {
        let mut arena = OrderArena::new();
        let mut book = BidBook::new();

        insert_bid(&mut book, &mut arena, 1, 100);
        insert_bid(&mut book, &mut arena, 2, 102);

        let prices: Vec<i32> = book.iter().map(|(price, _)| price.as_i32()).collect();
        assert_eq!(prices, vec![102, 100]);
    }
}
