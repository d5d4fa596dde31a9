//! Single-threaded matching core
//!
//! `Book` owns the five cooperating substructures: the two side books, the
//! order arena, the order-id index, and the aggregate level-data index. All
//! methods assume exclusive access; the concurrent facade in
//! [`crate::orderbook`] provides it through one book-wide mutex.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use types::errors::Reject;
use types::ids::OrderId;
use types::level::LevelInfo;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderModify, OrderType, Side};
use types::trade::{Trade, TradeInfo, Trades};

use crate::book::{AskBook, BidBook, LevelAction, LevelDataMap, OrderArena, OrderSlot, PriceLevel};
use crate::matching::crossing;

/// Full-depth snapshot of aggregate quantities, each side best first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub bids: Vec<LevelInfo>,
    pub asks: Vec<LevelInfo>,
}

/// The order book state and matching algorithm
///
/// Guarantees on return from any method: the book is not crossed, no level
/// is empty, and the order index, arena, and level data agree with the side
/// books.
#[derive(Debug, Default)]
pub(crate) struct Book {
    arena: OrderArena,
    bids: BidBook,
    asks: AskBook,
    /// Order-id index: present iff the order rests in exactly one level
    orders: HashMap<OrderId, OrderSlot>,
    levels: LevelDataMap,
}

impl Book {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Admit an order, returning the trades its admission produced
    ///
    /// Rejections leave the book untouched. See [`Reject`] for the reasons;
    /// the silent public contract maps them all to empty trades.
    pub(crate) fn try_add_order(&mut self, mut order: Order) -> Result<Trades, Reject> {
        if self.orders.contains_key(&order.order_id()) {
            return Err(Reject::DuplicateOrderId(order.order_id()));
        }

        // A market order is repriced at the opposing worst so the crossing
        // loop sweeps every level; its remainder is cancelled below.
        if order.order_type() == OrderType::Market {
            let worst = match order.side() {
                Side::Buy => self.asks.worst_price(),
                Side::Sell => self.bids.worst_price(),
            };
            match worst {
                Some(price) => order.reprice(price),
                None => return Err(Reject::EmptyOpposingSide),
            }
        }

        if order.order_type() == OrderType::FillAndKill
            && !self.can_match(order.side(), order.price())
        {
            return Err(Reject::UnmatchableFillAndKill);
        }

        if order.order_type() == OrderType::FillOrKill
            && !self.can_fully_fill(order.side(), order.price(), order.initial_quantity())
        {
            return Err(Reject::InfeasibleFillOrKill);
        }

        let order_id = order.order_id();
        let order_type = order.order_type();
        self.insert_resting(order);
        let trades = self.match_orders();

        // A market order sweeps until it fills or the opposing side runs
        // dry; whatever is left must not rest.
        if order_type == OrderType::Market {
            self.cancel_order(order_id);
        }
        Ok(trades)
    }

    /// Cancel a resting order; unknown ids are a no-op
    pub(crate) fn cancel_order(&mut self, order_id: OrderId) {
        let Some(slot) = self.orders.remove(&order_id) else {
            return;
        };

        let node = self.arena.node(slot);
        let side = node.order.side();
        let price = node.order.price();
        let remaining = node.order.remaining_quantity();

        match side {
            Side::Buy => self.bids.remove(&mut self.arena, price, slot),
            Side::Sell => self.asks.remove(&mut self.arena, price, slot),
        }
        self.arena.remove(slot);
        self.levels.update(price, remaining, LevelAction::Remove);
    }

    /// Cancel-and-replace; the replacement keeps the original's type but
    /// loses its time priority
    pub(crate) fn try_modify_order(&mut self, modify: OrderModify) -> Result<Trades, Reject> {
        let Some(&slot) = self.orders.get(&modify.order_id) else {
            return Err(Reject::UnknownOrder(modify.order_id));
        };
        let order_type = self.arena.node(slot).order.order_type();

        self.cancel_order(modify.order_id);
        self.try_add_order(modify.to_order(order_type))
    }

    /// Number of resting orders
    pub(crate) fn size(&self) -> usize {
        self.orders.len()
    }

    /// Best bid level as (price, aggregate quantity)
    pub(crate) fn best_bid(&self) -> Option<LevelInfo> {
        self.bids
            .best_price()
            .map(|price| LevelInfo::new(price, self.levels.quantity_at(price)))
    }

    /// Best ask level as (price, aggregate quantity)
    pub(crate) fn best_ask(&self) -> Option<LevelInfo> {
        self.asks
            .best_price()
            .map(|price| LevelInfo::new(price, self.levels.quantity_at(price)))
    }

    /// Aggregate depth per side, derived from the side books on demand
    pub(crate) fn snapshot(&self) -> OrderBookSnapshot {
        self.depth(usize::MAX)
    }

    /// Top `levels` price levels per side, best first
    pub(crate) fn depth(&self, levels: usize) -> OrderBookSnapshot {
        OrderBookSnapshot {
            bids: self
                .bids
                .iter()
                .take(levels)
                .map(|(price, level)| LevelInfo::new(price, self.level_quantity(level)))
                .collect(),
            asks: self
                .asks
                .iter()
                .take(levels)
                .map(|(price, level)| LevelInfo::new(price, self.level_quantity(level)))
                .collect(),
        }
    }

    /// Sum of remaining quantities over one level's FIFO
    fn level_quantity(&self, level: &PriceLevel) -> Quantity {
        level.iter(&self.arena).fold(Quantity::zero(), |acc, slot| {
            acc + self.arena.node(slot).order.remaining_quantity()
        })
    }

    /// Ids of all resting good-for-day orders, for the close-of-market prune
    pub(crate) fn good_for_day_ids(&self) -> Vec<OrderId> {
        self.orders
            .iter()
            .filter(|(_, &slot)| {
                self.arena.node(slot).order.order_type() == OrderType::GoodForDay
            })
            .map(|(&order_id, _)| order_id)
            .collect()
    }

    /// Whether a limit on `side` is marketable against the opposing best
    fn can_match(&self, side: Side, price: Price) -> bool {
        let opposing_best = match side {
            Side::Buy => self.asks.best_price(),
            Side::Sell => self.bids.best_price(),
        };
        opposing_best.is_some_and(|best| crossing::limit_crosses(side, price, best))
    }

    /// Whether `quantity` can be fully satisfied by sweeping opposing levels
    /// priced no worse than `price`
    ///
    /// Walks the opposing level prices in priority order and reads aggregate
    /// quantities from the level-data index, so the check costs one lookup
    /// per distinct level within the limit, independent of order counts.
    fn can_fully_fill(&self, side: Side, price: Price, quantity: Quantity) -> bool {
        if !self.can_match(side, price) {
            return false;
        }

        let mut needed = quantity.as_u32();
        match side {
            Side::Buy => {
                for level_price in self.asks.prices_up_to(price) {
                    let available = self.levels.quantity_at(level_price).as_u32();
                    if needed <= available {
                        return true;
                    }
                    needed -= available;
                }
            }
            Side::Sell => {
                for level_price in self.bids.prices_down_to(price) {
                    let available = self.levels.quantity_at(level_price).as_u32();
                    if needed <= available {
                        return true;
                    }
                    needed -= available;
                }
            }
        }
        false
    }

    /// Insert an admitted order at the tail of its price level and register
    /// it in the order index and level data
    fn insert_resting(&mut self, order: Order) {
        let order_id = order.order_id();
        let side = order.side();
        let price = order.price();
        let quantity = order.remaining_quantity();

        let slot = self.arena.insert(order);
        match side {
            Side::Buy => self.bids.insert(&mut self.arena, price, slot),
            Side::Sell => self.asks.insert(&mut self.arena, price, slot),
        }
        self.orders.insert(order_id, slot);
        self.levels.update(price, quantity, LevelAction::Add);
    }

    /// The crossing loop
    ///
    /// Runs while the book is crossed, consuming the two best FIFOs head
    /// against head. Each cross fills both orders at their own prices and
    /// emits one trade. Fully filled heads leave the book immediately;
    /// emptied levels are deleted with them. After each inner pass, an
    /// immediate-type order left at the top of either side is cancelled so
    /// it never rests past the admitting call.
    fn match_orders(&mut self) -> Trades {
        let mut trades = Trades::new();

        loop {
            let (Some(bid_price), Some(ask_price)) =
                (self.bids.best_price(), self.asks.best_price())
            else {
                break;
            };
            if !crossing::can_match(bid_price, ask_price) {
                break;
            }

            loop {
                let (Some(bid_slot), Some(ask_slot)) =
                    (self.bids.front_at(bid_price), self.asks.front_at(ask_price))
                else {
                    break;
                };

                let quantity = self
                    .arena
                    .node(bid_slot)
                    .order
                    .remaining_quantity()
                    .min(self.arena.node(ask_slot).order.remaining_quantity());

                self.arena.node_mut(bid_slot).order.fill(quantity);
                self.arena.node_mut(ask_slot).order.fill(quantity);

                let (bid_id, bid_filled) = {
                    let order = &self.arena.node(bid_slot).order;
                    (order.order_id(), order.is_filled())
                };
                let (ask_id, ask_filled) = {
                    let order = &self.arena.node(ask_slot).order;
                    (order.order_id(), order.is_filled())
                };

                trades.push(Trade::new(
                    TradeInfo::new(bid_id, bid_price, quantity),
                    TradeInfo::new(ask_id, ask_price, quantity),
                ));

                self.levels.update(
                    bid_price,
                    quantity,
                    if bid_filled {
                        LevelAction::Remove
                    } else {
                        LevelAction::Match
                    },
                );
                self.levels.update(
                    ask_price,
                    quantity,
                    if ask_filled {
                        LevelAction::Remove
                    } else {
                        LevelAction::Match
                    },
                );

                if bid_filled {
                    self.orders.remove(&bid_id);
                    self.bids.pop_front_at(&mut self.arena, bid_price);
                    self.arena.remove(bid_slot);
                }
                if ask_filled {
                    self.orders.remove(&ask_id);
                    self.asks.pop_front_at(&mut self.arena, ask_price);
                    self.arena.remove(ask_slot);
                }
            }

            // One of the two best levels is exhausted. Before re-testing the
            // cross, drop a fill-and-kill left at either top of book: it
            // took what the depleted counter-queue offered and may not rest.
            self.cancel_fill_and_kill_top(Side::Buy);
            self.cancel_fill_and_kill_top(Side::Sell);
        }

        trades
    }

    /// Cancel the head of the best level on `side` if it is a fill-and-kill
    fn cancel_fill_and_kill_top(&mut self, side: Side) {
        let front = match side {
            Side::Buy => self
                .bids
                .best_price()
                .and_then(|price| self.bids.front_at(price)),
            Side::Sell => self
                .asks
                .best_price()
                .and_then(|price| self.asks.front_at(price)),
        };

        if let Some(slot) = front {
            let order = &self.arena.node(slot).order;
            if order.order_type() == OrderType::FillAndKill {
                let order_id = order.order_id();
                debug!(%order_id, "cancelling unfilled fill-and-kill remainder");
                self.cancel_order(order_id);
            }
        }
    }

    /// Verify every cross-structure invariant; test builds only
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        // Not crossed at rest.
        if let (Some(bid), Some(ask)) = (self.bids.best_price(), self.asks.best_price()) {
            assert!(bid < ask, "book crossed at rest: bid {bid} >= ask {ask}");
        }

        let mut all_levels: Vec<(Price, &PriceLevel)> = self.bids.iter().collect();
        all_levels.extend(self.asks.iter());

        let mut total_orders = 0;
        for (price, level) in all_levels {
            assert!(!level.is_empty(), "empty level at {price}");
            assert_eq!(
                level.len() as u32,
                self.levels.count_at(price),
                "level data count mismatch at {price}"
            );
            let sum = level.iter(&self.arena).fold(Quantity::zero(), |acc, slot| {
                let order = &self.arena.node(slot).order;
                assert!(!order.is_filled(), "filled order resting at {price}");
                assert!(
                    self.orders.get(&order.order_id()) == Some(&slot),
                    "order index out of step at {price}"
                );
                acc + order.remaining_quantity()
            });
            assert_eq!(
                sum,
                self.levels.quantity_at(price),
                "level data quantity mismatch at {price}"
            );
            total_orders += level.len();
        }

        assert_eq!(total_orders, self.orders.len());
        assert_eq!(total_orders, self.arena.len());
        assert_eq!(
            self.levels.len(),
            self.bids.level_count() + self.asks.level_count()
        );
    }
}
