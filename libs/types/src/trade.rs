//! Trade execution types
//!
//! Every cross produces exactly one `Trade` carrying both legs. Each leg
//! records the resting order's own price, so the bid and ask leg prices can
//! differ when a repriced market order is involved.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// One leg of a trade: the order it filled, at its own price, for the
/// matched quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    pub order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

impl TradeInfo {
    pub fn new(order_id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            price,
            quantity,
        }
    }
}

/// An atomic exchange between a resting bid and a resting ask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub bid: TradeInfo,
    pub ask: TradeInfo,
}

impl Trade {
    /// Create a trade from its two legs
    ///
    /// Both legs always carry the same quantity; only the prices may differ.
    pub fn new(bid: TradeInfo, ask: TradeInfo) -> Self {
        debug_assert_eq!(bid.quantity, ask.quantity, "Trade legs must match in quantity");
        Self { bid, ask }
    }

    /// Matched quantity (identical on both legs)
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

/// Trades produced by a single admission, in fill order
pub type Trades = Vec<Trade>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_legs() {
        let trade = Trade::new(
            TradeInfo::new(OrderId::new(1), Price::new(100), Quantity::new(7)),
            TradeInfo::new(OrderId::new(2), Price::new(100), Quantity::new(7)),
        );

        assert_eq!(trade.quantity(), Quantity::new(7));
        assert_eq!(trade.bid.order_id, OrderId::new(1));
        assert_eq!(trade.ask.order_id, OrderId::new(2));
    }

    #[test]
    fn test_trade_leg_prices_may_differ() {
        // A repriced market buy fills at its assigned worst-ask price while
        // the resting ask fills at its own better price.
        let trade = Trade::new(
            TradeInfo::new(OrderId::new(1), Price::new(105), Quantity::new(3)),
            TradeInfo::new(OrderId::new(2), Price::new(101), Quantity::new(3)),
        );

        assert_ne!(trade.bid.price, trade.ask.price);
    }

    #[test]
    fn test_trade_serialization() {
        let trade = Trade::new(
            TradeInfo::new(OrderId::new(1), Price::new(100), Quantity::new(7)),
            TradeInfo::new(OrderId::new(2), Price::new(100), Quantity::new(7)),
        );

        let json = serde_json::to_string(&trade).unwrap();
        let deserialized: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, deserialized);
    }
}
