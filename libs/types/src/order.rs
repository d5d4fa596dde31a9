//! Order lifecycle types
//!
//! An order is an immutable identity (id, side, type, price, initial
//! quantity) plus mutable fill state (remaining quantity). The only mutators
//! are `fill`, which consumes quantity, and `reprice`, which assigns a
//! market order its admission price.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Liveness policy for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Rests until filled or explicitly cancelled
    GoodTillCancel,
    /// Rests until filled, cancelled, or the market-close prune
    GoodForDay,
    /// Matches immediately against available liquidity, remainder cancelled
    FillAndKill,
    /// Executes in full immediately or is rejected entirely
    FillOrKill,
    /// Sweeps the opposing side at any price, remainder cancelled
    Market,
}

/// A single order: immutable identity plus mutable fill state
///
/// `remaining_quantity` decreases monotonically from `initial_quantity`;
/// the order is fully filled exactly when it reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_id: OrderId,
    order_type: OrderType,
    side: Side,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Create a new limit order
    ///
    /// # Panics
    /// Panics if `quantity` is zero.
    pub fn new(
        order_type: OrderType,
        order_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        assert!(!quantity.is_zero(), "Order quantity must be positive");
        Self {
            order_id,
            order_type,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// Create a market order
    ///
    /// Carries the most aggressive price bound for its side until admission
    /// assigns the opposing side's worst price; the bound itself never
    /// reaches the book.
    pub fn market(order_id: OrderId, side: Side, quantity: Quantity) -> Self {
        let price = match side {
            Side::Buy => Price::MAX,
            Side::Sell => Price::MIN,
        };
        Self::new(OrderType::Market, order_id, side, price, quantity)
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    /// Quantity filled so far
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity.saturating_sub(self.remaining_quantity)
    }

    /// Check if the order is completely filled
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    /// Consume quantity from the order
    ///
    /// # Panics
    /// Panics if `quantity` exceeds the remaining quantity. The matcher
    /// always fills at most `min(bid.remaining, ask.remaining)`, so an
    /// overfill can only come from an engine bug.
    pub fn fill(&mut self, quantity: Quantity) {
        assert!(
            quantity <= self.remaining_quantity,
            "Order {} cannot fill for more than the remaining quantity",
            self.order_id
        );
        self.remaining_quantity = self.remaining_quantity - quantity;
    }

    /// Assign a concrete limit price to a market order at admission
    pub fn reprice(&mut self, price: Price) {
        self.price = price;
    }
}

/// Cancel-and-replace request
///
/// The replacement keeps the original order's type but takes a fresh side,
/// price, and quantity, and always joins the tail of its new price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModify {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

impl OrderModify {
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }

    /// Build the replacement order, preserving the original's type
    pub fn to_order(&self, order_type: OrderType) -> Order {
        Order::new(
            order_type,
            self.order_id,
            self.side,
            self.price,
            self.quantity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy(quantity: u32) -> Order {
        Order::new(
            OrderType::GoodTillCancel,
            OrderId::new(1),
            Side::Buy,
            Price::new(100),
            Quantity::new(quantity),
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_order_creation() {
        let order = buy(10);
        assert_eq!(order.remaining_quantity(), Quantity::new(10));
        assert_eq!(order.filled_quantity(), Quantity::zero());
        assert!(!order.is_filled());
    }

    #[test]
    fn test_order_fill() {
        let mut order = buy(10);

        order.fill(Quantity::new(3));
        assert_eq!(order.remaining_quantity(), Quantity::new(7));
        assert_eq!(order.filled_quantity(), Quantity::new(3));
        assert!(!order.is_filled());

        order.fill(Quantity::new(7));
        assert!(order.is_filled());
    }

    #[test]
    #[should_panic(expected = "cannot fill for more than the remaining quantity")]
    fn test_order_overfill_panics() {
        let mut order = buy(5);
        order.fill(Quantity::new(6));
    }

    #[test]
    fn test_market_order_bounds() {
        let order = Order::market(OrderId::new(2), Side::Buy, Quantity::new(5));
        assert_eq!(order.price(), Price::MAX);
        assert_eq!(order.order_type(), OrderType::Market);

        let order = Order::market(OrderId::new(3), Side::Sell, Quantity::new(5));
        assert_eq!(order.price(), Price::MIN);
    }

    #[test]
    fn test_market_order_reprice() {
        let mut order = Order::market(OrderId::new(2), Side::Buy, Quantity::new(5));
        order.reprice(Price::new(102));
        assert_eq!(order.price(), Price::new(102));
    }

    #[test]
    fn test_modify_to_order() {
        let modify = OrderModify::new(
            OrderId::new(9),
            Side::Sell,
            Price::new(105),
            Quantity::new(4),
        );
        let order = modify.to_order(OrderType::GoodForDay);

        assert_eq!(order.order_id(), OrderId::new(9));
        assert_eq!(order.order_type(), OrderType::GoodForDay);
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.price(), Price::new(105));
        assert_eq!(order.initial_quantity(), Quantity::new(4));
    }

    #[test]
    fn test_order_serialization() {
        let order = buy(10);
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
