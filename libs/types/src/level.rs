//! Aggregate depth types
//!
//! The public read-side of level data: one row per price level, in the
//! side's priority order.

use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// One price level of a depth snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// The price of this level
    pub price: Price,
    /// Sum of remaining quantities of all orders resting at this level
    pub quantity: Quantity,
}

impl LevelInfo {
    pub fn new(price: Price, quantity: Quantity) -> Self {
        Self { price, quantity }
    }
}
