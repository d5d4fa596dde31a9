//! Tick-based numeric types for prices and quantities
//!
//! Prices are signed 32-bit ticks and quantities unsigned 32-bit counts, so
//! all book arithmetic is exact integer arithmetic. Both are serialized as
//! plain numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Price in signed integer ticks
///
/// Ordering follows the tick value; negative ticks are valid (spread and
/// basis instruments trade through zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i32);

impl Price {
    /// Most aggressive buy bound: a buyer at this price crosses any ask.
    pub const MAX: Price = Price(i32::MAX);
    /// Most aggressive sell bound: a seller at this price crosses any bid.
    pub const MIN: Price = Price(i32::MIN);

    /// Create a Price from a raw tick value
    pub fn new(ticks: i32) -> Self {
        Self(ticks)
    }

    /// Get the raw tick value
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl From<i32> for Price {
    fn from(ticks: i32) -> Self {
        Self(ticks)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity in unsigned integer units
///
/// Quantities decrease monotonically as an order fills; zero marks a fully
/// filled order on its way out of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Create a new Quantity
    ///
    /// # Panics
    /// Panics if the value is zero; zero-quantity orders are never admitted.
    pub fn new(value: u32) -> Self {
        assert!(value > 0, "Quantity must be positive");
        Self(value)
    }

    /// Try to create a Quantity, returning None if zero
    pub fn try_new(value: u32) -> Option<Self> {
        if value > 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Zero quantity (fully consumed)
    pub fn zero() -> Self {
        Self(0)
    }

    /// Get the raw value
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Check if the quantity is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Saturating subtraction, clamping at zero
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert!(
            self.0 >= rhs.0,
            "Quantity subtraction would result in negative"
        );
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
