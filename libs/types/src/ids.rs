//! Opaque identifier types
//!
//! The engine never interprets identifiers; callers mint them and the book
//! only requires uniqueness over its lifetime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order
///
/// An opaque 64-bit value supplied by the caller. The engine rejects a
/// duplicate id on admission but otherwise attaches no meaning to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create an OrderId from a raw value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
