//! Matching logic module
//!
//! Price-time priority: levels match in price order, orders within a level
//! in arrival order.

pub mod crossing;

pub use crossing::can_match;
