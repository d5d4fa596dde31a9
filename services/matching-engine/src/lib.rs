//! Matching Engine
//!
//! Price-time priority limit order book for a single instrument. Incoming
//! orders are matched against resting orders, producing a stream of trades;
//! aggregate depth is maintained eagerly so fill-or-kill feasibility checks
//! cost one lookup per price level.
//!
//! **Key invariants:**
//! - Price-time priority strictly enforced (levels in price order, FIFO
//!   within a level)
//! - The book is never crossed at rest
//! - Conservation of quantity: trade quantities equal fill deltas
//! - Level data always agrees with the per-order queues
//!
//! The engine is safe for concurrent callers: one book-wide mutex serializes
//! all mutations, and a background thread cancels good-for-day orders at
//! each market close.

pub mod book;
pub mod clock;
pub mod config;
pub mod engine;
pub mod matching;
pub mod orderbook;

pub use clock::{Clock, SystemClock};
pub use config::EngineConfig;
pub use engine::OrderBookSnapshot;
pub use orderbook::Orderbook;
