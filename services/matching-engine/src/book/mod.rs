//! Order book infrastructure module
//!
//! Contains the order arena, price levels, bid/ask books, and the aggregate
//! level-data index.

pub mod arena;
pub mod ask_book;
pub mod bid_book;
pub mod level_data;
pub mod price_level;

pub use arena::{OrderArena, OrderNode, OrderSlot};
pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use level_data::{LevelAction, LevelData, LevelDataMap};
pub use price_level::PriceLevel;
