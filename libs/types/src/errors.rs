//! Rejection taxonomy
//!
//! Business rejections are valid inputs the book declines; they are typed
//! here so callers that care can see the reason, while the silent
//! `add_order` contract maps every one of them to an empty trade list.
//! Internal consistency violations (overfill) are not represented: those
//! are engine bugs and panic at the fault site.

use crate::ids::OrderId;
use thiserror::Error;

/// Why an admission or modify was declined
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    #[error("order id {0} is already in use")]
    DuplicateOrderId(OrderId),

    #[error("fill-and-kill order does not cross the opposing best")]
    UnmatchableFillAndKill,

    #[error("fill-or-kill order cannot be fully satisfied at its limit")]
    InfeasibleFillOrKill,

    #[error("market order admitted against an empty opposing side")]
    EmptyOpposingSide,

    #[error("order id {0} is not resting in the book")]
    UnknownOrder(OrderId),
}
