//! Arena storage for resting orders
//!
//! Every resting order lives in one slotmap arena and is referenced from two
//! places: its price level's FIFO (through the intrusive prev/next links on
//! the node) and the order-id index. Slot keys stay valid across unrelated
//! inserts and removals, which is what makes O(1) cancellation by handle
//! sound.

use slotmap::{new_key_type, SlotMap};
use types::order::Order;

new_key_type! {
    /// Stable handle to an order resting in the book
    pub struct OrderSlot;
}

/// An order in the arena together with its FIFO links
///
/// The links are owned by the price level the order rests in; `None` on both
/// ends means the order is the only one at its level.
#[derive(Debug, Clone)]
pub struct OrderNode {
    pub order: Order,
    pub(crate) prev: Option<OrderSlot>,
    pub(crate) next: Option<OrderSlot>,
}

impl OrderNode {
    fn new(order: Order) -> Self {
        Self {
            order,
            prev: None,
            next: None,
        }
    }
}

/// Slotmap arena owning all resting orders
#[derive(Debug, Clone)]
pub struct OrderArena {
    nodes: SlotMap<OrderSlot, OrderNode>,
}

impl OrderArena {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Allocate a node for a newly admitted order, initially unlinked
    pub fn insert(&mut self, order: Order) -> OrderSlot {
        self.nodes.insert(OrderNode::new(order))
    }

    /// Free a node, returning the order it held
    pub fn remove(&mut self, slot: OrderSlot) -> Option<Order> {
        self.nodes.remove(slot).map(|node| node.order)
    }

    /// Borrow a node
    ///
    /// # Panics
    /// Panics on a stale handle; handles are only ever taken from the order
    /// index or a level FIFO, so a stale one indicates an engine bug.
    pub fn node(&self, slot: OrderSlot) -> &OrderNode {
        &self.nodes[slot]
    }

    /// Mutably borrow a node (same handle contract as [`OrderArena::node`])
    pub fn node_mut(&mut self, slot: OrderSlot) -> &mut OrderNode {
        &mut self.nodes[slot]
    }

    /// Number of resting orders
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for OrderArena {
    fn default() -> Self {
        Self::new()
    }
}
