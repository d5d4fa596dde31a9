//! Price level with an intrusive FIFO queue
//!
//! A price level holds all orders at one price on one side, in arrival
//! order. The queue is an intrusive doubly-linked list over arena slots:
//! the level stores head and tail, each node stores its neighbours. Orders
//! join at the tail and match from the head, and removing any order by its
//! slot is O(1) without touching the rest of the queue.

use super::arena::{OrderArena, OrderSlot};

/// FIFO queue of orders at a single price
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    head: Option<OrderSlot>,
    tail: Option<OrderSlot>,
    len: usize,
}

impl PriceLevel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest-arrival order at this level
    pub fn front(&self) -> Option<OrderSlot> {
        self.head
    }

    /// Number of orders at this level
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append an order at the tail (it has the worst time priority here)
    ///
    /// The slot must be unlinked (fresh from the arena).
    pub fn push_back(&mut self, arena: &mut OrderArena, slot: OrderSlot) {
        match self.tail {
            Some(tail) => {
                arena.node_mut(tail).next = Some(slot);
                arena.node_mut(slot).prev = Some(tail);
            }
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Detach and return the head order
    pub fn pop_front(&mut self, arena: &mut OrderArena) -> Option<OrderSlot> {
        let slot = self.head?;
        self.unlink(arena, slot);
        Some(slot)
    }

    /// Detach an order anywhere in the queue in O(1)
    ///
    /// The slot must currently rest in this level.
    pub fn unlink(&mut self, arena: &mut OrderArena, slot: OrderSlot) {
        let (prev, next) = {
            let node = arena.node_mut(slot);
            let links = (node.prev, node.next);
            node.prev = None;
            node.next = None;
            links
        };

        match prev {
            Some(prev) => arena.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => arena.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    /// Walk the queue head to tail
    pub fn iter<'a>(&self, arena: &'a OrderArena) -> impl Iterator<Item = OrderSlot> + 'a {
        std::iter::successors(self.head, move |&slot| arena.node(slot).next)
    }
}
