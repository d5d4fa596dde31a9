//! Concurrent order book engine
//!
//! One book-wide mutex guards every substructure: matching is cross-cutting
//! (a single admission can touch many levels on both sides), so finer locks
//! would need ordered acquisition over an unbounded level set for no real
//! gain. All public operations lock for their full duration and complete
//! without blocking on anything else, so they are linearizable in lock
//! order.
//!
//! A background thread prunes good-for-day orders at each market close. Its
//! cancellable wait pairs the mutex with a condition variable; the shutdown
//! flag is written under the lock so the pruner cannot miss a shutdown that
//! races with its wait. Dropping the engine raises the flag, signals the
//! condition, and joins the thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::Instant;

use tracing::{debug, info};
use types::errors::Reject;
use types::ids::OrderId;
use types::level::LevelInfo;
use types::order::{Order, OrderModify};
use types::trade::Trades;

use crate::clock::{time_until_close, Clock, SystemClock};
use crate::config::EngineConfig;
use crate::engine::{Book, OrderBookSnapshot};

/// Thread-safe limit order book for a single instrument
///
/// Safe to share across ingress threads; every operation returns
/// synchronously. The engine owns a pruner thread for its whole lifetime
/// and joins it on drop.
pub struct Orderbook {
    shared: Arc<Shared>,
    pruner: Option<JoinHandle<()>>,
}

struct Shared {
    book: Mutex<Book>,
    shutdown: AtomicBool,
    shutdown_signal: Condvar,
    config: EngineConfig,
    clock: Box<dyn Clock>,
}

impl Orderbook {
    /// Create an engine with the default configuration and the system clock
    pub fn new() -> Self {
        Self::with_clock(EngineConfig::default(), SystemClock)
    }

    /// Create an engine with a custom configuration and the system clock
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Create an engine with a custom configuration and clock
    pub fn with_clock(config: EngineConfig, clock: impl Clock + 'static) -> Self {
        let shared = Arc::new(Shared {
            book: Mutex::new(Book::new()),
            shutdown: AtomicBool::new(false),
            shutdown_signal: Condvar::new(),
            config,
            clock: Box::new(clock),
        });

        let pruner = {
            let shared = Arc::clone(&shared);
            std::thread::Builder::new()
                .name("day-order-pruner".into())
                .spawn(move || prune_good_for_day_orders(&shared))
                .expect("failed to spawn pruner thread")
        };

        Self {
            shared,
            pruner: Some(pruner),
        }
    }

    /// Admit an order and return the trades its admission produced
    ///
    /// Every business rejection (duplicate id, unmatchable fill-and-kill,
    /// infeasible fill-or-kill, market order into an empty side) returns
    /// empty trades and leaves the book unchanged.
    pub fn add_order(&self, order: Order) -> Trades {
        match self.try_add_order(order) {
            Ok(trades) => trades,
            Err(reject) => {
                debug!(%reject, "order rejected");
                Trades::new()
            }
        }
    }

    /// Like [`Orderbook::add_order`], surfacing the rejection reason
    pub fn try_add_order(&self, order: Order) -> Result<Trades, Reject> {
        self.shared.book.lock().unwrap().try_add_order(order)
    }

    /// Cancel a resting order; unknown ids are a no-op
    pub fn cancel_order(&self, order_id: OrderId) {
        self.shared.book.lock().unwrap().cancel_order(order_id);
    }

    /// Cancel-and-replace
    ///
    /// The replacement keeps the original's order type but takes the
    /// request's side, price, and quantity, and joins the tail of its new
    /// level. Unknown ids return empty trades.
    pub fn modify_order(&self, modify: OrderModify) -> Trades {
        match self.try_modify_order(modify) {
            Ok(trades) => trades,
            Err(reject) => {
                debug!(%reject, "modify rejected");
                Trades::new()
            }
        }
    }

    /// Like [`Orderbook::modify_order`], surfacing the rejection reason
    pub fn try_modify_order(&self, modify: OrderModify) -> Result<Trades, Reject> {
        self.shared.book.lock().unwrap().try_modify_order(modify)
    }

    /// Number of resting orders
    pub fn size(&self) -> usize {
        self.shared.book.lock().unwrap().size()
    }

    /// Full-depth aggregate snapshot, each side best first
    pub fn snapshot(&self) -> OrderBookSnapshot {
        self.shared.book.lock().unwrap().snapshot()
    }

    /// Top `levels` price levels per side, best first
    pub fn depth(&self, levels: usize) -> OrderBookSnapshot {
        self.shared.book.lock().unwrap().depth(levels)
    }

    /// Best bid level (price and aggregate quantity)
    pub fn best_bid(&self) -> Option<LevelInfo> {
        self.shared.book.lock().unwrap().best_bid()
    }

    /// Best ask level (price and aggregate quantity)
    pub fn best_ask(&self) -> Option<LevelInfo> {
        self.shared.book.lock().unwrap().best_ask()
    }
}

impl Default for Orderbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Orderbook {
    fn drop(&mut self) {
        // The flag is set under the book lock: the pruner holds that lock
        // from its shutdown check until it enters the wait, so the signal
        // below cannot land in between and be lost.
        let guard = self.shared.book.lock();
        self.shared.shutdown.store(true, Ordering::Release);
        drop(guard);

        self.shared.shutdown_signal.notify_one();
        if let Some(pruner) = self.pruner.take() {
            let _ = pruner.join();
        }
    }
}

/// Pruner loop: wait for the next market close, then cancel every resting
/// good-for-day order in one bulk pass
fn prune_good_for_day_orders(shared: &Shared) {
    loop {
        let wait = time_until_close(shared.clock.now(), shared.config.market_close)
            + shared.config.prune_slack;
        let deadline = Instant::now() + wait;

        let order_ids = {
            let mut book = shared.book.lock().unwrap();
            loop {
                if shared.shutdown.load(Ordering::Acquire) {
                    return;
                }
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                // The wait releases the lock atomically and re-acquires it
                // on wake; the loop re-tests the flag and the deadline, so
                // spurious wakes are harmless.
                let (guard, _) = shared
                    .shutdown_signal
                    .wait_timeout(book, remaining)
                    .unwrap();
                book = guard;
            }
            book.good_for_day_ids()
        };

        if order_ids.is_empty() {
            continue;
        }

        info!(count = order_ids.len(), "pruning good-for-day orders at market close");
        let mut book = shared.book.lock().unwrap();
        for order_id in order_ids {
            book.cancel_order(order_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_joins_pruner_promptly() {
        // With the system clock the next close is up to a day away; drop
        // must still return immediately via the shutdown signal.
        let book = Orderbook::new();
        drop(book);
    }

    #[test]
    fn test_facade_add_and_cancel() {
        use types::numeric::{Price, Quantity};
        use types::order::{OrderType, Side};

        let book = Orderbook::new();
        book.add_order(Order::new(
            OrderType::GoodTillCancel,
            OrderId::new(1),
            Side::Buy,
            Price::new(100),
            Quantity::new(10),
        ));
        assert_eq!(book.size(), 1);

        book.cancel_order(OrderId::new(1));
        assert_eq!(book.size(), 0);
    }
}
