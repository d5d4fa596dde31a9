//! Day-order pruner behavior around the market close

use std::time::{Duration, Instant};

use chrono::{DateTime, Local, TimeDelta};
use matching_engine::{Clock, EngineConfig, Orderbook};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};

/// Clock pinned to a single instant, so the close boundary is wherever the
/// test puts it
#[derive(Debug, Clone, Copy)]
struct FixedClock(DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

fn wait_until<F: Fn() -> bool>(timeout: Duration, condition: F) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    condition()
}

#[test]
fn good_for_day_orders_are_pruned_at_the_close() {
    let now = Local::now();
    let config = EngineConfig {
        market_close: (now + TimeDelta::milliseconds(200)).time(),
        prune_slack: Duration::from_millis(50),
    };
    let book = Orderbook::with_clock(config, FixedClock(now));

    book.add_order(Order::new(
        OrderType::GoodForDay,
        OrderId::new(1),
        Side::Buy,
        Price::new(100),
        Quantity::new(10),
    ));
    book.add_order(Order::new(
        OrderType::GoodForDay,
        OrderId::new(2),
        Side::Sell,
        Price::new(105),
        Quantity::new(5),
    ));
    book.add_order(Order::new(
        OrderType::GoodTillCancel,
        OrderId::new(3),
        Side::Buy,
        Price::new(99),
        Quantity::new(7),
    ));
    assert_eq!(book.size(), 3);

    // Both day orders go in one bulk cancellation; the GTC order survives.
    assert!(
        wait_until(Duration::from_secs(5), || book.size() == 1),
        "day orders were not pruned"
    );
    assert_eq!(
        book.best_bid().map(|level| level.price),
        Some(Price::new(99))
    );
    assert_eq!(book.best_ask(), None);
}

#[test]
fn prune_does_not_fire_before_the_close() {
    let now = Local::now();
    let config = EngineConfig {
        market_close: (now + TimeDelta::hours(2)).time(),
        prune_slack: Duration::from_millis(50),
    };
    let book = Orderbook::with_clock(config, FixedClock(now));

    book.add_order(Order::new(
        OrderType::GoodForDay,
        OrderId::new(1),
        Side::Buy,
        Price::new(100),
        Quantity::new(10),
    ));

    std::thread::sleep(Duration::from_millis(300));
    assert_eq!(book.size(), 1);
}

#[test]
fn shutdown_interrupts_the_close_wait() {
    let now = Local::now();
    let config = EngineConfig {
        market_close: (now + TimeDelta::hours(2)).time(),
        prune_slack: Duration::from_millis(50),
    };
    let book = Orderbook::with_clock(config, FixedClock(now));

    let started = Instant::now();
    drop(book);

    // The pruner would otherwise sleep two hours; the shutdown signal must
    // wake it immediately.
    assert!(started.elapsed() < Duration::from_secs(2));
}
