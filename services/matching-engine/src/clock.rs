//! Injectable wall-clock time source
//!
//! The day-order pruner needs local calendar time to find the next market
//! close. Production uses [`SystemClock`]; tests inject a fixed clock to
//! exercise the close boundary deterministically.

use chrono::{DateTime, Local, NaiveTime, TimeDelta};
use std::time::Duration;

/// Source of current local wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Duration from `now` until the next market close
///
/// Today's close if it has not yet passed, otherwise tomorrow's. A close
/// falling into a DST gap resolves to an hour from now, after which the
/// wait is recomputed.
pub(crate) fn time_until_close(now: DateTime<Local>, close: NaiveTime) -> Duration {
    let mut date = now.date_naive();
    if now.time() >= close {
        date = date.succ_opt().expect("calendar overflow");
    }
    let next = date
        .and_time(close)
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or(now + TimeDelta::hours(1));

    (next - now).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn close() -> NaiveTime {
        NaiveTime::from_hms_opt(16, 0, 0).unwrap()
    }

    // Mid-January sidesteps DST transitions in either hemisphere.
    fn local(hour: u32, min: u32, sec: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 17, hour, min, sec).unwrap()
    }

    #[test]
    fn test_before_close_waits_until_today() {
        let wait = time_until_close(local(10, 0, 0), close());
        assert_eq!(wait, Duration::from_secs(6 * 3600));
    }

    #[test]
    fn test_after_close_waits_until_tomorrow() {
        let wait = time_until_close(local(16, 30, 0), close());
        assert_eq!(wait, Duration::from_secs(23 * 3600 + 1800));
    }

    #[test]
    fn test_at_close_waits_a_full_day() {
        let wait = time_until_close(local(16, 0, 0), close());
        assert_eq!(wait, Duration::from_secs(24 * 3600));
    }

    #[test]
    fn test_just_before_close() {
        let wait = time_until_close(local(15, 59, 59), close());
        assert_eq!(wait, Duration::from_secs(1));
    }
}
