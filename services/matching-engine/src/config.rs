//! Engine configuration

use chrono::NaiveTime;
use std::time::Duration;

/// Configuration for the engine's day-order pruner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Local wall-clock time of the market close
    pub market_close: NaiveTime,
    /// Slack added to the close wait so the pruner does not re-wake
    /// repeatedly right at the boundary
    pub prune_slack: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            market_close: NaiveTime::from_hms_opt(16, 0, 0).expect("16:00:00 is a valid time"),
            prune_slack: Duration::from_millis(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_close_is_four_pm() {
        let config = EngineConfig::default();
        assert_eq!(config.market_close, NaiveTime::from_hms_opt(16, 0, 0).unwrap());
        assert_eq!(config.prune_slack, Duration::from_millis(100));
    }
}
