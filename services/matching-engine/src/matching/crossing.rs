//! Crossing detection logic
//!
//! Determines when prices are marketable against each other.

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and an ask can match at the given prices
///
/// The book is crossed, and matching must run, whenever the best bid is at
/// or above the best ask.
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if a limit on `side` is marketable against the opposing best price
///
/// A buy crosses when its limit is at or above the best ask; a sell crosses
/// when its limit is at or below the best bid.
pub fn limit_crosses(side: Side, limit: Price, opposing_best: Price) -> bool {
    match side {
        Side::Buy => limit >= opposing_best,
        Side::Sell => limit <= opposing_best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_match_crossing() {
        assert!(can_match(Price::new(101), Price::new(100)));
    }

    #[test]
    fn test_can_match_exact() {
        assert!(can_match(Price::new(100), Price::new(100)));
    }

    #[test]
    fn test_can_match_no_cross() {
        assert!(!can_match(Price::new(99), Price::new(100)));
    }

    #[test]
    fn test_limit_crosses_buy() {
        assert!(limit_crosses(Side::Buy, Price::new(101), Price::new(100)));
        assert!(limit_crosses(Side::Buy, Price::new(100), Price::new(100)));
        assert!(!limit_crosses(Side::Buy, Price::new(99), Price::new(100)));
    }

    #[test]
    fn test_limit_crosses_sell() {
        assert!(limit_crosses(Side::Sell, Price::new(99), Price::new(100)));
        assert!(limit_crosses(Side::Sell, Price::new(100), Price::new(100)));
        assert!(!limit_crosses(Side::Sell, Price::new(101), Price::new(100)));
    }
}
