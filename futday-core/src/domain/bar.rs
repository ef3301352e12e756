//! MinuteBar — the fundamental market data unit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLC bar for a single symbol at minute resolution.
///
/// Timestamps are exchange-local wall-clock times; commodity exchanges run
/// a day session and (for most products) a night session within one
/// 24-hour cycle, so a calendar date alone does not identify a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinuteBar {
    pub ts: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl MinuteBar {
    /// Returns true if any price field is NaN or infinite (void bar).
    pub fn is_void(&self) -> bool {
        !self.open.is_finite()
            || !self.high.is_finite()
            || !self.low.is_finite()
            || !self.close.is_finite()
    }

    /// Basic OHLC sanity check: finite positive prices and `high >= low`.
    ///
    /// Open or close outside the high/low range is tolerated; upstream
    /// minute feeds occasionally emit such bars and their prices are still
    /// usable.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.open > 0.0
            && self.high > 0.0
            && self.low > 0.0
            && self.close > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_bar() -> MinuteBar {
        MinuteBar {
            ts: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(9, 1, 0)
                .unwrap(),
            open: 68_000.0,
            high: 68_120.0,
            low: 67_950.0,
            close: 68_080.0,
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_void() {
        let mut bar = sample_bar();
        bar.close = f64::NAN;
        assert!(bar.is_void());
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_detects_inverted_high_low() {
        let mut bar = sample_bar();
        bar.high = bar.low - 1.0;
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_tolerates_close_above_high() {
        // Feeds sometimes emit close slightly outside [low, high]; the bar
        // still passes the sanity check.
        let mut bar = sample_bar();
        bar.close = bar.high + 5.0;
        assert!(bar.is_sane());
    }

    #[test]
    fn bar_rejects_non_positive_price() {
        let mut bar = sample_bar();
        bar.open = 0.0;
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: MinuteBar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
