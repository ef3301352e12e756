//! PriceSeries — validated, time-ordered minute bars for one symbol.

use chrono::NaiveDateTime;

use super::bar::MinuteBar;

/// Chronologically ordered minute bars for a single symbol.
///
/// Construction canonicalizes the raw feed: bars are sorted by timestamp,
/// duplicate timestamps keep the first occurrence, and bars failing the
/// OHLC sanity check are dropped. A corrupt sample must not fail an entire
/// report, so canonicalization never errors; the number of dropped bars is
/// retained for diagnostics.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<MinuteBar>,
    dropped: usize,
}

impl PriceSeries {
    pub fn from_bars(symbol: impl Into<String>, mut bars: Vec<MinuteBar>) -> Self {
        let raw_len = bars.len();
        bars.retain(MinuteBar::is_sane);
        bars.sort_by_key(|b| b.ts);
        bars.dedup_by_key(|b| b.ts);
        let dropped = raw_len - bars.len();
        Self {
            symbol: symbol.into(),
            bars,
            dropped,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars dropped during canonicalization (malformed or duplicate).
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn bars(&self) -> &[MinuteBar] {
        &self.bars
    }

    pub fn last(&self) -> Option<&MinuteBar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Contiguous slice of bars with `start <= ts <= end` (both inclusive).
    pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime) -> &[MinuteBar] {
        let lo = self.bars.partition_point(|b| b.ts < start);
        let hi = self.bars.partition_point(|b| b.ts <= end);
        &self.bars[lo..hi]
    }
}
