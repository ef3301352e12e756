//! Session summaries derived from partitioned windows.

use chrono::NaiveDate;
use serde::Serialize;

use super::bar::MinuteBar;

/// OHLC summary of one trading session.
///
/// open = first bar's open, close = last bar's close, high/low = window
/// extremes, change = close - open, change_pct = change / open * 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionStats {
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub change: f64,
    pub change_pct: f64,
}

impl SessionStats {
    /// Reduce a session window to its summary. Empty window → `None`
    /// (session unavailable, a valid state rather than an error).
    pub fn from_window(bars: &[MinuteBar]) -> Option<Self> {
        let first = bars.first()?;
        let last = bars.last()?;
        let open = first.open;
        let close = last.close;
        let high = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let low = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
        let change = close - open;
        let change_pct = change / open * 100.0;
        Some(Self {
            open,
            close,
            high,
            low,
            change,
            change_pct,
        })
    }
}

/// Day- and night-session summaries for one resolved trading date.
///
/// Created once per report request and consumed immediately by narrative
/// generation and the document writer; never cached across requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketSummary {
    pub date: NaiveDate,
    pub day: Option<SessionStats>,
    pub night: Option<SessionStats>,
}
