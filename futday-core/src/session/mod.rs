//! Trading-day resolution and session windowing.
//!
//! Raw minute feeds are not calendar-aware: weekends and holidays show up
//! as empty windows, not as errors. Resolution walks backward from the
//! nominal report date until a candidate whose day-session window contains
//! bars appears, capped at `max_lookback_days` so an invalid or delisted
//! symbol cannot trigger an unbounded scan.
//!
//! Session windows are fixed wall-clock ranges, inclusive at both ends:
//! day `[09:00, 15:00]` on the resolved date, night `[21:00, 03:00 next
//! day]`. The night window is wider than any single commodity's schedule;
//! products close their night session at different times, and taking
//! whatever bars fall inside the widest plausible window avoids modeling
//! per-commodity calendars.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::domain::{MarketSummary, MinuteBar, PriceSeries, SessionStats};

/// Default cap on the backward search.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No candidate date within the lookback produced day-session bars.
    /// Terminal for the report request: indicates a data or symbol problem,
    /// not a short series.
    #[error("no trading day with day-session data within {lookback_days} days before {nominal}")]
    TradingDayNotFound {
        nominal: NaiveDate,
        lookback_days: u32,
    },
}

/// Outcome of the backward search: the most recent date with day-session
/// data, annotated with how far back the search went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTradingDay {
    pub date: NaiveDate,
    /// Calendar days between the nominal date and the resolved date
    /// (1 = the day before nominal).
    pub days_back: u32,
}

fn hms(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid wall-clock time")
}

/// Day-session window bounds for a date: `[09:00:00, 15:00:00]`.
pub fn day_window(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    (date.and_time(hms(9, 0)), date.and_time(hms(15, 0)))
}

/// Night-session window bounds for a date: `[21:00:00, 03:00:00 +1d]`.
pub fn night_window(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    (
        date.and_time(hms(21, 0)),
        (date + Duration::days(1)).and_time(hms(3, 0)),
    )
}

/// Day-session bars for a date.
pub fn day_session<'a>(series: &'a PriceSeries, date: NaiveDate) -> &'a [MinuteBar] {
    let (start, end) = day_window(date);
    series.between(start, end)
}

/// Night-session bars for a date.
pub fn night_session<'a>(series: &'a PriceSeries, date: NaiveDate) -> &'a [MinuteBar] {
    let (start, end) = night_window(date);
    series.between(start, end)
}

/// Walk backward from the nominal date to the most recent date whose
/// day-session window is non-empty.
///
/// Candidates are `nominal - 1 .. nominal - max_lookback_days`; the nominal
/// date itself is never a candidate (reports describe a completed session).
/// The series is fetched once by the caller and filtered per candidate here,
/// so resolution needs no network access.
pub fn resolve_trading_day(
    series: &PriceSeries,
    nominal: NaiveDate,
    max_lookback_days: u32,
) -> Result<ResolvedTradingDay, SessionError> {
    for offset in 1..=max_lookback_days {
        let candidate = nominal - Duration::days(i64::from(offset));
        if !day_session(series, candidate).is_empty() {
            return Ok(ResolvedTradingDay {
                date: candidate,
                days_back: offset,
            });
        }
    }
    Err(SessionError::TradingDayNotFound {
        nominal,
        lookback_days: max_lookback_days,
    })
}

/// Partition the series into day and night sessions for a resolved date
/// and reduce each to its summary. An empty session reads as unavailable;
/// an empty night session in particular is a valid "no night trading"
/// state, never an error.
pub fn partition_sessions(series: &PriceSeries, date: NaiveDate) -> MarketSummary {
    MarketSummary {
        date,
        day: SessionStats::from_window(day_session(series, date)),
        night: SessionStats::from_window(night_session(series, date)),
    }
}
