//! Black-box session resolution over realistic multi-day feeds.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use futday_core::domain::{MinuteBar, PriceSeries};
use futday_core::session::{
    day_window, night_window, partition_sessions, resolve_trading_day, SessionError,
    DEFAULT_LOOKBACK_DAYS,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fill(start: NaiveDateTime, end: NaiveDateTime, base: f64) -> Vec<MinuteBar> {
    let mut bars = Vec::new();
    let mut ts = start;
    while ts <= end {
        let elapsed = (ts - start).num_minutes() as f64;
        let close = base + elapsed / 10.0;
        bars.push(MinuteBar {
            ts,
            open: close - 0.5,
            high: close + 2.0,
            low: close - 2.0,
            close,
        });
        ts += Duration::minutes(15);
    }
    bars
}

/// A full trading day: day session plus the night session that follows it.
fn full_day(d: NaiveDate, base: f64) -> Vec<MinuteBar> {
    let (ds, de) = day_window(d);
    let (ns, ne) = night_window(d);
    let mut bars = fill(ds, de, base);
    bars.extend(fill(ns, ne, base + 50.0));
    bars
}

#[test]
fn monday_report_resolves_to_friday_across_weekend() {
    // 2024-01-05 is a Friday, 2024-01-08 the following Monday.
    let friday = date(2024, 1, 5);
    let monday = date(2024, 1, 8);
    let mut bars = full_day(date(2024, 1, 4), 68_000.0);
    bars.extend(full_day(friday, 68_100.0));
    let series = PriceSeries::from_bars("CU2601", bars);

    let resolved = resolve_trading_day(&series, monday, DEFAULT_LOOKBACK_DAYS).unwrap();
    assert_eq!(resolved.date, friday);
    assert_eq!(resolved.days_back, 3);
}

#[test]
fn unknown_symbol_exhausts_lookback() {
    let series = PriceSeries::from_bars("XX0000", Vec::new());
    let err = resolve_trading_day(&series, date(2024, 1, 8), DEFAULT_LOOKBACK_DAYS).unwrap_err();
    assert!(matches!(err, SessionError::TradingDayNotFound { .. }));
    // The error message distinguishes a data/symbol problem from a short
    // series.
    assert!(err.to_string().contains("no trading day"));
}

#[test]
fn day_only_feed_reports_night_unavailable() {
    let friday = date(2024, 1, 5);
    let (ds, de) = day_window(friday);
    let series = PriceSeries::from_bars("CU2601", fill(ds, de, 68_000.0));

    let resolved = resolve_trading_day(&series, date(2024, 1, 8), DEFAULT_LOOKBACK_DAYS).unwrap();
    let summary = partition_sessions(&series, resolved.date);

    let day = summary.day.expect("day session populated");
    assert!(summary.night.is_none());
    assert_eq!(day.open, 67_999.5);
    // Day session spans 360 minutes → last close = base + 36.0.
    assert_eq!(day.close, 68_036.0);
    assert_eq!(day.high, 68_038.0);
    assert_eq!(day.low, 67_998.0);
    assert!((day.change - 36.5).abs() < 1e-9);
}

#[test]
fn summary_change_fields_are_consistent() {
    let friday = date(2024, 1, 5);
    let series = PriceSeries::from_bars("CU2601", full_day(friday, 68_000.0));
    let summary = partition_sessions(&series, friday);

    for stats in [summary.day.unwrap(), summary.night.unwrap()] {
        assert!((stats.change - (stats.close - stats.open)).abs() < 1e-9);
        assert!((stats.change_pct - stats.change / stats.open * 100.0).abs() < 1e-9);
        assert!(stats.high >= stats.low);
    }
}

#[test]
fn night_bars_after_midnight_count_toward_previous_date() {
    let friday = date(2024, 1, 5);
    let saturday_early = date(2024, 1, 6).and_hms_opt(1, 30, 0).unwrap();
    let mut bars = {
        let (ds, de) = day_window(friday);
        fill(ds, de, 68_000.0)
    };
    bars.push(MinuteBar {
        ts: saturday_early,
        open: 68_100.0,
        high: 68_130.0,
        low: 68_090.0,
        close: 68_120.0,
    });
    let series = PriceSeries::from_bars("CU2601", bars);

    let summary = partition_sessions(&series, friday);
    let night = summary.night.expect("after-midnight bar belongs to Friday's night session");
    assert_eq!(night.close, 68_120.0);
}

#[test]
fn lookback_is_bounded() {
    // Data nine days old is beyond the seven-day search.
    let nominal = date(2024, 1, 15);
    let series = PriceSeries::from_bars("CU2601", full_day(date(2024, 1, 6), 68_000.0));
    assert!(resolve_trading_day(&series, nominal, 7).is_err());

    // A wider explicit cap finds it.
    let resolved = resolve_trading_day(&series, nominal, 10).unwrap();
    assert_eq!(resolved.days_back, 9);
}
