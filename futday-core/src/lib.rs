//! Futday Core — domain types, indicator engine, session resolution, and
//! the external-collaborator clients (price feed, news search, narrative
//! generation) for the daily futures report pipeline.
//!
//! The computational heart of the crate:
//! - Domain types (minute bars, validated price series, session summaries)
//! - Indicator engine (trailing means, MACD triad, RSI, Bollinger bands)
//! - Trading-day resolution with bounded backward search, and day/night
//!   session partitioning
//!
//! Everything in `indicators` and `session` is pure computation over
//! already-fetched data: no configuration, no I/O, deterministic. The
//! network-facing collaborators live behind traits (`MinuteFeed`,
//! `NewsSource`, `TextGenerator`) so the pipeline is testable with
//! in-memory stubs.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod narrative;
pub mod news;
pub mod session;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types that cross the report-pipeline boundary
    /// are Send + Sync, so independent report requests can run on separate
    /// threads without a retrofit.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::MinuteBar>();
        require_sync::<domain::MinuteBar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::MarketSummary>();
        require_sync::<domain::MarketSummary>();
        require_send::<indicators::IndicatorSet>();
        require_sync::<indicators::IndicatorSet>();
        require_send::<session::ResolvedTradingDay>();
        require_sync::<session::ResolvedTradingDay>();
        require_send::<news::NewsItem>();
        require_sync::<news::NewsItem>();
    }
}
