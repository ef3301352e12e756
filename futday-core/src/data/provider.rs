//! Minute-feed trait and structured error types.
//!
//! The MinuteFeed trait abstracts over minute-bar sources so the report
//! pipeline can swap implementations and inject in-memory feeds in tests.

use thiserror::Error;

use crate::domain::MinuteBar;

/// Structured error types for feed operations.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("feed error: {0}")]
    Other(String),
}

/// Trait for minute-bar feed providers.
///
/// `fetch_minute_bars` returns the full available minute history for a
/// symbol; the feed is not date-scoped. Callers filter windows client-side
/// so one fetch serves the whole backward search. An empty vec means the
/// symbol has no data.
pub trait MinuteFeed: Send + Sync {
    /// Human-readable name of this feed.
    fn name(&self) -> &str;

    fn fetch_minute_bars(&self, symbol: &str) -> Result<Vec<MinuteBar>, FeedError>;
}
