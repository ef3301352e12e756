//! Multi-source news aggregation.
//!
//! Sources return candidate items for a free-text query; aggregation
//! scores them for relevance, drops off-topic items, dedups by headline,
//! ranks by score, and caps the list. A failed source degrades the result
//! and is logged; it never fails the report.

pub mod eastmoney;
pub mod intel;
pub mod serper;

pub use eastmoney::EastmoneySearch;
pub use intel::{gather_intel, IntelCategory, IntelReport};
pub use serper::SerperSearch;

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Structured error types for news search operations.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("news error: {0}")]
    Other(String),
}

/// One candidate news item as returned by a source.
///
/// `relevance` is assigned by the aggregator, not the source.
#[derive(Debug, Clone, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    pub published: NaiveDate,
    pub relevance: f64,
}

/// Trait for news search backends.
pub trait NewsSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Run a free-text query and return candidate items.
    fn search(&self, query: &str) -> Result<Vec<NewsItem>, NewsError>;
}

/// Default cap on the aggregated list.
pub const MAX_AGGREGATED: usize = 25;

const MARKET_KEYWORDS: &[&str] = &[
    "futures",
    "price",
    "market",
    "contract",
    "trading",
    "rally",
    "selloff",
    "inventory",
    "spot",
];

const TIMELY_KEYWORDS: &[&str] = &["today", "yesterday", "latest", "overnight", "session"];

/// The standard per-commodity news query.
pub fn commodity_query(commodity: &str, date: NaiveDate) -> String {
    format!("{commodity} futures price {date}")
}

/// Relevance score in [0, 10]: +5 for a commodity-name hit, +1 per market
/// keyword, +0.5 per timeliness keyword.
pub fn relevance_score(text: &str, commodity: &str) -> f64 {
    let text = text.to_lowercase();
    let mut score: f64 = 0.0;

    if text.contains(&commodity.to_lowercase()) {
        score += 5.0;
    }
    for word in MARKET_KEYWORDS {
        if text.contains(word) {
            score += 1.0;
        }
    }
    for word in TIMELY_KEYWORDS {
        if text.contains(word) {
            score += 0.5;
        }
    }

    score.min(10.0)
}

/// An item is relevant when it mentions the commodity and at least one
/// market keyword.
pub fn is_relevant(title: &str, summary: &str, commodity: &str) -> bool {
    let text = format!("{title} {summary}").to_lowercase();
    text.contains(&commodity.to_lowercase()) && MARKET_KEYWORDS.iter().any(|w| text.contains(w))
}

/// Query every source, score, filter, dedup by headline (first occurrence
/// wins), rank by relevance descending, and cap.
pub fn aggregate(
    sources: &[Box<dyn NewsSource>],
    commodity: &str,
    date: NaiveDate,
    cap: usize,
) -> Vec<NewsItem> {
    let query = commodity_query(commodity, date);
    let mut items: Vec<NewsItem> = Vec::new();

    for source in sources {
        match source.search(&query) {
            Ok(batch) => items.extend(batch),
            Err(e) => warn!(source = source.name(), error = %e, "news source failed; skipping"),
        }
    }

    for item in &mut items {
        item.relevance = relevance_score(&format!("{} {}", item.title, item.summary), commodity);
    }
    items.retain(|n| is_relevant(&n.title, &n.summary, commodity));

    let mut seen = HashSet::new();
    items.retain(|n| seen.insert(n.title.clone()));

    // Stable sort keeps source order among equal scores.
    items.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    });
    items.truncate(cap);
    items
}

#[cfg(test)]
pub(crate) fn make_item(title: &str, summary: &str) -> NewsItem {
    NewsItem {
        title: title.to_string(),
        summary: summary.to_string(),
        url: format!("https://example.com/{}", title.len()),
        source: "stub".to_string(),
        published: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        relevance: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSource {
        name: &'static str,
        items: Vec<NewsItem>,
        fail: bool,
    }

    impl NewsSource for StubSource {
        fn name(&self) -> &str {
            self.name
        }

        fn search(&self, _query: &str) -> Result<Vec<NewsItem>, NewsError> {
            if self.fail {
                Err(NewsError::Other("stub outage".into()))
            } else {
                Ok(self.items.clone())
            }
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    #[test]
    fn score_rewards_commodity_and_keywords() {
        let with_commodity = relevance_score("copper futures price rally today", "copper");
        let without = relevance_score("futures price rally today", "copper");
        assert!(with_commodity > without);
        assert!(with_commodity <= 10.0);
    }

    #[test]
    fn score_is_capped_at_ten() {
        let text = "copper futures price market contract trading rally selloff \
                    inventory spot today yesterday latest overnight session";
        assert_eq!(relevance_score(text, "copper"), 10.0);
    }

    #[test]
    fn relevance_filter_needs_commodity_and_market_keyword() {
        assert!(is_relevant("Copper futures climb", "", "copper"));
        assert!(!is_relevant("Copper wire manufacturing", "", "copper"));
        assert!(!is_relevant("Futures rally broadly", "", "copper"));
    }

    #[test]
    fn aggregate_dedups_by_headline_and_ranks() {
        let strong = make_item("Copper futures rally on inventory draw", "copper spot tightness");
        let weak = make_item("Copper market steady", "quiet copper trading");
        let dup = make_item("Copper market steady", "different summary, same headline");
        let sources: Vec<Box<dyn NewsSource>> = vec![
            Box::new(StubSource {
                name: "a",
                items: vec![weak.clone(), strong.clone()],
                fail: false,
            }),
            Box::new(StubSource {
                name: "b",
                items: vec![dup],
                fail: false,
            }),
        ];

        let items = aggregate(&sources, "copper", date(), MAX_AGGREGATED);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, strong.title);
        assert!(items[0].relevance >= items[1].relevance);
        // The duplicate headline kept the first occurrence's summary.
        assert_eq!(items[1].summary, weak.summary);
    }

    #[test]
    fn aggregate_skips_failed_sources() {
        let ok = make_item("Copper futures slip", "copper price pressure");
        let sources: Vec<Box<dyn NewsSource>> = vec![
            Box::new(StubSource {
                name: "down",
                items: vec![],
                fail: true,
            }),
            Box::new(StubSource {
                name: "up",
                items: vec![ok],
                fail: false,
            }),
        ];

        let items = aggregate(&sources, "copper", date(), MAX_AGGREGATED);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn aggregate_respects_cap() {
        let items: Vec<NewsItem> = (0..30)
            .map(|i| make_item(&format!("Copper futures note {i}"), "copper price"))
            .collect();
        let sources: Vec<Box<dyn NewsSource>> = vec![Box::new(StubSource {
            name: "bulk",
            items,
            fail: false,
        })];

        let out = aggregate(&sources, "copper", date(), 5);
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn aggregate_drops_irrelevant_items() {
        let sources: Vec<Box<dyn NewsSource>> = vec![Box::new(StubSource {
            name: "mixed",
            items: vec![
                make_item("Copper futures rebound", "copper price"),
                make_item("Celebrity gossip roundup", "no markets here"),
            ],
            fail: false,
        })];

        let items = aggregate(&sources, "copper", date(), MAX_AGGREGATED);
        assert_eq!(items.len(), 1);
    }
}
