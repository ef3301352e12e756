//! Report pipeline sequencing.
//!
//! One `run` call is one report request: fetch the minute feed once,
//! resolve the trading day, partition sessions, compute indicators over
//! the day-session window, gather news and intel, generate narrative.
//! Failure policy: feed errors and an unresolved trading day halt the
//! request; news, intel, and narrative failures degrade the report and are
//! logged.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use futday_core::data::{FeedError, MinuteFeed};
use futday_core::domain::{MarketSummary, PriceSeries};
use futday_core::indicators::{self, IndicatorSet};
use futday_core::narrative::{describe_sessions, prompts, TextGenerator};
use futday_core::news::{self, IntelReport, NewsItem, NewsSource};
use futday_core::session::{
    day_session, partition_sessions, resolve_trading_day, ResolvedTradingDay, SessionError,
};

use crate::config::ReportConfig;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("price feed failed: {0}")]
    Feed(#[from] FeedError),

    /// An unresolved trading day needs a different remedy (another date or
    /// symbol) than a feed outage, so it keeps its own variant.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// One user-initiated report request.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub symbol: String,
    pub commodity: String,
    /// Nominal report date; the resolved trading day may be earlier.
    pub date: NaiveDate,
}

/// Narrative sections of the report.
#[derive(Debug, Clone)]
pub struct Narrative {
    pub market_review: String,
    pub main_view: Option<String>,
    pub news_digest: Option<String>,
    /// False when every section fell back to mechanical text.
    pub ai_generated: bool,
}

/// Everything the document writer needs, assembled once per request.
#[derive(Debug)]
pub struct DailyReport {
    pub request: ReportRequest,
    pub resolved: ResolvedTradingDay,
    pub summary: MarketSummary,
    pub indicators: IndicatorSet,
    pub news: Vec<NewsItem>,
    pub intel: IntelReport,
    pub narrative: Narrative,
    pub dropped_bars: usize,
}

pub struct ReportOrchestrator {
    feed: Box<dyn MinuteFeed>,
    sources: Vec<Box<dyn NewsSource>>,
    generator: Option<Box<dyn TextGenerator>>,
    config: ReportConfig,
}

impl ReportOrchestrator {
    pub fn new(
        feed: Box<dyn MinuteFeed>,
        sources: Vec<Box<dyn NewsSource>>,
        generator: Option<Box<dyn TextGenerator>>,
        config: ReportConfig,
    ) -> Self {
        Self {
            feed,
            sources,
            generator,
            config,
        }
    }

    pub fn run(&self, request: ReportRequest) -> Result<DailyReport, ReportError> {
        info!(symbol = %request.symbol, feed = self.feed.name(), "fetching minute feed");
        let raw = self.feed.fetch_minute_bars(&request.symbol)?;
        let series = PriceSeries::from_bars(request.symbol.clone(), raw);
        if series.dropped() > 0 {
            warn!(
                symbol = %request.symbol,
                dropped = series.dropped(),
                "dropped malformed or duplicate bars during canonicalization"
            );
        }

        let resolved = resolve_trading_day(&series, request.date, self.config.lookback_days)?;
        if resolved.days_back > 1 {
            info!(
                nominal = %request.date,
                resolved = %resolved.date,
                days_back = resolved.days_back,
                "no trading on intervening days; using last trading day"
            );
        }

        let summary = partition_sessions(&series, resolved.date);
        if summary.night.is_none() {
            info!(date = %resolved.date, "night session unavailable");
        }

        let indicators = indicators::compute(day_session(&series, resolved.date));

        let news = if self.sources.is_empty() {
            Vec::new()
        } else {
            news::aggregate(
                &self.sources,
                &request.commodity,
                resolved.date,
                self.config.max_aggregated_news,
            )
        };

        let intel = match self.sources.first() {
            // The sweep multiplies request volume, so it runs against the
            // primary source only.
            Some(primary) => news::gather_intel(primary.as_ref(), &request.commodity, resolved.date),
            None => IntelReport::default(),
        };

        let narrative = self.build_narrative(&request, &resolved, &summary, &indicators, &news, &intel);

        Ok(DailyReport {
            request,
            resolved,
            summary,
            indicators,
            news,
            intel,
            narrative,
            dropped_bars: series.dropped(),
        })
    }

    fn generate(&self, section: &str, prompt: &str) -> Option<String> {
        let generator = self.generator.as_deref()?;
        match generator.generate(prompt) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(
                    generator = generator.name(),
                    section,
                    error = %e,
                    "narrative generation failed; falling back"
                );
                None
            }
        }
    }

    fn build_narrative(
        &self,
        request: &ReportRequest,
        resolved: &ResolvedTradingDay,
        summary: &MarketSummary,
        indicators: &IndicatorSet,
        news: &[NewsItem],
        intel: &IntelReport,
    ) -> Narrative {
        let mut ai_generated = false;

        let market_review = match self.generate(
            "market_review",
            &prompts::market_description_prompt(&request.commodity, resolved.date, summary),
        ) {
            Some(text) => {
                ai_generated = true;
                text
            }
            None => describe_sessions(&request.symbol, summary),
        };

        let main_view = self.generate(
            "main_view",
            &prompts::main_view_prompt(
                &request.commodity,
                resolved.date,
                summary,
                indicators,
                news,
                intel,
            ),
        );
        ai_generated |= main_view.is_some();

        let news_digest = if news.is_empty() {
            None
        } else {
            self.generate(
                "news_digest",
                &prompts::news_digest_prompt(&request.commodity, resolved.date, news),
            )
        };
        ai_generated |= news_digest.is_some();

        Narrative {
            market_review,
            main_view,
            news_digest,
            ai_generated,
        }
    }
}
