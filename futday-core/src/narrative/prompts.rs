//! Prompt builders for the report's narrative sections.
//!
//! Every figure is rendered into the prompt verbatim, with "n/a" standing
//! in for unavailable fields, and each prompt repeats the same fidelity
//! constraints: use only the supplied figures, state "data missing" for
//! n/a fields, never invent volumes, positions, or prices.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::domain::{MarketSummary, SessionStats};
use crate::indicators::IndicatorSet;
use crate::news::{IntelReport, NewsItem};

const FIDELITY_RULES: &str = "\
Constraints:
- Use ONLY the figures supplied above; quote them exactly, without rounding or adjustment.
- Where a figure reads \"n/a\", state that the data is missing; do not estimate or invent it.
- Do not introduce volumes, open interest, positions, or any number not supplied.
- Write plain prose without headings or preamble.";

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

fn push_session(out: &mut String, label: &str, stats: Option<&SessionStats>) {
    match stats {
        Some(s) => {
            let _ = writeln!(
                out,
                "{label}: open {:.2}, high {:.2}, low {:.2}, close {:.2}, \
                 change {:+.2} ({:+.2}%)",
                s.open, s.high, s.low, s.close, s.change, s.change_pct
            );
        }
        None => {
            let _ = writeln!(out, "{label}: n/a");
        }
    }
}

/// Prompt for the market-review paragraph (day session, night session,
/// intraday shape, key levels).
pub fn market_description_prompt(
    commodity: &str,
    date: NaiveDate,
    summary: &MarketSummary,
) -> String {
    let mut data = String::new();
    push_session(&mut data, "Day session", summary.day.as_ref());
    push_session(&mut data, "Night session", summary.night.as_ref());

    format!(
        "You are a professional futures analyst writing the market review for the \
         {commodity} futures daily report dated {date}.\n\n\
         Market data for {date}:\n{data}\n{FIDELITY_RULES}\n\n\
         Write one paragraph of 120-180 words covering: the day-session path from \
         open through the high/low to the close; the night session (or its absence) \
         against the day session; the candle shape implied by the figures; support \
         and resistance at the supplied high and low; and the balance of buying and \
         selling pressure implied by the change."
    )
}

/// Prompt for the numbered news digest with [n] reference markers.
pub fn news_digest_prompt(commodity: &str, date: NaiveDate, news: &[NewsItem]) -> String {
    let mut listing = String::new();
    for (i, item) in news.iter().enumerate() {
        let n = i + 1;
        let body = if item.summary.is_empty() {
            &item.title
        } else {
            &item.summary
        };
        let _ = writeln!(listing, "[{n}] {} — {body}", item.title);
    }

    format!(
        "You are compiling the market news section of the {commodity} futures daily \
         report dated {date}.\n\nSource items:\n{listing}\n{FIDELITY_RULES}\n\n\
         Rewrite the items as a numbered list of concise news notes, one per item, \
         keeping the [n] marker of each source item at the end of its note. Merge \
         items that report the same fact and keep both markers. Do not add items."
    )
}

/// Prompt for the main-view section: the eight analysis dimensions,
/// grounded in the indicator snapshot, session summary, news, and intel.
pub fn main_view_prompt(
    commodity: &str,
    date: NaiveDate,
    summary: &MarketSummary,
    indicators: &IndicatorSet,
    news: &[NewsItem],
    intel: &IntelReport,
) -> String {
    let mut data = String::new();
    push_session(&mut data, "Day session", summary.day.as_ref());
    push_session(&mut data, "Night session", summary.night.as_ref());

    let _ = writeln!(
        data,
        "Technicals: price {}, MA5 {}, MA10 {}, MA20 {}, MACD {} / signal {} / hist {}, \
         RSI14 {}, Bollinger {} to {}, position {}",
        fmt_opt(indicators.current_price),
        fmt_opt(indicators.ma5),
        fmt_opt(indicators.ma10),
        fmt_opt(indicators.ma20),
        fmt_opt(indicators.macd),
        fmt_opt(indicators.macd_signal),
        fmt_opt(indicators.macd_hist),
        fmt_opt(indicators.rsi14),
        fmt_opt(indicators.bollinger_lower),
        fmt_opt(indicators.bollinger_upper),
        indicators
            .price_position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "n/a".to_string()),
    );

    if !news.is_empty() {
        let _ = writeln!(data, "\nHeadlines:");
        for item in news.iter().take(10) {
            let _ = writeln!(data, "- {}", item.title);
        }
    }
    if !intel.is_empty() {
        let _ = writeln!(data, "\nMarket intelligence:");
        for (category, items) in &intel.sections {
            for item in items.iter().take(2) {
                let _ = writeln!(data, "- [{}] {}", category.label(), item.title);
            }
        }
    }

    format!(
        "You are a professional futures analyst writing the main view of the \
         {commodity} futures daily report dated {date}.\n\n\
         Available data:\n{data}\n{FIDELITY_RULES}\n\n\
         Write 250-400 words structured across these dimensions, skipping any \
         dimension with no supporting data above and saying so: \
         1) technicals (moving averages, MACD, RSI, Bollinger position); \
         2) fundamentals (inventory, warehouse receipts, supply/demand, basis); \
         3) positioning and flows; 4) industry chain; 5) policy; \
         6) imports/exports; 7) market sentiment from the headlines; \
         8) key risks. End with a one-sentence outlook consistent with the data."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::make_item;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    fn summary_day_only() -> MarketSummary {
        MarketSummary {
            date: date(),
            day: Some(SessionStats {
                open: 68_000.0,
                close: 68_340.0,
                high: 68_500.0,
                low: 67_900.0,
                change: 340.0,
                change_pct: 0.5,
            }),
            night: None,
        }
    }

    #[test]
    fn market_prompt_carries_figures_and_na() {
        let prompt = market_description_prompt("copper", date(), &summary_day_only());
        assert!(prompt.contains("open 68000.00"));
        assert!(prompt.contains("change +340.00"));
        assert!(prompt.contains("Night session: n/a"));
        assert!(prompt.contains("data is missing"));
    }

    #[test]
    fn news_prompt_numbers_items() {
        let news = vec![
            make_item("Copper rallies", "inventory draw"),
            make_item("Spreads narrow", ""),
        ];
        let prompt = news_digest_prompt("copper", date(), &news);
        assert!(prompt.contains("[1] Copper rallies — inventory draw"));
        // Items with no summary fall back to the title.
        assert!(prompt.contains("[2] Spreads narrow — Spreads narrow"));
    }

    #[test]
    fn main_view_prompt_renders_unavailable_indicators_as_na() {
        let prompt = main_view_prompt(
            "copper",
            date(),
            &summary_day_only(),
            &IndicatorSet::default(),
            &[],
            &IntelReport::default(),
        );
        assert!(prompt.contains("MA5 n/a"));
        assert!(prompt.contains("position n/a"));
        assert!(!prompt.contains("Headlines:"));
    }
}
