//! Markdown document generator.
//!
//! Renders a `DailyReport` into the standard daily-report layout: title
//! block, market review, technical indicators, main view, market
//! intelligence, numbered news with a references appendix, and the
//! disclaimer. Unavailable data renders as "n/a" or an explicit
//! "unavailable" line; the document never fills gaps with invented
//! figures.

use std::fmt::Write;

use futday_core::domain::SessionStats;
use futday_core::indicators::IndicatorSet;

use crate::orchestrator::DailyReport;

pub struct MarkdownReportGenerator;

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

fn session_row(label: &str, stats: Option<&SessionStats>) -> String {
    match stats {
        Some(s) => format!(
            "| {label} | {:.2} | {:.2} | {:.2} | {:.2} | {:+.2} | {:+.2}% |\n",
            s.open, s.high, s.low, s.close, s.change, s.change_pct
        ),
        None => format!("| {label} | n/a | n/a | n/a | n/a | n/a | n/a |\n"),
    }
}

impl MarkdownReportGenerator {
    pub fn generate(&self, report: &DailyReport) -> String {
        let mut doc = format!(
            "# Daily Futures Report\n\n\
             **{} ({})** | {}\n",
            report.request.commodity, report.request.symbol, report.resolved.date
        );
        if report.resolved.days_back > 1 {
            let _ = writeln!(
                doc,
                "\n> Requested {}; the last trading day with data is {} ({} calendar days back).",
                report.request.date, report.resolved.date, report.resolved.days_back
            );
        }

        // Market review
        doc.push_str("\n## Market Review\n\n");
        doc.push_str("| Session | Open | High | Low | Close | Change | Change % |\n");
        doc.push_str("|---------|------|------|-----|-------|--------|----------|\n");
        doc.push_str(&session_row("Day", report.summary.day.as_ref()));
        doc.push_str(&session_row("Night", report.summary.night.as_ref()));
        if report.summary.night.is_none() {
            doc.push_str("\nNight session unavailable for this trading day.\n");
        }
        let _ = writeln!(doc, "\n{}", report.narrative.market_review);

        // Technical indicators
        doc.push_str("\n## Technical Indicators\n\n");
        doc.push_str(&Self::indicator_table(&report.indicators));

        // Main view
        doc.push_str("\n## Main View\n\n");
        match &report.narrative.main_view {
            Some(view) => {
                let _ = writeln!(doc, "{view}");
            }
            None => doc.push_str("Not generated for this report.\n"),
        }

        // Market intelligence
        if !report.intel.is_empty() {
            doc.push_str("\n## Market Intelligence\n");
            for (category, items) in &report.intel.sections {
                let _ = writeln!(doc, "\n### {}\n", category.label());
                for item in items {
                    let _ = writeln!(doc, "- {} ({})", item.title, item.source);
                }
            }
        }

        // News
        doc.push_str("\n## Market News\n\n");
        if report.news.is_empty() {
            doc.push_str("No relevant news found.\n");
        } else if let Some(digest) = &report.narrative.news_digest {
            let _ = writeln!(doc, "{digest}");
        } else {
            for (i, item) in report.news.iter().enumerate() {
                let n = i + 1;
                let body = if item.summary.is_empty() {
                    &item.title
                } else {
                    &item.summary
                };
                let _ = writeln!(doc, "{n}. {body} [{n}]");
            }
        }

        // References appendix
        if !report.news.is_empty() {
            doc.push_str("\n## References\n\n");
            for (i, item) in report.news.iter().enumerate() {
                let _ = writeln!(
                    doc,
                    "[{}] {} — {} | {}\n    {}",
                    i + 1,
                    item.title,
                    item.source,
                    item.published,
                    item.url
                );
            }
        }

        // Disclaimer
        doc.push_str(
            "\n---\n\n\
             *This report is compiled from public information and market data for \
             reference only. Futures trading carries risk; this report is not \
             investment advice, and readers remain responsible for their own \
             decisions.*\n",
        );

        doc
    }

    fn indicator_table(set: &IndicatorSet) -> String {
        if set.is_unavailable() {
            return "Insufficient history to compute indicators for this session.\n".to_string();
        }
        let mut table = String::from("| Indicator | Value |\n|-----------|-------|\n");
        let rows = [
            ("Price", fmt_opt(set.current_price)),
            ("MA5", fmt_opt(set.ma5)),
            ("MA10", fmt_opt(set.ma10)),
            ("MA20", fmt_opt(set.ma20)),
            ("MACD", fmt_opt(set.macd)),
            ("MACD signal", fmt_opt(set.macd_signal)),
            ("MACD histogram", fmt_opt(set.macd_hist)),
            ("RSI(14)", fmt_opt(set.rsi14)),
            ("Bollinger upper", fmt_opt(set.bollinger_upper)),
            ("Bollinger lower", fmt_opt(set.bollinger_lower)),
        ];
        for (name, value) in rows {
            let _ = writeln!(table, "| {name} | {value} |");
        }
        if let Some(position) = set.price_position {
            let _ = writeln!(table, "\nPrice is {position}.");
        }
        table
    }
}
