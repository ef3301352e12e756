//! Categorized market-intel sweep.
//!
//! Eight analysis dimensions beyond headline news: each runs a small,
//! capped set of keyword searches through one backend and keeps the top
//! results per query. A failing category degrades to empty rather than
//! failing the sweep.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use super::{NewsItem, NewsSource};

/// Results kept per query within a category.
const RESULTS_PER_QUERY: usize = 2;

/// The professional analysis dimensions of a futures daily report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntelCategory {
    Inventory,
    Basis,
    TermStructure,
    Positioning,
    SupplyDemand,
    IndustryChain,
    Trade,
    Policy,
}

impl IntelCategory {
    pub const ALL: [IntelCategory; 8] = [
        IntelCategory::Inventory,
        IntelCategory::Basis,
        IntelCategory::TermStructure,
        IntelCategory::Positioning,
        IntelCategory::SupplyDemand,
        IntelCategory::IndustryChain,
        IntelCategory::Trade,
        IntelCategory::Policy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IntelCategory::Inventory => "Inventory & Warehouse Receipts",
            IntelCategory::Basis => "Basis & Cash-Futures Spread",
            IntelCategory::TermStructure => "Term Structure",
            IntelCategory::Positioning => "Positioning",
            IntelCategory::SupplyDemand => "Supply & Demand",
            IntelCategory::IndustryChain => "Industry Chain",
            IntelCategory::Trade => "Imports & Exports",
            IntelCategory::Policy => "Policy",
        }
    }

    /// Query templates for this dimension.
    fn queries(&self, commodity: &str, date: NaiveDate) -> Vec<String> {
        match self {
            IntelCategory::Inventory => vec![
                format!("{commodity} exchange inventory {date}"),
                format!("{commodity} warehouse receipts"),
            ],
            IntelCategory::Basis => vec![
                format!("{commodity} basis {date}"),
                format!("{commodity} spot futures spread"),
            ],
            IntelCategory::TermStructure => vec![
                format!("{commodity} calendar spread {date}"),
                format!("{commodity} near far month spread"),
            ],
            IntelCategory::Positioning => vec![
                format!("{commodity} futures open interest {date}"),
                format!("{commodity} net long positions"),
            ],
            IntelCategory::SupplyDemand => vec![
                format!("{commodity} production output {date}"),
                format!("{commodity} supply demand balance"),
            ],
            IntelCategory::IndustryChain => vec![
                format!("{commodity} downstream demand prices"),
                format!("{commodity} production margin"),
            ],
            IntelCategory::Trade => vec![
                format!("{commodity} import volume {date}"),
                format!("{commodity} customs export data"),
            ],
            IntelCategory::Policy => vec![
                format!("{commodity} government policy {date}"),
                format!("{commodity} industry regulation"),
            ],
        }
    }
}

/// Categorized sweep output, in `IntelCategory::ALL` order. Categories
/// with no hits are omitted.
#[derive(Debug, Clone, Serialize, Default)]
pub struct IntelReport {
    pub sections: Vec<(IntelCategory, Vec<NewsItem>)>,
}

impl IntelReport {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Run the eight-dimension sweep through one search backend.
pub fn gather_intel(source: &dyn NewsSource, commodity: &str, date: NaiveDate) -> IntelReport {
    let mut report = IntelReport::default();

    for category in IntelCategory::ALL {
        let mut items = Vec::new();
        for query in category.queries(commodity, date) {
            match source.search(&query) {
                Ok(batch) => items.extend(batch.into_iter().take(RESULTS_PER_QUERY)),
                Err(e) => {
                    warn!(
                        category = category.label(),
                        error = %e,
                        "intel query failed; category degraded"
                    );
                }
            }
        }
        if !items.is_empty() {
            report.sections.push((category, items));
        }
    }

    report
}
