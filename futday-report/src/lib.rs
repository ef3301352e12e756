//! Futday Report — sequences the daily-report pipeline and renders the
//! document.
//!
//! The orchestrator wires the core computations to the external
//! collaborators (price feed, news sources, text generator), all injected
//! behind traits so the whole pipeline runs against in-memory stubs in
//! tests. Configuration is explicit: credentials and endpoints arrive in a
//! `ReportConfig` passed at construction, never read from ambient globals.

pub mod config;
pub mod document;
pub mod export;
pub mod orchestrator;

pub use config::{ConfigError, DeepSeekConfig, ReportConfig, SerperConfig};
pub use document::MarkdownReportGenerator;
pub use export::save_report;
pub use orchestrator::{DailyReport, Narrative, ReportError, ReportOrchestrator, ReportRequest};
