//! Narrative generation.
//!
//! A `TextGenerator` turns a prompt into report prose. The prompts embed
//! every market figure verbatim and instruct the model to state "data
//! missing" for unavailable fields instead of inventing numbers; the
//! mechanical fallbacks below render the same facts without a model, so a
//! report never depends on the generation API being up.

pub mod deepseek;
pub mod prompts;

pub use deepseek::DeepSeekClient;

use thiserror::Error;

use crate::domain::{MarketSummary, SessionStats};

/// Structured error types for text generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation API returned HTTP {status}")]
    Api { status: u16 },

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("empty completion")]
    EmptyCompletion,
}

/// Trait for text-generation backends.
pub trait TextGenerator: Send + Sync {
    /// Human-readable name of this generator.
    fn name(&self) -> &str;

    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

fn direction(change: f64) -> &'static str {
    if change > 0.0 {
        "up"
    } else if change < 0.0 {
        "down"
    } else {
        "flat"
    }
}

fn describe_session(label: &str, stats: &SessionStats) -> String {
    format!(
        "The {label} session opened at {:.2}, touched a high of {:.2} and a low of {:.2}, \
         and closed at {:.2}, {} {:.2} ({:+.2}%).",
        stats.open,
        stats.high,
        stats.low,
        stats.close,
        direction(stats.change),
        stats.change.abs(),
        stats.change_pct,
    )
}

/// Plain-text session review built directly from the summary. Used when no
/// generator is configured and as the fallback when generation fails.
pub fn describe_sessions(symbol: &str, summary: &MarketSummary) -> String {
    let mut text = format!("{symbol} — trading day {}. ", summary.date);
    match &summary.day {
        Some(day) => text.push_str(&describe_session("day", day)),
        None => text.push_str("Day session data unavailable."),
    }
    text.push(' ');
    match &summary.night {
        Some(night) => text.push_str(&describe_session("night", night)),
        None => text.push_str("Night session data unavailable."),
    }
    text
}
