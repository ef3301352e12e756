//! Technical indicator engine.
//!
//! Pure computation over an ordered close series: trailing means (MA5/10/20),
//! the MACD triad, RSI(14), and Bollinger bands with a qualitative price
//! position. Each indicator reports the latest value only; anything whose
//! required window exceeds the available history reads as unavailable
//! instead of failing.

pub mod ema;
pub mod engine;

pub use ema::ema;
pub use engine::{compute, IndicatorSet, PricePosition};

/// Create synthetic minute bars from close prices for testing.
///
/// Bars start at 09:00 on a fixed date, one minute apart. Open = previous
/// close (or close for the first bar), high/low bracket the open/close.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::MinuteBar> {
    use crate::domain::MinuteBar;
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            MinuteBar {
                ts: base + chrono::Duration::minutes(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.1),
                close,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
