//! The indicator engine: trailing means, MACD triad, RSI, Bollinger bands.

use std::fmt;

use serde::Serialize;

use super::ema::ema;
use crate::domain::MinuteBar;

const MACD_FAST_SPAN: usize = 12;
const MACD_SLOW_SPAN: usize = 26;
const MACD_SIGNAL_SPAN: usize = 9;
const RSI_PERIOD: usize = 14;
const BOLL_PERIOD: usize = 20;
const BOLL_MULT: f64 = 2.0;

/// Minimum history before any indicator is reported. Below the
/// Bollinger/MA20 window, partial indicators are considered unreliable and
/// every field reads unavailable.
pub const MIN_BARS: usize = BOLL_PERIOD;

/// Where the latest close sits relative to the Bollinger bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PricePosition {
    AboveUpper,
    BetweenBands,
    BelowLower,
}

impl fmt::Display for PricePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PricePosition::AboveUpper => "near upper band",
            PricePosition::BetweenBands => "near mid band",
            PricePosition::BelowLower => "near lower band",
        };
        f.write_str(label)
    }
}

/// Snapshot of every indicator at the end of a series.
///
/// `None` = unavailable (insufficient history). Values are rounded to two
/// decimals at construction; internal math runs at full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct IndicatorSet {
    pub ma5: Option<f64>,
    pub ma10: Option<f64>,
    pub ma20: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub rsi14: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub current_price: Option<f64>,
    pub price_position: Option<PricePosition>,
}

impl IndicatorSet {
    /// True when no field is populated (short-series result).
    pub fn is_unavailable(&self) -> bool {
        *self == Self::default()
    }
}

/// Compute the full indicator snapshot for a chronologically ordered bar
/// window. Pure function: same input, same output, no I/O.
pub fn compute(bars: &[MinuteBar]) -> IndicatorSet {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    if closes.len() < MIN_BARS {
        return IndicatorSet::default();
    }

    let current = closes[closes.len() - 1];

    let fast = ema(&closes, MACD_FAST_SPAN);
    let slow = ema(&closes, MACD_SLOW_SPAN);
    let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_line = ema(&macd_line, MACD_SIGNAL_SPAN);
    let macd = macd_line[macd_line.len() - 1];
    let signal = signal_line[signal_line.len() - 1];

    let bands = bollinger_bands(&closes, BOLL_PERIOD, BOLL_MULT);
    let price_position = bands.map(|(upper, lower)| {
        if current > upper {
            PricePosition::AboveUpper
        } else if current < lower {
            PricePosition::BelowLower
        } else {
            PricePosition::BetweenBands
        }
    });

    IndicatorSet {
        ma5: trailing_mean(&closes, 5).map(round2),
        ma10: trailing_mean(&closes, 10).map(round2),
        ma20: trailing_mean(&closes, 20).map(round2),
        macd: Some(round2(macd)),
        macd_signal: Some(round2(signal)),
        macd_hist: Some(round2(macd - signal)),
        rsi14: rsi(&closes, RSI_PERIOD).map(round2),
        bollinger_upper: bands.map(|(upper, _)| round2(upper)),
        bollinger_lower: bands.map(|(_, lower)| round2(lower)),
        current_price: Some(round2(current)),
        price_position,
    }
}

/// Arithmetic mean of the trailing `n` values.
fn trailing_mean(values: &[f64], n: usize) -> Option<f64> {
    if values.len() < n || n == 0 {
        return None;
    }
    let window = &values[values.len() - n..];
    Some(window.iter().sum::<f64>() / n as f64)
}

/// RSI over the trailing `period` close-to-close deltas, using simple
/// (unweighted) averages of gains and losses.
///
/// Boundary: avg_loss == 0 with avg_gain > 0 → 100 (pure uptrend);
/// both zero (flat window, the 0/0 case) → unavailable.
fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if closes.len() < period + 1 {
        return None;
    }
    let tail = &closes[closes.len() - (period + 1)..];

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in tail.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum -= delta;
        }
    }
    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Bollinger (upper, lower) bands: MA(period) +/- mult * trailing sample
/// standard deviation (divide by n - 1).
fn bollinger_bands(closes: &[f64], period: usize, mult: f64) -> Option<(f64, f64)> {
    if closes.len() < period || period < 2 {
        return None;
    }
    let window = &closes[closes.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (period - 1) as f64;
    let width = mult * variance.sqrt();
    Some((mean + width, mean - width))
}

/// Presentation rounding, applied only at the result-object boundary.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    /// 19 closes at 10 followed by one at 30. MA20 = 11, MA10 = 12, MA5 = 14,
    /// sample stddev of the window = 2*sqrt(5).
    fn spike_series() -> Vec<crate::domain::MinuteBar> {
        let mut closes = vec![10.0; 19];
        closes.push(30.0);
        make_bars(&closes)
    }

    #[test]
    fn short_series_is_fully_unavailable() {
        let bars = make_bars(&[10.0; 19]);
        let set = compute(&bars);
        assert!(set.is_unavailable());
        assert_eq!(set.ma5, None);
        assert_eq!(set.current_price, None);
        assert_eq!(set.price_position, None);
    }

    #[test]
    fn trailing_means_on_spike_series() {
        let set = compute(&spike_series());
        assert_approx(set.ma20.unwrap(), 11.0, DEFAULT_EPSILON);
        assert_approx(set.ma10.unwrap(), 12.0, DEFAULT_EPSILON);
        assert_approx(set.ma5.unwrap(), 14.0, DEFAULT_EPSILON);
        assert_approx(set.current_price.unwrap(), 30.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_sample_stddev_on_spike_series() {
        // mean 11, squared deviations 19*1 + 361 = 380, sample variance
        // 380/19 = 20, width = 2*sqrt(20) = 4*sqrt(5) ≈ 8.944 → rounded bands.
        let set = compute(&spike_series());
        assert_approx(set.bollinger_upper.unwrap(), 19.94, 1e-9);
        assert_approx(set.bollinger_lower.unwrap(), 2.06, 1e-9);
        assert_eq!(set.price_position, Some(PricePosition::AboveUpper));
    }

    #[test]
    fn rsi_pure_uptrend_window_is_100() {
        // Trailing 14 deltas: thirteen zeros and one +20 → avg_loss = 0.
        let set = compute(&spike_series());
        assert_approx(set.rsi14.unwrap(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_flat_window_is_unavailable() {
        let set = compute(&make_bars(&[10.0; 25]));
        assert_eq!(set.rsi14, None);
    }

    #[test]
    fn macd_constant_series_is_zero() {
        let set = compute(&make_bars(&[42.0; 30]));
        assert_approx(set.macd.unwrap(), 0.0, DEFAULT_EPSILON);
        assert_approx(set.macd_signal.unwrap(), 0.0, DEFAULT_EPSILON);
        assert_approx(set.macd_hist.unwrap(), 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn macd_positive_in_steady_uptrend() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let set = compute(&make_bars(&closes));
        assert!(set.macd.unwrap() > 0.0);
        assert!(set.macd_hist.is_some());
    }

    #[test]
    fn price_position_below_lower_band() {
        let mut closes = vec![10.0; 19];
        closes.push(2.0);
        let set = compute(&make_bars(&closes));
        assert_eq!(set.price_position, Some(PricePosition::BelowLower));
    }

    #[test]
    fn price_position_between_bands_for_quiet_series() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + (i % 3) as f64).collect();
        let set = compute(&make_bars(&closes));
        assert_eq!(set.price_position, Some(PricePosition::BetweenBands));
    }

    #[test]
    fn values_are_rounded_to_two_decimals() {
        let closes: Vec<f64> = (0..20).map(|i| 10.0 + i as f64 / 3.0).collect();
        let set = compute(&make_bars(&closes));
        for v in [set.ma5, set.ma10, set.ma20, set.current_price] {
            let v = v.unwrap();
            assert_approx(v, round2(v), DEFAULT_EPSILON);
        }
    }

    #[test]
    fn compute_is_idempotent() {
        let bars = spike_series();
        assert_eq!(compute(&bars), compute(&bars));
    }

    #[test]
    fn price_position_labels() {
        assert_eq!(PricePosition::AboveUpper.to_string(), "near upper band");
        assert_eq!(PricePosition::BetweenBands.to_string(), "near mid band");
        assert_eq!(PricePosition::BelowLower.to_string(), "near lower band");
    }
}
