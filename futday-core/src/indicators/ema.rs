//! Exponential moving average primitive.
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1],
//! alpha = 2 / (span + 1). Seeded with the first value, so the output is
//! defined from index 0 for any non-empty input. The simple-average seed
//! variant would leave a span-26 EMA undefined below 26 samples; seeding
//! with the first value keeps MACD defined everywhere the engine's 20-bar
//! gate admits a series.

/// EMA of a value series. Output has the same length as the input.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EMA span must be >= 1");

    let mut result = Vec::with_capacity(values.len());
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut prev = match values.first() {
        Some(&v) => v,
        None => return result,
    };
    result.push(prev);

    for &v in &values[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        result.push(prev);
    }

    result
}
