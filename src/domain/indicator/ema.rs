//! Exponential Moving Average.
//!
//! k = 2/(n+1), seeded with the first price (no bias adjustment), then
//! EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: the recursion starts at index 0, but the first (n-1) points are
//! reported as `None`.

use crate::domain::indicator::Series;
use crate::domain::indicator_helpers::mask_warmup;

pub const DEFAULT_WINDOW: usize = 14;

pub fn calculate_ema(prices: &[f64], window: usize) -> Option<Series> {
    if window == 0 || prices.len() < window {
        return None;
    }
    Some(mask_warmup(ema_raw(prices, window), window - 1))
}

/// Unmasked EMA over `values`, one output per input. Used where the full
/// recursion is needed (MACD lines).
pub fn ema_raw(values: &[f64], window: usize) -> Vec<f64> {
    let k = 2.0 / (window as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = 0.0;

    for (i, &v) in values.iter().enumerate() {
        ema = if i == 0 { v } else { v * k + ema * (1.0 - k) };
        out.push(ema);
    }

    out
}
