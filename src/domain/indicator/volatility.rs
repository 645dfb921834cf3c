//! Volatility: rolling standard deviation of percentage returns.
//!
//! The trailing window of n prices holds n-1 returns
//! r[j] = (C[j] - C[j-1]) / C[j-1]; the value is their sample standard
//! deviation × 100. Warmup: first (n-1) points are `None`.
//!
//! A zero close inside the window leaves a return undefined; that window has
//! no reading (`None`) rather than an infinite or NaN value.

use crate::domain::indicator::Series;
use crate::domain::indicator_helpers::{rolling, sample_stddev};

pub const DEFAULT_WINDOW: usize = 14;

pub fn calculate_volatility(prices: &[f64], window: usize) -> Option<Series> {
    if window == 0 || prices.len() < window {
        return None;
    }
    let values = rolling(prices, window, |w| {
        let returns: Vec<f64> = w.windows(2).map(|p| (p[1] - p[0]) / p[0]).collect();
        sample_stddev(&returns) * 100.0
    });
    Some(values.into_iter().map(|v| v.filter(|x| x.is_finite())).collect())
}

/// Mean of the last `period` valid volatility readings.
pub fn average_recent(volatility: &[Option<f64>], period: usize) -> Option<f64> {
    let valid: Vec<f64> = volatility.iter().flatten().copied().collect();
    if valid.is_empty() || period == 0 {
        return None;
    }
    let tail = &valid[valid.len().saturating_sub(period)..];
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}
