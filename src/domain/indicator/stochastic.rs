//! Stochastic Oscillator (%K / %D).
//!
//! Only closes are available, so the rolling max/min of the close stands in
//! for the high/low of the window:
//! %K = 100 × (C - min_n) / (max_n - min_n)
//! %D = SMA(%K, smooth)
//!
//! A flat window (max == min) has no range to locate the close in; %K is
//! reported as 50, the midpoint.
//!
//! Default parameters: window=14, smooth=3
//! Warmup: %K first (window-1) points, %D first (window-1 + smooth-1) points.

use crate::domain::indicator::Series;
use crate::domain::indicator_helpers::{window_max, window_min};
use serde::Serialize;

pub const DEFAULT_WINDOW: usize = 14;
pub const DEFAULT_SMOOTH: usize = 3;

/// %K value used when the window has no range.
pub const FLAT_WINDOW_K: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    pub k: Series,
    pub d: Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StochasticReading {
    pub k: f64,
    pub d: f64,
}

impl StochasticSeries {
    pub fn latest(&self) -> Option<StochasticReading> {
        Some(StochasticReading {
            k: self.k.last().copied().flatten()?,
            d: self.d.last().copied().flatten()?,
        })
    }
}

pub fn calculate_stochastic(
    prices: &[f64],
    window: usize,
    smooth: usize,
) -> Option<StochasticSeries> {
    if window == 0 || smooth == 0 || prices.len() < window {
        return None;
    }

    let k: Series = (0..prices.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let w = &prices[i + 1 - window..=i];
            let (high, low) = (window_max(w), window_min(w));
            if high == low {
                Some(FLAT_WINDOW_K)
            } else {
                Some(100.0 * (prices[i] - low) / (high - low))
            }
        })
        .collect();

    let d: Series = (0..k.len())
        .map(|i| {
            if i + 1 < smooth {
                return None;
            }
            let w = &k[i + 1 - smooth..=i];
            let mut sum = 0.0;
            for v in w {
                sum += (*v)?;
            }
            Some(sum / smooth as f64)
        })
        .collect();

    Some(StochasticSeries { k, d })
}
