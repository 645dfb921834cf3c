//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (k × StdDev)
//! - Lower: Middle - (k × StdDev)
//!
//! Where StdDev is the sample standard deviation (divides by N-1).
//!
//! Default parameters: window=20, k=2.0
//! Warmup: first (window-1) points are `None`.

use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::stddev::rolling_stddev;
use crate::domain::indicator::Series;
use serde::Serialize;

pub const DEFAULT_WINDOW: usize = 20;
pub const DEFAULT_K: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
}

/// Latest band values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerReading {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerSeries {
    pub fn latest(&self) -> Option<BollingerReading> {
        Some(BollingerReading {
            upper: self.upper.last().copied().flatten()?,
            middle: self.middle.last().copied().flatten()?,
            lower: self.lower.last().copied().flatten()?,
        })
    }
}

pub fn calculate_bollinger(prices: &[f64], window: usize, k: f64) -> Option<BollingerSeries> {
    let middle = calculate_sma(prices, window)?;
    let stddev = rolling_stddev(prices, window);

    let (upper, lower): (Series, Series) = middle
        .iter()
        .zip(stddev.iter())
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => (Some(m + k * s), Some(m - k * s)),
            _ => (None, None),
        })
        .unzip();

    Some(BollingerSeries {
        upper,
        middle,
        lower,
    })
}
