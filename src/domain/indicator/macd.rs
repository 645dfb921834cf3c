//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Both EMAs and the signal EMA are seeded at their first input, so every
//! line has a value from index 0; the leading values are masked as warm-up.
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Minimum length: slow + signal.
//! Warmup: MACD line slow - 1, signal and histogram slow - 1 + signal - 1.

use crate::domain::indicator::ema::ema_raw;
use crate::domain::indicator::Series;
use crate::domain::indicator_helpers::mask_warmup;
use serde::Serialize;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Series,
    pub signal: Series,
    pub histogram: Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl MacdSeries {
    pub fn latest(&self) -> Option<MacdReading> {
        Some(MacdReading {
            macd: self.macd.last().copied().flatten()?,
            signal: self.signal.last().copied().flatten()?,
            histogram: self.histogram.last().copied().flatten()?,
        })
    }
}

pub fn calculate_macd(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Option<MacdSeries> {
    if fast == 0 || slow == 0 || signal_period == 0 || prices.len() < slow + signal_period {
        return None;
    }

    let ema_fast = ema_raw(prices, fast);
    let ema_slow = ema_raw(prices, slow);

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_raw(&macd_line, signal_period);
    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(signal_line.iter())
        .map(|(m, s)| m - s)
        .collect();

    let macd_warmup = slow - 1;
    let signal_warmup = slow - 1 + signal_period - 1;

    Some(MacdSeries {
        macd: mask_warmup(macd_line, macd_warmup),
        signal: mask_warmup(signal_line, signal_warmup),
        histogram: mask_warmup(histogram, signal_warmup),
    })
}
