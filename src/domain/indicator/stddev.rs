//! Rolling standard deviation.
//!
//! Sample standard deviation (divides by n-1) over the trailing n values,
//! shared by Bollinger Bands and volatility.
//! Warmup: first (n-1) points are `None`.

use crate::domain::indicator::Series;
use crate::domain::indicator_helpers::{rolling, sample_stddev};

pub fn rolling_stddev(values: &[f64], window: usize) -> Series {
    rolling(values, window, sample_stddev)
}
