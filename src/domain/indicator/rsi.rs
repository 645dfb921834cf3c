//! RSI (Relative Strength Index).
//!
//! Simple rolling means of gains and losses over the last n price changes:
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! An average loss of exactly zero is replaced by `f64::EPSILON`, which keeps
//! the division finite and drives RSI towards 100.
//!
//! Warmup: first n points are `None` (n price changes are needed).

use crate::domain::indicator::Series;
use crate::domain::indicator_helpers::mean;

pub const DEFAULT_WINDOW: usize = 14;

pub fn calculate_rsi(prices: &[f64], window: usize) -> Option<Series> {
    if window == 0 || prices.len() < window + 1 {
        return None;
    }

    let mut gains: Vec<f64> = Vec::with_capacity(prices.len() - 1);
    let mut losses: Vec<f64> = Vec::with_capacity(prices.len() - 1);

    for pair in prices.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mut values: Series = vec![None; window];
    for end in window..=gains.len() {
        let avg_gain = mean(&gains[end - window..end]);
        let mut avg_loss = mean(&losses[end - window..end]);
        if avg_loss == 0.0 {
            avg_loss = f64::EPSILON;
        }
        values.push(Some(100.0 - (100.0 / (1.0 + avg_gain / avg_loss))));
    }

    Some(values)
}
