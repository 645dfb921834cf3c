//! Money Flow Index.
//!
//! The close stands in for the typical price (no high/low available).
//! Raw flow = price × volume, credited to the positive or negative side by
//! the sign of the price change; MFI = 100 - 100 / (1 + pos_sum / neg_sum)
//! over the last `period` changes.
//!
//! Zero denominators:
//! - neg_sum == 0 with pos_sum > 0: the ratio is forced to 100.
//! - neg_sum == pos_sum == 0 (no price movement): no money moved either way,
//!   MFI = 50.
//!
//! Minimum length: period + 1, volumes aligned with prices.
//! Warmup: first `period` points are `None`.

use crate::domain::indicator::Series;

pub const DEFAULT_PERIOD: usize = 14;

/// Ratio substituted when there is no negative flow.
pub const FORCED_FLOW_RATIO: f64 = 100.0;

pub fn calculate_mfi(prices: &[f64], volumes: &[f64], period: usize) -> Option<Series> {
    if period == 0 || prices.len() != volumes.len() || prices.len() < period + 1 {
        return None;
    }

    let mut positive = vec![0.0; prices.len()];
    let mut negative = vec![0.0; prices.len()];
    for i in 1..prices.len() {
        let flow = prices[i] * volumes[i];
        let change = prices[i] - prices[i - 1];
        if change > 0.0 {
            positive[i] = flow;
        } else if change < 0.0 {
            negative[i] = flow;
        }
    }

    let values = (0..prices.len())
        .map(|i| {
            if i < period {
                return None;
            }
            let pos: f64 = positive[i + 1 - period..=i].iter().sum();
            let neg: f64 = negative[i + 1 - period..=i].iter().sum();
            let ratio = if neg != 0.0 {
                pos / neg
            } else if pos != 0.0 {
                FORCED_FLOW_RATIO
            } else {
                1.0
            };
            Some(100.0 - 100.0 / (1.0 + ratio))
        })
        .collect();

    Some(values)
}
