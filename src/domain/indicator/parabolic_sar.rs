//! Parabolic SAR (stop and reverse), close-only variant.
//!
//! The indicator is a left-to-right fold over [`SarState`]. Each step:
//! 1. projects `sar += af × (ep - sar)`;
//! 2. on a close through the projected SAR, reverses the trend, reseeds SAR
//!    and the extreme point from the last `REVERSAL_LOOKBACK + 1` closes and
//!    resets `af` to its start value;
//! 3. otherwise, on a new extreme in the trend direction, moves `ep` and
//!    raises `af` by `step`, capped at `max`.
//!
//! The first state is seeded at the first close in an up trend.
//! Minimum length: 10.

use serde::Serialize;

pub const MIN_POINTS: usize = 10;

/// Closes before the current one that are searched for the reversal extreme.
pub const REVERSAL_LOOKBACK: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarParams {
    pub af_start: f64,
    pub af_step: f64,
    pub af_max: f64,
}

impl Default for SarParams {
    fn default() -> Self {
        Self {
            af_start: 0.02,
            af_step: 0.02,
            af_max: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarState {
    pub sar: f64,
    pub trend: Trend,
    pub extreme_point: f64,
    pub af: f64,
}

impl SarState {
    pub fn seed(first_price: f64, params: &SarParams) -> Self {
        Self {
            sar: first_price,
            trend: Trend::Up,
            extreme_point: first_price,
            af: params.af_start,
        }
    }

    /// Advance to index `i` of `prices`. `i` must be at least 1.
    pub fn step(self, prices: &[f64], i: usize, params: &SarParams) -> Self {
        let price = prices[i];
        let projected = self.sar + self.af * (self.extreme_point - self.sar);
        let recent = &prices[i.saturating_sub(REVERSAL_LOOKBACK)..=i];
        let recent_high = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let recent_low = recent.iter().copied().fold(f64::INFINITY, f64::min);

        match self.trend {
            Trend::Up if price < projected => Self {
                sar: recent_high,
                trend: Trend::Down,
                extreme_point: recent_low,
                af: params.af_start,
            },
            Trend::Down if price > projected => Self {
                sar: recent_low,
                trend: Trend::Up,
                extreme_point: recent_high,
                af: params.af_start,
            },
            Trend::Up if price > self.extreme_point => Self {
                sar: projected,
                extreme_point: price,
                af: (self.af + params.af_step).min(params.af_max),
                ..self
            },
            Trend::Down if price < self.extreme_point => Self {
                sar: projected,
                extreme_point: price,
                af: (self.af + params.af_step).min(params.af_max),
                ..self
            },
            _ => Self {
                sar: projected,
                ..self
            },
        }
    }
}

/// Every state of the fold, one per price. `None` below [`MIN_POINTS`].
pub fn calculate_parabolic_sar(prices: &[f64], params: &SarParams) -> Option<Vec<SarState>> {
    if prices.len() < MIN_POINTS {
        return None;
    }
    let mut state = SarState::seed(prices[0], params);
    let mut states = Vec::with_capacity(prices.len());
    states.push(state);
    for i in 1..prices.len() {
        state = state.step(prices, i, params);
        states.push(state);
    }
    Some(states)
}

pub fn sar_line(states: &[SarState]) -> Vec<f64> {
    states.iter().map(|s| s.sar).collect()
}
