//! Trend label from a short and a long simple moving average.

use serde::Serialize;
use std::fmt;

use crate::domain::indicator::calculate_sma;
use crate::domain::indicator_helpers::last_value;
use crate::domain::signal::SignalCategory;

pub const DEFAULT_SHORT_WINDOW: usize = 7;
pub const DEFAULT_LONG_WINDOW: usize = 30;

/// Relative gap between the two averages that separates a strong trend from
/// a mild one.
pub const STRONG_TREND_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendLabel {
    StrongUp,
    MildUp,
    Sideways,
    MildDown,
    StrongDown,
}

impl TrendLabel {
    /// Vote cast by the trend in the aggregate tally.
    pub fn vote(&self) -> SignalCategory {
        match self {
            TrendLabel::StrongUp | TrendLabel::MildUp => SignalCategory::Bullish,
            TrendLabel::Sideways => SignalCategory::Neutral,
            TrendLabel::MildDown | TrendLabel::StrongDown => SignalCategory::Bearish,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TrendLabel::StrongUp => "strong uptrend",
            TrendLabel::MildUp => "mild uptrend",
            TrendLabel::Sideways => "sideways",
            TrendLabel::MildDown => "mild downtrend",
            TrendLabel::StrongDown => "strong downtrend",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Compare the latest short and long SMA. `None` when the long average has
/// no value yet.
pub fn calculate_trend(prices: &[f64], short: usize, long: usize) -> Option<TrendLabel> {
    if prices.len() < long {
        return None;
    }
    let s = last_value(&calculate_sma(prices, short)?)?;
    let l = last_value(&calculate_sma(prices, long)?)?;

    let label = if s > l * (1.0 + STRONG_TREND_MARGIN) {
        TrendLabel::StrongUp
    } else if s > l {
        TrendLabel::MildUp
    } else if s < l * (1.0 - STRONG_TREND_MARGIN) {
        TrendLabel::StrongDown
    } else if s < l {
        TrendLabel::MildDown
    } else {
        TrendLabel::Sideways
    };
    Some(label)
}
