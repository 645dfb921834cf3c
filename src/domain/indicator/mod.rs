//! Technical indicator implementations.
//!
//! Every indicator consumes the close prices of a [`MarketSeries`] (MFI also
//! takes volumes) and returns `None` when the series is shorter than its
//! minimum length. Otherwise the result is right-aligned with the input: it
//! has one entry per price and the warm-up positions are `None`.
//!
//! [`MarketSeries`]: crate::domain::series::MarketSeries

pub mod bollinger;
pub mod ema;
pub mod fibonacci;
pub mod ichimoku;
pub mod macd;
pub mod mfi;
pub mod parabolic_sar;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod stochastic;
pub mod volatility;

pub use bollinger::{calculate_bollinger, BollingerSeries};
pub use ema::calculate_ema;
pub use fibonacci::{calculate_fibonacci, FibonacciLevel, FibonacciLevels};
pub use ichimoku::{calculate_ichimoku, IchimokuParams, IchimokuSeries};
pub use macd::{calculate_macd, MacdSeries};
pub use mfi::calculate_mfi;
pub use parabolic_sar::{calculate_parabolic_sar, SarParams, SarState, Trend};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stochastic::{calculate_stochastic, StochasticSeries};
pub use volatility::calculate_volatility;

use std::fmt;

/// One indicator output line, aligned 1:1 with the input prices.
pub type Series = Vec<Option<f64>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Volatility(usize),
    Mfi(usize),
    Fibonacci(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    Ichimoku {
        conversion: usize,
        base: usize,
        span_b: usize,
        lag: usize,
    },
    ParabolicSar,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Volatility(period) => write!(f, "VOLATILITY({})", period),
            IndicatorType::Mfi(period) => write!(f, "MFI({})", period),
            IndicatorType::Fibonacci(period) => write!(f, "FIBONACCI({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::Ichimoku {
                conversion,
                base,
                span_b,
                lag,
            } => write!(f, "ICHIMOKU({},{},{},{})", conversion, base, span_b, lag),
            IndicatorType::ParabolicSar => write!(f, "PSAR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display_sma() {
        assert_eq!(IndicatorType::Sma(7).to_string(), "SMA(7)");
    }

    #[test]
    fn indicator_type_display_macd() {
        let macd = IndicatorType::Macd {
            fast: 12,
            slow: 26,
            signal: 9,
        };
        assert_eq!(macd.to_string(), "MACD(12,26,9)");
    }

    #[test]
    fn indicator_type_display_bollinger() {
        let boll = IndicatorType::Bollinger {
            period: 20,
            stddev_mult_x100: 200,
        };
        assert_eq!(boll.to_string(), "BOLLINGER(20,2)");
    }

    #[test]
    fn indicator_type_display_ichimoku() {
        let ichi = IndicatorType::Ichimoku {
            conversion: 9,
            base: 26,
            span_b: 52,
            lag: 26,
        };
        assert_eq!(ichi.to_string(), "ICHIMOKU(9,26,52,26)");
    }

    #[test]
    fn indicator_type_display_psar() {
        assert_eq!(IndicatorType::ParabolicSar.to_string(), "PSAR");
    }
}
