//! Interpretation of the latest indicator readings.
//!
//! Each function looks at the most recent value(s) of one indicator (and the
//! value before it where a crossover matters) and returns an
//! [`Interpretation`]. Thresholds are fixed. Missing input always yields
//! [`Interpretation::insufficient`].

use crate::domain::indicator::{FibonacciLevel, FibonacciLevels, IchimokuSeries};
use crate::domain::indicator_helpers::{last_two, last_value};
use crate::domain::signal::{Interpretation, SignalCategory};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_LEANING_OVERBOUGHT: f64 = 60.0;
pub const RSI_LEANING_OVERSOLD: f64 = 40.0;

pub const MFI_OVERBOUGHT: f64 = 80.0;
pub const MFI_OVERSOLD: f64 = 20.0;
pub const MFI_LEANING_OVERBOUGHT: f64 = 60.0;
pub const MFI_LEANING_OVERSOLD: f64 = 40.0;

pub const STOCHASTIC_OVERBOUGHT: f64 = 80.0;
pub const STOCHASTIC_OVERSOLD: f64 = 20.0;

/// How far back the Ichimoku cloud is read relative to the current price.
pub const CLOUD_LOOKBACK: usize = 26;

struct OscillatorBands {
    overbought: f64,
    oversold: f64,
    leaning_overbought: f64,
    leaning_oversold: f64,
}

fn classify_oscillator(value: f64, bands: &OscillatorBands) -> Interpretation {
    if value > bands.overbought {
        Interpretation::new("Overbought - possible correction", SignalCategory::Bearish)
    } else if value < bands.oversold {
        Interpretation::new("Oversold - possible rebound", SignalCategory::Bullish)
    } else if value > bands.leaning_overbought {
        Interpretation::new("Slightly overbought", SignalCategory::NeutralBearish)
    } else if value < bands.leaning_oversold {
        Interpretation::new("Slightly oversold", SignalCategory::NeutralBullish)
    } else {
        Interpretation::new("Neutral conditions", SignalCategory::Neutral)
    }
}

pub fn interpret_rsi(rsi: &[Option<f64>]) -> Interpretation {
    let Some(current) = last_value(rsi) else {
        return Interpretation::insufficient("RSI");
    };
    classify_oscillator(
        current,
        &OscillatorBands {
            overbought: RSI_OVERBOUGHT,
            oversold: RSI_OVERSOLD,
            leaning_overbought: RSI_LEANING_OVERBOUGHT,
            leaning_oversold: RSI_LEANING_OVERSOLD,
        },
    )
}

pub fn interpret_mfi(mfi: &[Option<f64>]) -> Interpretation {
    let Some(current) = last_value(mfi) else {
        return Interpretation::insufficient("MFI");
    };
    classify_oscillator(
        current,
        &OscillatorBands {
            overbought: MFI_OVERBOUGHT,
            oversold: MFI_OVERSOLD,
            leaning_overbought: MFI_LEANING_OVERBOUGHT,
            leaning_oversold: MFI_LEANING_OVERSOLD,
        },
    )
}

pub fn interpret_macd(macd: &[Option<f64>], signal: &[Option<f64>]) -> Interpretation {
    let (Some(m), Some(s)) = (last_value(macd), last_value(signal)) else {
        return Interpretation::insufficient("MACD");
    };

    if m > s && m > 0.0 {
        Interpretation::new("Strong bullish signal", SignalCategory::Bullish)
    } else if m > s {
        Interpretation::new("Bullish signal", SignalCategory::NeutralBullish)
    } else if m < s && m < 0.0 {
        Interpretation::new("Strong bearish signal", SignalCategory::Bearish)
    } else {
        Interpretation::new("Bearish signal", SignalCategory::NeutralBearish)
    }
}

/// Overbought/oversold zone first, then a %K/%D crossover escalates the
/// result: from neutral to the leaning category, from any other zone to the
/// full category in the crossover direction.
pub fn interpret_stochastic(k: &[Option<f64>], d: &[Option<f64>]) -> Interpretation {
    let (Some((prev_k, cur_k)), Some((prev_d, cur_d))) = (last_two(k), last_two(d)) else {
        return Interpretation::insufficient("Stochastic Oscillator");
    };

    let (mut narrative, mut signal) = if cur_k > STOCHASTIC_OVERBOUGHT && cur_d > STOCHASTIC_OVERBOUGHT
    {
        (
            String::from("Overbought - possible correction"),
            SignalCategory::Bearish,
        )
    } else if cur_k < STOCHASTIC_OVERSOLD && cur_d < STOCHASTIC_OVERSOLD {
        (
            String::from("Oversold - possible rebound"),
            SignalCategory::Bullish,
        )
    } else {
        (String::from("Neutral zone"), SignalCategory::Neutral)
    };

    if prev_k < prev_d && cur_k > cur_d {
        narrative.push_str(" - bullish crossover");
        signal = if signal == SignalCategory::Neutral {
            SignalCategory::NeutralBullish
        } else {
            SignalCategory::Bullish
        };
    } else if prev_k > prev_d && cur_k < cur_d {
        narrative.push_str(" - bearish crossover");
        signal = if signal == SignalCategory::Neutral {
            SignalCategory::NeutralBearish
        } else {
            SignalCategory::Bearish
        };
    }

    Interpretation::new(narrative, signal)
}

/// Tenkan/Kijun crossover decides the signal. The cloud as of
/// [`CLOUD_LOOKBACK`] periods back only settles an undecided (neutral) read;
/// its colour is reported but never changes the signal. Without a cloud at
/// that index (see [`cloud_at_lookback`]) the narrative covers the
/// crossover alone.
pub fn interpret_ichimoku(prices: &[f64], ichimoku: Option<&IchimokuSeries>) -> Interpretation {
    const NAME: &str = "Ichimoku Cloud";
    let Some(ichi) = ichimoku else {
        return Interpretation::insufficient(NAME);
    };
    let (Some(tenkan), Some(kijun), Some(&price)) =
        (last_value(&ichi.tenkan), last_value(&ichi.kijun), prices.last())
    else {
        return Interpretation::insufficient(NAME);
    };
    if prices.len() < CLOUD_LOOKBACK {
        return Interpretation::insufficient(NAME);
    }

    let cloud = cloud_at_lookback(ichi);
    let mut analysis = String::new();
    let mut signal = SignalCategory::Neutral;

    if tenkan > kijun {
        analysis.push_str("Tenkan-sen crossed above Kijun-sen (buy signal). ");
        signal = SignalCategory::Bullish;
    } else if tenkan < kijun {
        analysis.push_str("Tenkan-sen crossed below Kijun-sen (sell signal). ");
        signal = SignalCategory::Bearish;
    }

    if let Some((span_a, span_b)) = cloud {
        if price > span_a.max(span_b) {
            analysis.push_str("Price is above the cloud (uptrend). ");
            if signal == SignalCategory::Neutral {
                signal = SignalCategory::Bullish;
            }
        } else if price < span_a.min(span_b) {
            analysis.push_str("Price is below the cloud (downtrend). ");
            if signal == SignalCategory::Neutral {
                signal = SignalCategory::Bearish;
            }
        } else {
            analysis.push_str("Price is inside the cloud (uncertainty). ");
        }

        if span_a > span_b {
            analysis.push_str("The cloud is green (bullish). ");
        } else {
            analysis.push_str("The cloud is red (bearish). ");
        }
    }

    let prefix = match signal {
        SignalCategory::Bullish => "Strong bullish signal: ",
        SignalCategory::Bearish => "Strong bearish signal: ",
        _ => "Neutral signal: ",
    };
    Interpretation::new(format!("{}{}", prefix, analysis.trim_end()), signal)
}

/// `(span_a, span_b)` as of [`CLOUD_LOOKBACK`] periods before the last price.
///
/// Span B is shifted forward by the lag, so with default parameters it first
/// exists at index 77 and this reading needs at least 103 points. A 90-day
/// daily history has no cloud here.
pub fn cloud_at_lookback(ichi: &IchimokuSeries) -> Option<(f64, f64)> {
    let n = ichi.span_a.len();
    if n <= CLOUD_LOOKBACK || ichi.span_b.len() != n {
        return None;
    }
    let idx = n - CLOUD_LOOKBACK;
    Some((ichi.span_a[idx]?, ichi.span_b[idx]?))
}

/// Locates the price between the nearest level below (at or under the
/// price) and the nearest level above.
pub fn interpret_fibonacci(price: f64, levels: Option<&FibonacciLevels>) -> Interpretation {
    const NAME: &str = "Fibonacci levels";
    let Some(fib) = levels else {
        return Interpretation::insufficient(NAME);
    };
    if !price.is_finite() || price == 0.0 || fib.levels.is_empty() {
        return Interpretation::insufficient(NAME);
    }

    let mut sorted: Vec<&FibonacciLevel> = fib.levels.iter().collect();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));

    let mut below: Option<&FibonacciLevel> = None;
    let mut above: Option<&FibonacciLevel> = None;
    for level in sorted {
        if level.price <= price {
            below = Some(level);
        } else {
            above = Some(level);
            break;
        }
    }

    if let Some(b) = below.filter(|b| b.is_lowest()) {
        return Interpretation::new(
            format!(
                "Price is near the lowest Fibonacci level ({}%). Possible support and rebound.",
                b.label
            ),
            SignalCategory::Bullish,
        );
    }

    if above.is_none_or(|a| a.is_highest()) {
        return Interpretation::new(
            "Price is near the highest Fibonacci level (100%). Possible resistance and correction.",
            SignalCategory::Bearish,
        );
    }

    if let (Some(b), Some(a)) = (below, above) {
        let distance_below = price - b.price;
        let distance_above = a.price - price;
        return if distance_below < distance_above {
            Interpretation::new(
                format!(
                    "Price is near the {}% Fibonacci level. Possible support at this level.",
                    b.label
                ),
                SignalCategory::NeutralBullish,
            )
        } else {
            Interpretation::new(
                format!(
                    "Price is approaching the {}% Fibonacci level. This level may act as resistance.",
                    a.label
                ),
                SignalCategory::NeutralBearish,
            )
        };
    }

    Interpretation::new(
        "Price could not be placed relative to the Fibonacci levels.",
        SignalCategory::Neutral,
    )
}

pub fn interpret_parabolic_sar(prices: &[f64], sar: Option<&[f64]>) -> Interpretation {
    const NAME: &str = "Parabolic SAR";
    let Some(sar) = sar else {
        return Interpretation::insufficient(NAME);
    };
    if prices.len() < 2 || sar.len() < 2 {
        return Interpretation::insufficient(NAME);
    }

    let (price, prev_price) = (prices[prices.len() - 1], prices[prices.len() - 2]);
    let (current, prev) = (sar[sar.len() - 1], sar[sar.len() - 2]);

    let flipped = (prev_price > prev && price < current) || (prev_price < prev && price > current);

    match (price > current, flipped) {
        (true, true) => Interpretation::new("Switch to uptrend - buy signal", SignalCategory::Bullish),
        (true, false) => Interpretation::new("Uptrend continues", SignalCategory::NeutralBullish),
        (false, true) => {
            Interpretation::new("Switch to downtrend - sell signal", SignalCategory::Bearish)
        }
        (false, false) => {
            Interpretation::new("Downtrend continues", SignalCategory::NeutralBearish)
        }
    }
}
