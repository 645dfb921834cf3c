//! Analysis engine: one pass from a [`MarketSeries`] to an [`AnalysisReport`].
//!
//! Indicators that lack data are reported as `None` with an "insufficient
//! data" interpretation and never abort the run. Only a series shorter than
//! [`MIN_REPORT_POINTS`] is rejected as a whole.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::aggregate::{aggregate, Verdict};
use crate::domain::error::AnalyzerError;
use crate::domain::indicator::bollinger::BollingerReading;
use crate::domain::indicator::macd::MacdReading;
use crate::domain::indicator::parabolic_sar::sar_line;
use crate::domain::indicator::stochastic::StochasticReading;
use crate::domain::indicator::volatility::average_recent;
use crate::domain::indicator::{
    bollinger, calculate_bollinger, calculate_ema, calculate_fibonacci, calculate_ichimoku,
    calculate_macd, calculate_mfi, calculate_parabolic_sar, calculate_rsi, calculate_sma,
    calculate_stochastic, calculate_volatility, ema, fibonacci, macd, mfi, rsi, sma, stochastic, volatility,
    FibonacciLevels, IchimokuParams, IndicatorType, SarParams, Trend,
};
use crate::domain::indicator_helpers::last_value;
use crate::domain::interpret::{
    cloud_at_lookback, interpret_fibonacci, interpret_ichimoku, interpret_macd, interpret_mfi,
    interpret_parabolic_sar, interpret_rsi, interpret_stochastic,
};
use crate::domain::series::{MarketSeries, RecentStats, RECENT_PERIOD};
use crate::domain::signal::{Interpretation, SignalCategory};
use crate::domain::trend::{calculate_trend, TrendLabel, DEFAULT_LONG_WINDOW, DEFAULT_SHORT_WINDOW};

/// Shortest series the engine will analyze.
pub const MIN_REPORT_POINTS: usize = 30;

/// Every tunable window and factor of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub sma_window: usize,
    pub ema_window: usize,
    pub rsi_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_window: usize,
    pub bollinger_k: f64,
    pub volatility_window: usize,
    pub stochastic_window: usize,
    pub stochastic_smooth: usize,
    pub mfi_period: usize,
    pub ichimoku: IchimokuParams,
    pub fibonacci_period: usize,
    pub sar: SarParams,
    pub trend_short: usize,
    pub trend_long: usize,
    /// Let Stochastic, MFI, Ichimoku, Fibonacci and SAR vote in the verdict.
    pub include_extended: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_window: sma::DEFAULT_WINDOW,
            ema_window: ema::DEFAULT_WINDOW,
            rsi_window: rsi::DEFAULT_WINDOW,
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
            bollinger_window: bollinger::DEFAULT_WINDOW,
            bollinger_k: bollinger::DEFAULT_K,
            volatility_window: volatility::DEFAULT_WINDOW,
            stochastic_window: stochastic::DEFAULT_WINDOW,
            stochastic_smooth: stochastic::DEFAULT_SMOOTH,
            mfi_period: mfi::DEFAULT_PERIOD,
            ichimoku: IchimokuParams::default(),
            fibonacci_period: fibonacci::DEFAULT_PERIOD,
            sar: SarParams::default(),
            trend_short: DEFAULT_SHORT_WINDOW,
            trend_long: DEFAULT_LONG_WINDOW,
            include_extended: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSnapshot {
    pub current_price: f64,
    pub change_24h: Option<f64>,
    pub change_7d: Option<f64>,
    pub change_30d: Option<f64>,
    pub recent: RecentStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSection {
    pub label: Option<TrendLabel>,
    pub sma_window: usize,
    pub sma: Option<f64>,
    pub ema_window: usize,
    pub ema: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilitySection {
    pub current: Option<f64>,
    /// Mean of the last 30 valid readings.
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IchimokuReading {
    pub tenkan: Option<f64>,
    pub kijun: Option<f64>,
    pub span_a: Option<f64>,
    pub span_b: Option<f64>,
    /// Span A and Span B as of the cloud lookback; `None` until Span B has
    /// reached that index.
    pub cloud_span_a: Option<f64>,
    pub cloud_span_b: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SarReading {
    pub sar: f64,
    pub trend: Trend,
}

/// Latest value of one indicator with its interpretation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSection<T> {
    pub value: Option<T>,
    pub interpretation: Interpretation,
}

impl<T> IndicatorSection<T> {
    pub fn signal(&self) -> Option<SignalCategory> {
        self.interpretation.signal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub points: usize,
    pub first_date: i64,
    pub last_date: i64,
    pub snapshot: PriceSnapshot,
    pub trend: TrendSection,
    pub rsi: IndicatorSection<f64>,
    pub macd: IndicatorSection<MacdReading>,
    pub bollinger: Option<BollingerReading>,
    pub volatility: VolatilitySection,
    pub stochastic: IndicatorSection<StochasticReading>,
    pub mfi: IndicatorSection<f64>,
    pub ichimoku: IndicatorSection<IchimokuReading>,
    pub fibonacci: IndicatorSection<FibonacciLevels>,
    pub parabolic_sar: IndicatorSection<SarReading>,
    pub verdict: Verdict,
}

/// Log whether an indicator produced output and pass the result through.
fn traced<T>(indicator: IndicatorType, result: Option<T>) -> Option<T> {
    match &result {
        Some(_) => debug!(%indicator, "indicator computed"),
        None => warn!(%indicator, "not enough data for indicator"),
    }
    result
}

pub fn analyze(
    series: &MarketSeries,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalyzerError> {
    if series.len() < MIN_REPORT_POINTS {
        return Err(AnalyzerError::InsufficientData {
            points: series.len(),
            minimum: MIN_REPORT_POINTS,
        });
    }

    let prices = series.prices();
    let current_price = series.current_price();
    info!(points = series.len(), current_price, "analyzing series");

    let snapshot = PriceSnapshot {
        current_price,
        change_24h: series.change_24h(),
        change_7d: series.change_7d(),
        change_30d: series.change_30d(),
        recent: series.recent_stats(RECENT_PERIOD),
    };

    let sma = traced(
        IndicatorType::Sma(config.sma_window),
        calculate_sma(prices, config.sma_window),
    );
    let ema = traced(
        IndicatorType::Ema(config.ema_window),
        calculate_ema(prices, config.ema_window),
    );
    let trend = TrendSection {
        label: calculate_trend(prices, config.trend_short, config.trend_long),
        sma_window: config.sma_window,
        sma: sma.as_deref().and_then(last_value),
        ema_window: config.ema_window,
        ema: ema.as_deref().and_then(last_value),
    };

    let rsi_line = traced(
        IndicatorType::Rsi(config.rsi_window),
        calculate_rsi(prices, config.rsi_window),
    )
    .unwrap_or_default();
    let rsi = IndicatorSection {
        value: last_value(&rsi_line),
        interpretation: interpret_rsi(&rsi_line),
    };

    let macd_series = traced(
        IndicatorType::Macd {
            fast: config.macd_fast,
            slow: config.macd_slow,
            signal: config.macd_signal,
        },
        calculate_macd(prices, config.macd_fast, config.macd_slow, config.macd_signal),
    );
    let macd = match &macd_series {
        Some(m) => IndicatorSection {
            value: m.latest(),
            interpretation: interpret_macd(&m.macd, &m.signal),
        },
        None => IndicatorSection {
            value: None,
            interpretation: interpret_macd(&[], &[]),
        },
    };

    let bollinger = traced(
        IndicatorType::Bollinger {
            period: config.bollinger_window,
            stddev_mult_x100: (config.bollinger_k * 100.0).round() as u32,
        },
        calculate_bollinger(prices, config.bollinger_window, config.bollinger_k),
    )
    .and_then(|b| b.latest());

    let volatility_line = traced(
        IndicatorType::Volatility(config.volatility_window),
        calculate_volatility(prices, config.volatility_window),
    )
    .unwrap_or_default();
    let volatility = VolatilitySection {
        current: last_value(&volatility_line),
        average: average_recent(&volatility_line, RECENT_PERIOD),
    };

    let stochastic_series = traced(
        IndicatorType::Stochastic {
            k_period: config.stochastic_window,
            d_period: config.stochastic_smooth,
        },
        calculate_stochastic(prices, config.stochastic_window, config.stochastic_smooth),
    );
    let stochastic = match &stochastic_series {
        Some(s) => IndicatorSection {
            value: s.latest(),
            interpretation: interpret_stochastic(&s.k, &s.d),
        },
        None => IndicatorSection {
            value: None,
            interpretation: interpret_stochastic(&[], &[]),
        },
    };

    let mfi_line = traced(
        IndicatorType::Mfi(config.mfi_period),
        calculate_mfi(prices, series.volumes(), config.mfi_period),
    )
    .unwrap_or_default();
    let mfi = IndicatorSection {
        value: last_value(&mfi_line),
        interpretation: interpret_mfi(&mfi_line),
    };

    let p = config.ichimoku;
    let ichimoku_series = traced(
        IndicatorType::Ichimoku {
            conversion: p.conversion,
            base: p.base,
            span_b: p.span_b,
            lag: p.lag,
        },
        calculate_ichimoku(prices, p),
    );
    let ichimoku = IndicatorSection {
        value: ichimoku_series.as_ref().map(|i| {
            let cloud = cloud_at_lookback(i);
            IchimokuReading {
                tenkan: last_value(&i.tenkan),
                kijun: last_value(&i.kijun),
                span_a: last_value(&i.span_a),
                span_b: last_value(&i.span_b),
                cloud_span_a: cloud.map(|(a, _)| a),
                cloud_span_b: cloud.map(|(_, b)| b),
            }
        }),
        interpretation: interpret_ichimoku(prices, ichimoku_series.as_ref()),
    };

    let levels = traced(
        IndicatorType::Fibonacci(config.fibonacci_period),
        calculate_fibonacci(prices, config.fibonacci_period),
    );
    let fibonacci = IndicatorSection {
        interpretation: interpret_fibonacci(current_price, levels.as_ref()),
        value: levels,
    };

    let states = traced(
        IndicatorType::ParabolicSar,
        calculate_parabolic_sar(prices, &config.sar),
    );
    let sar_values = states.as_deref().map(sar_line);
    let parabolic_sar = IndicatorSection {
        value: states.as_ref().and_then(|s| s.last()).map(|s| SarReading {
            sar: s.sar,
            trend: s.trend,
        }),
        interpretation: interpret_parabolic_sar(prices, sar_values.as_deref()),
    };

    let mut votes = vec![rsi.signal(), macd.signal()];
    if config.include_extended {
        votes.extend([
            stochastic.signal(),
            mfi.signal(),
            ichimoku.signal(),
            fibonacci.signal(),
            parabolic_sar.signal(),
        ]);
    }
    let verdict = aggregate(trend.label, &votes);
    info!(outlook = %verdict.outlook, dominant = %verdict.dominant, "analysis complete");

    Ok(AnalysisReport {
        points: series.len(),
        first_date: series.first_date(),
        last_date: series.last_date(),
        snapshot,
        trend,
        rsi,
        macd,
        bollinger,
        volatility,
        stochastic,
        mfi,
        ichimoku,
        fibonacci,
        parabolic_sar,
        verdict,
    })
}
