//! Configuration validation.
//!
//! Checks the `[data]`, `[indicators]`, `[trend]` sections before an analysis
//! runs. Missing keys are not errors; they take the engine defaults.

use crate::domain::analysis::AnalysisConfig;
use crate::domain::error::AnalyzerError;
use crate::ports::config_port::ConfigPort;

pub const DATA_FORMATS: [&str; 2] = ["json", "csv"];

const WINDOW_KEYS: [&str; 15] = [
    "sma_window",
    "ema_window",
    "rsi_window",
    "macd_fast",
    "macd_slow",
    "macd_signal",
    "bollinger_window",
    "volatility_window",
    "stochastic_window",
    "stochastic_smooth",
    "mfi_period",
    "ichimoku_conversion",
    "ichimoku_base",
    "ichimoku_span_b",
    "fibonacci_period",
];

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    validate_data_format(config)?;
    validate_windows(config)?;
    validate_macd(config)?;
    validate_bollinger(config)?;
    validate_sar(config)?;
    validate_trend(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> AnalyzerError {
    AnalyzerError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_data_format(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    match config.get_string("data", "format") {
        Some(f) if !DATA_FORMATS.contains(&f.trim().to_lowercase().as_str()) => {
            Err(invalid("data", "format", "format must be json or csv"))
        }
        _ => Ok(()),
    }
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    for key in WINDOW_KEYS {
        if config.get_int("indicators", key, 1) < 1 {
            return Err(AnalyzerError::ConfigInvalid {
                section: "indicators".to_string(),
                key: key.to_string(),
                reason: format!("{} must be at least 1", key),
            });
        }
    }
    // the chikou lag may be zero
    if config.get_int("indicators", "ichimoku_lag", 0) < 0 {
        return Err(invalid(
            "indicators",
            "ichimoku_lag",
            "ichimoku_lag must be non-negative",
        ));
    }
    Ok(())
}

fn validate_macd(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let defaults = AnalysisConfig::default();
    let fast = config.get_int("indicators", "macd_fast", defaults.macd_fast as i64);
    let slow = config.get_int("indicators", "macd_slow", defaults.macd_slow as i64);
    if fast >= slow {
        return Err(invalid(
            "indicators",
            "macd_fast",
            "macd_fast must be less than macd_slow",
        ));
    }
    Ok(())
}

fn validate_bollinger(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let k = config.get_double("indicators", "bollinger_k", AnalysisConfig::default().bollinger_k);
    if k.is_nan() || k <= 0.0 {
        return Err(invalid(
            "indicators",
            "bollinger_k",
            "bollinger_k must be positive",
        ));
    }
    Ok(())
}

fn validate_sar(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let defaults = AnalysisConfig::default().sar;
    let start = config.get_double("indicators", "sar_af_start", defaults.af_start);
    let step = config.get_double("indicators", "sar_af_step", defaults.af_step);
    let max = config.get_double("indicators", "sar_af_max", defaults.af_max);

    if start.is_nan() || start <= 0.0 {
        return Err(invalid(
            "indicators",
            "sar_af_start",
            "sar_af_start must be positive",
        ));
    }
    if step.is_nan() || step <= 0.0 {
        return Err(invalid(
            "indicators",
            "sar_af_step",
            "sar_af_step must be positive",
        ));
    }
    if max.is_nan() || max < start {
        return Err(invalid(
            "indicators",
            "sar_af_max",
            "sar_af_max must not be below sar_af_start",
        ));
    }
    Ok(())
}

fn validate_trend(config: &dyn ConfigPort) -> Result<(), AnalyzerError> {
    let defaults = AnalysisConfig::default();
    let short = config.get_int("trend", "short_window", defaults.trend_short as i64);
    let long = config.get_int("trend", "long_window", defaults.trend_long as i64);
    if short < 1 {
        return Err(invalid("trend", "short_window", "short_window must be at least 1"));
    }
    if short >= long {
        return Err(invalid(
            "trend",
            "short_window",
            "short_window must be less than long_window",
        ));
    }
    Ok(())
}
