//! Markdown report adapter implementing ReportPort.
//!
//! Prices are printed with 2 decimals, MACD lines with 4. Sections whose
//! indicator lacks data carry the interpretation's "insufficient data"
//! narrative instead of values.

use std::fs;

use chrono::DateTime;

use crate::domain::analysis::{AnalysisReport, IndicatorSection};
use crate::domain::error::AnalyzerError;
use crate::domain::indicator::Trend;
use crate::domain::interpret::CLOUD_LOOKBACK;
use crate::ports::report_port::ReportPort;

pub const DISCLAIMER: &str = "This report is generated automatically from historical \
market data and is not investment advice. Cryptocurrency markets are highly volatile; \
do your own research before making any decision.";

const MISSING: &str = "n/a";

fn price(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.2}", v))
}

fn change(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:+.2}%", v))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.2}%", v))
}

fn date(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn signal_line<T>(section: &IndicatorSection<T>) -> String {
    let signal = section
        .signal()
        .map_or_else(|| MISSING.to_string(), |s| s.to_string());
    format!(
        "- Signal: **{}**\n- {}\n",
        signal, section.interpretation.narrative
    )
}

fn render_header(report: &AnalysisReport, coin: &str) -> String {
    format!(
        "# Technical analysis: {}\n\n{} data points, {} to {}\n\n",
        coin.to_uppercase(),
        report.points,
        date(report.first_date),
        date(report.last_date)
    )
}

fn render_summary(report: &AnalysisReport) -> String {
    let v = &report.verdict;
    format!(
        "## Summary\n\nOutlook: **{}** (dominant signal: {})\n\n{}\n\n\
         | Bullish | Neutral-bullish | Neutral | Neutral-bearish | Bearish |\n\
         |---|---|---|---|---|\n\
         | {} | {} | {} | {} | {} |\n\n",
        v.outlook,
        v.dominant,
        v.narrative,
        v.tally.bullish,
        v.tally.neutral_bullish,
        v.tally.neutral,
        v.tally.neutral_bearish,
        v.tally.bearish
    )
}

fn render_current_values(report: &AnalysisReport) -> String {
    let s = &report.snapshot;
    format!(
        "## Current values\n\n\
         | | |\n|---|---|\n\
         | Price | {} |\n\
         | 24h change | {} |\n\
         | 7d change | {} |\n\
         | 30d change | {} |\n\
         | 30-period high | {:.2} |\n\
         | 30-period low | {:.2} |\n\
         | 30-period average | {:.2} |\n\n",
        price(Some(s.current_price)),
        change(s.change_24h),
        change(s.change_7d),
        change(s.change_30d),
        s.recent.high,
        s.recent.low,
        s.recent.average
    )
}

fn render_trend(report: &AnalysisReport) -> String {
    let t = &report.trend;
    let label = t
        .label
        .map_or_else(|| "insufficient data".to_string(), |l| l.to_string());
    format!(
        "## Trend\n\n- Trend: **{}**\n- SMA({}): {}\n- EMA({}): {}\n\n",
        label,
        t.sma_window,
        price(t.sma),
        t.ema_window,
        price(t.ema)
    )
}

fn render_oscillators(report: &AnalysisReport) -> String {
    let mut out = String::from("## Momentum\n\n");

    out.push_str(&format!("### RSI\n\n- Value: {}\n", price(report.rsi.value)));
    out.push_str(&signal_line(&report.rsi));
    out.push('\n');

    out.push_str("### MACD\n\n");
    if let Some(m) = report.macd.value {
        out.push_str(&format!(
            "- MACD: {:.4}\n- Signal line: {:.4}\n- Histogram: {:.4}\n",
            m.macd, m.signal, m.histogram
        ));
    }
    out.push_str(&signal_line(&report.macd));
    out.push('\n');

    out.push_str("### Stochastic oscillator\n\n");
    if let Some(s) = report.stochastic.value {
        out.push_str(&format!("- %K: {:.2}\n- %D: {:.2}\n", s.k, s.d));
    }
    out.push_str(&signal_line(&report.stochastic));
    out.push('\n');

    out.push_str(&format!(
        "### Money Flow Index\n\n- Value: {}\n",
        price(report.mfi.value)
    ));
    out.push_str(&signal_line(&report.mfi));
    out.push('\n');

    out
}

fn render_volatility(report: &AnalysisReport) -> String {
    let mut out = String::from("## Volatility\n\n");
    match report.bollinger {
        Some(b) => out.push_str(&format!(
            "- Bollinger upper: {:.2}\n- Bollinger middle: {:.2}\n- Bollinger lower: {:.2}\n",
            b.upper, b.middle, b.lower
        )),
        None => out.push_str("- Bollinger Bands: insufficient data\n"),
    }
    out.push_str(&format!(
        "- Volatility: {}\n- 30-period average volatility: {}\n\n",
        percent(report.volatility.current),
        percent(report.volatility.average)
    ));
    out
}

fn render_ichimoku(report: &AnalysisReport) -> String {
    let mut out = String::from("## Ichimoku Cloud\n\n");
    if let Some(i) = report.ichimoku.value {
        out.push_str(&format!(
            "- Tenkan-sen: {}\n- Kijun-sen: {}\n- Senkou Span A: {}\n- Senkou Span B: {}\n",
            price(i.tenkan),
            price(i.kijun),
            price(i.span_a),
            price(i.span_b)
        ));
        match (i.cloud_span_a, i.cloud_span_b) {
            (Some(a), Some(b)) => out.push_str(&format!(
                "- Cloud {} periods back: Span A {:.2}, Span B {:.2}\n",
                CLOUD_LOOKBACK, a, b
            )),
            _ => out.push_str(&format!(
                "- Cloud {} periods back: not formed yet, Senkou Span B needs a longer history\n",
                CLOUD_LOOKBACK
            )),
        }
    }
    out.push_str(&signal_line(&report.ichimoku));
    out.push('\n');
    out
}

fn render_fibonacci(report: &AnalysisReport) -> String {
    let mut out = String::from("## Fibonacci retracement\n\n");
    if let Some(levels) = &report.fibonacci.value {
        out.push_str("| Level | Price |\n|---|---|\n");
        for level in levels.levels.iter().rev() {
            out.push_str(&format!("| {}% | {:.2} |\n", level.label, level.price));
        }
        out.push('\n');
    }
    out.push_str(&signal_line(&report.fibonacci));
    out.push('\n');
    out
}

fn render_parabolic_sar(report: &AnalysisReport) -> String {
    let mut out = String::from("## Parabolic SAR\n\n");
    if let Some(s) = report.parabolic_sar.value {
        let direction = match s.trend {
            Trend::Up => "up",
            Trend::Down => "down",
        };
        out.push_str(&format!("- SAR: {:.2} (trend {})\n", s.sar, direction));
    }
    out.push_str(&signal_line(&report.parabolic_sar));
    out.push('\n');
    out
}

/// Full Markdown document for one analyzed coin.
pub fn render(report: &AnalysisReport, coin: &str) -> String {
    let mut output = String::new();
    output.push_str(&render_header(report, coin));
    output.push_str(&render_summary(report));
    output.push_str(&render_current_values(report));
    output.push_str(&render_trend(report));
    output.push_str(&render_oscillators(report));
    output.push_str(&render_volatility(report));
    output.push_str(&render_ichimoku(report));
    output.push_str(&render_fibonacci(report));
    output.push_str(&render_parabolic_sar(report));
    output.push_str(&format!("---\n\n_{}_\n", DISCLAIMER));
    output
}

pub struct MarkdownReportAdapter;

impl MarkdownReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for MarkdownReportAdapter {
    fn write(
        &self,
        report: &AnalysisReport,
        coin: &str,
        output_path: &str,
    ) -> Result<(), AnalyzerError> {
        fs::write(output_path, render(report, coin))?;
        Ok(())
    }
}
