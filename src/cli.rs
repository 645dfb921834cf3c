//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_store_adapter::JsonStoreAdapter;
use crate::adapters::markdown_report_adapter::MarkdownReportAdapter;
use crate::domain::analysis::{analyze, AnalysisConfig, AnalysisReport};
use crate::domain::config_validation::validate_analysis_config;
use crate::domain::error::AnalyzerError;
use crate::domain::indicator::{IchimokuParams, SarParams};
use crate::domain::series::MarketSeries;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "coinlens",
    about = "Technical analysis and trading signals for cryptocurrency price history"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one coin and print the verdict
    Analyze {
        /// JSON store file or CSV directory; overrides [data] path
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(long)]
        coin: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write a Markdown report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the full report as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// List coins available in a data source
    ListCoins {
        #[arg(short, long)]
        data: PathBuf,
    },
    /// Show the stored history range for a coin
    Info {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long)]
        coin: String,
    },
    /// Validate an analysis configuration file
    ValidateConfig {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            data,
            coin,
            config,
            output,
            json,
        } => run_analyze(
            data.as_ref(),
            &coin,
            config.as_ref(),
            output.as_ref(),
            json,
        ),
        Command::ListCoins { data } => run_list_coins(&data),
        Command::Info { data, coin } => run_info(&data, &coin),
        Command::ValidateConfig { config } => run_validate_config(&config),
    }
}

fn fail(err: AnalyzerError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(&err)
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(fail)
}

/// Supported on-disk layouts of the price store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Csv,
}

impl DataFormat {
    /// Explicit `format` wins; otherwise a directory is read as CSV files and
    /// anything else as a JSON store.
    pub fn resolve(path: &Path, format: Option<&str>) -> Result<Self, AnalyzerError> {
        match format.map(|f| f.trim().to_lowercase()) {
            Some(f) if f == "json" => Ok(DataFormat::Json),
            Some(f) if f == "csv" => Ok(DataFormat::Csv),
            Some(f) => Err(AnalyzerError::ConfigInvalid {
                section: "data".into(),
                key: "format".into(),
                reason: format!("unknown data format '{}'", f),
            }),
            None if path.is_dir() => Ok(DataFormat::Csv),
            None => Ok(DataFormat::Json),
        }
    }
}

pub fn open_data_port(
    path: &Path,
    format: Option<&str>,
) -> Result<Box<dyn DataPort>, AnalyzerError> {
    match DataFormat::resolve(path, format)? {
        DataFormat::Json => Ok(Box::new(JsonStoreAdapter::open(path)?)),
        DataFormat::Csv => Ok(Box::new(CsvAdapter::new(path.to_path_buf()))),
    }
}

fn window(config: &dyn ConfigPort, section: &str, key: &str, default: usize) -> usize {
    config.get_int(section, key, default as i64).max(0) as usize
}

/// Read `[indicators]`, `[trend]` and `[aggregate]`, falling back to the
/// engine defaults for missing keys. The config is validated first.
pub fn build_analysis_config(config: &dyn ConfigPort) -> Result<AnalysisConfig, AnalyzerError> {
    validate_analysis_config(config)?;

    let d = AnalysisConfig::default();
    let ind = "indicators";
    Ok(AnalysisConfig {
        sma_window: window(config, ind, "sma_window", d.sma_window),
        ema_window: window(config, ind, "ema_window", d.ema_window),
        rsi_window: window(config, ind, "rsi_window", d.rsi_window),
        macd_fast: window(config, ind, "macd_fast", d.macd_fast),
        macd_slow: window(config, ind, "macd_slow", d.macd_slow),
        macd_signal: window(config, ind, "macd_signal", d.macd_signal),
        bollinger_window: window(config, ind, "bollinger_window", d.bollinger_window),
        bollinger_k: config.get_double(ind, "bollinger_k", d.bollinger_k),
        volatility_window: window(config, ind, "volatility_window", d.volatility_window),
        stochastic_window: window(config, ind, "stochastic_window", d.stochastic_window),
        stochastic_smooth: window(config, ind, "stochastic_smooth", d.stochastic_smooth),
        mfi_period: window(config, ind, "mfi_period", d.mfi_period),
        ichimoku: IchimokuParams {
            conversion: window(config, ind, "ichimoku_conversion", d.ichimoku.conversion),
            base: window(config, ind, "ichimoku_base", d.ichimoku.base),
            span_b: window(config, ind, "ichimoku_span_b", d.ichimoku.span_b),
            lag: window(config, ind, "ichimoku_lag", d.ichimoku.lag),
        },
        fibonacci_period: window(config, ind, "fibonacci_period", d.fibonacci_period),
        sar: SarParams {
            af_start: config.get_double(ind, "sar_af_start", d.sar.af_start),
            af_step: config.get_double(ind, "sar_af_step", d.sar.af_step),
            af_max: config.get_double(ind, "sar_af_max", d.sar.af_max),
        },
        trend_short: window(config, "trend", "short_window", d.trend_short),
        trend_long: window(config, "trend", "long_window", d.trend_long),
        include_extended: config.get_bool("aggregate", "include_extended", d.include_extended),
    })
}

/// Fetch, normalize and analyze one coin.
pub fn analyze_coin(
    data_port: &dyn DataPort,
    coin: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalyzerError> {
    let raw = data_port.fetch_series(coin)?;
    let series = MarketSeries::from_raw(&raw)?;
    analyze(&series, config)
}

fn print_summary(coin: &str, report: &AnalysisReport) {
    let fmt_change = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |c| format!("{:+.2}%", c));
    let s = &report.snapshot;

    eprintln!("\n=== {} ===", coin.to_uppercase());
    eprintln!("Price:            {:.2}", s.current_price);
    eprintln!("24h change:       {}", fmt_change(s.change_24h));
    eprintln!("7d change:        {}", fmt_change(s.change_7d));
    eprintln!("30d change:       {}", fmt_change(s.change_30d));
    match report.trend.label {
        Some(label) => eprintln!("Trend:            {}", label),
        None => eprintln!("Trend:            insufficient data"),
    }

    eprintln!("\n=== Signals ===");
    let sections = [
        ("RSI", &report.rsi.interpretation),
        ("MACD", &report.macd.interpretation),
        ("Stochastic", &report.stochastic.interpretation),
        ("MFI", &report.mfi.interpretation),
        ("Ichimoku", &report.ichimoku.interpretation),
        ("Fibonacci", &report.fibonacci.interpretation),
        ("Parabolic SAR", &report.parabolic_sar.interpretation),
    ];
    for (name, interpretation) in sections {
        let signal = interpretation
            .signal
            .map_or_else(|| "n/a".to_string(), |s| s.to_string());
        eprintln!("  {:<14} {:<16} {}", name, signal, interpretation.narrative);
    }

    eprintln!("\n=== Verdict: {} ===", report.verdict.outlook);
    eprintln!("{}", report.verdict.narrative);
}

fn run_analyze(
    data_path: Option<&PathBuf>,
    coin: &str,
    config_path: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
    json: bool,
) -> ExitCode {
    // Stage 1: Load and validate config
    let config_adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => Some(a),
                Err(code) => return code,
            }
        }
        None => None,
    };

    let analysis_config = match &config_adapter {
        Some(adapter) => match build_analysis_config(adapter) {
            Ok(c) => c,
            Err(e) => return fail(e),
        },
        None => AnalysisConfig::default(),
    };

    // Stage 2: Resolve data source
    let data_path = match data_path.cloned().or_else(|| {
        config_adapter
            .as_ref()
            .and_then(|a| a.get_string("data", "path"))
            .map(PathBuf::from)
    }) {
        Some(p) => p,
        None => {
            return fail(AnalyzerError::ConfigMissing {
                section: "data".into(),
                key: "path".into(),
            })
        }
    };
    let format = config_adapter
        .as_ref()
        .and_then(|a| a.get_string("data", "format"));

    let data_port = match open_data_port(&data_path, format.as_deref()) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    // Stage 3: Analyze
    eprintln!("Analyzing {} from {}", coin, data_path.display());
    let report = match analyze_coin(data_port.as_ref(), coin, &analysis_config) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };

    // Stage 4: Console summary and outputs
    print_summary(coin, &report);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => return fail(AnalyzerError::Io(e.into())),
        }
    }

    if let Some(output) = output_path {
        let adapter = MarkdownReportAdapter::new();
        if let Err(e) = adapter.write(&report, coin, &output.to_string_lossy()) {
            return fail(e);
        }
        eprintln!("\nReport written to: {}", output.display());
    }

    ExitCode::SUCCESS
}

fn run_list_coins(data_path: &Path) -> ExitCode {
    let data_port = match open_data_port(data_path, None) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    let coins = match data_port.list_coins() {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    if coins.is_empty() {
        eprintln!("No coins found in {}", data_path.display());
    } else {
        for coin in &coins {
            println!("{}\t{}", coin.id, coin.symbol);
        }
        eprintln!("{} coins", coins.len());
    }
    ExitCode::SUCCESS
}

fn run_info(data_path: &Path, coin: &str) -> ExitCode {
    let data_port = match open_data_port(data_path, None) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    let series = match data_port
        .fetch_series(coin)
        .and_then(|raw| MarketSeries::from_raw(&raw))
    {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let fmt_date = |ms: i64| {
        chrono::DateTime::from_timestamp_millis(ms)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| ms.to_string())
    };

    println!("{}:", coin);
    println!("  Points:         {}", series.len());
    println!(
        "  Range:          {} to {}",
        fmt_date(series.first_date()),
        fmt_date(series.last_date())
    );
    println!("  Current price:  {:.2}", series.current_price());
    match data_port.last_updated() {
        Ok(Some(ts)) => println!("  Last updated:   {}", ts.format("%Y-%m-%d %H:%M:%S")),
        Ok(None) => println!("  Last updated:   unknown"),
        Err(e) => eprintln!("warning: {e}"),
    }
    ExitCode::SUCCESS
}

fn run_validate_config(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match build_analysis_config(&adapter) {
        Ok(config) => {
            eprintln!("Config is valid");
            eprintln!(
                "  MACD({},{},{}), RSI({}), trend SMA {} vs {}, extended votes: {}",
                config.macd_fast,
                config.macd_slow,
                config.macd_signal,
                config.rsi_window,
                config.trend_short,
                config.trend_long,
                if config.include_extended { "on" } else { "off" }
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
