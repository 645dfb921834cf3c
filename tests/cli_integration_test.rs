//! CLI integration tests for the analyze command orchestration.
//!
//! Tests cover:
//! - Config parsing (build_analysis_config) from INI files on disk
//! - Data source resolution (DataFormat, open_data_port)
//! - Full pipeline through a JSON store and a CSV directory
//! - Markdown report written through ReportPort

mod common;

use common::*;
use coinlens::adapters::file_config_adapter::FileConfigAdapter;
use coinlens::adapters::markdown_report_adapter::MarkdownReportAdapter;
use coinlens::cli::{self, DataFormat};
use coinlens::domain::aggregate::Outlook;
use coinlens::domain::analysis::AnalysisConfig;
use coinlens::domain::error::AnalyzerError;
use coinlens::ports::report_port::ReportPort;
use std::io::Write;
use std::process::ExitCode;
use tempfile::TempDir;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[data]
format = json

[indicators]
sma_window = 10
ema_window = 12
rsi_window = 10
macd_fast = 8
macd_slow = 21
macd_signal = 5
bollinger_window = 15
bollinger_k = 2.5
sar_af_max = 0.25

[trend]
short_window = 5
long_window = 20

[aggregate]
include_extended = yes
"#;

fn write_json_store(dir: &TempDir, coins: &[(&str, &str, &[f64])]) -> std::path::PathBuf {
    let path = dir.path().join("crypto_data.json");
    std::fs::write(&path, json_store(coins)).unwrap();
    path
}

fn write_csv(dir: &TempDir, coin: &str, prices: &[f64]) {
    let mut content = String::from("timestamp,price,volume\n");
    for (i, p) in prices.iter().enumerate() {
        content.push_str(&format!("{},{},{}\n", START_MS + i as i64 * DAY_MS, p, p * 10.0));
    }
    std::fs::write(dir.path().join(format!("{coin}.csv")), content).unwrap();
}

mod config_loading {
    use super::*;

    #[test]
    fn ini_values_override_defaults() {
        let file = write_temp_ini(VALID_INI);
        let config = cli::load_config(file.path()).unwrap();
        let analysis = cli::build_analysis_config(&config).unwrap();

        assert_eq!(analysis.sma_window, 10);
        assert_eq!(analysis.ema_window, 12);
        assert_eq!(analysis.rsi_window, 10);
        assert_eq!(analysis.macd_fast, 8);
        assert_eq!(analysis.macd_slow, 21);
        assert_eq!(analysis.macd_signal, 5);
        assert_eq!(analysis.bollinger_window, 15);
        assert_eq!(analysis.bollinger_k, 2.5);
        assert_eq!(analysis.sar.af_max, 0.25);
        assert_eq!(analysis.trend_short, 5);
        assert_eq!(analysis.trend_long, 20);
        assert!(analysis.include_extended);
    }

    #[test]
    fn empty_ini_gives_defaults() {
        let file = write_temp_ini("[data]\n");
        let config = cli::load_config(file.path()).unwrap();
        let analysis = cli::build_analysis_config(&config).unwrap();
        assert_eq!(analysis, AnalysisConfig::default());
    }

    #[test]
    fn invalid_macd_windows_rejected() {
        let config =
            FileConfigAdapter::from_string("[indicators]\nmacd_fast = 30\nmacd_slow = 20\n")
                .unwrap();
        let err = cli::build_analysis_config(&config).unwrap_err();
        assert!(matches!(err, AnalyzerError::ConfigInvalid { .. }));
        assert_eq!(ExitCode::from(&err), ExitCode::from(2));
    }

    #[test]
    fn missing_config_file_fails() {
        let result = cli::load_config(std::path::Path::new("/nonexistent/coinlens.ini"));
        assert!(result.is_err());
    }
}

mod data_sources {
    use super::*;

    #[test]
    fn directory_resolves_to_csv() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            DataFormat::resolve(dir.path(), None).unwrap(),
            DataFormat::Csv
        );
    }

    #[test]
    fn explicit_format_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            DataFormat::resolve(dir.path(), Some("JSON")).unwrap(),
            DataFormat::Json
        );
        assert!(DataFormat::resolve(dir.path(), Some("parquet")).is_err());
    }

    #[test]
    fn missing_json_store_is_error() {
        let dir = TempDir::new().unwrap();
        let result = cli::open_data_port(&dir.path().join("missing.json"), Some("json"));
        assert!(result.is_err());
    }

    #[test]
    fn json_store_lists_coins() {
        let dir = TempDir::new().unwrap();
        let a = linear(40, 100.0, 1.0);
        let b = linear(40, 2.0, 0.01);
        let path = write_json_store(&dir, &[("bitcoin", "btc", &a), ("cardano", "ada", &b)]);

        let port = cli::open_data_port(&path, None).unwrap();
        let coins = port.list_coins().unwrap();
        let ids: Vec<&str> = coins.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "cardano"]);
        assert!(port.last_updated().unwrap().is_some());
    }
}

mod pipeline {
    use super::*;

    #[test]
    fn json_store_rising_coin_is_bullish() {
        let dir = TempDir::new().unwrap();
        let prices = geometric(120, 100.0, 1.01);
        let path = write_json_store(&dir, &[("bitcoin", "btc", &prices)]);

        let port = cli::open_data_port(&path, None).unwrap();
        let report = cli::analyze_coin(port.as_ref(), "bitcoin", &AnalysisConfig::default())
            .unwrap();
        assert_eq!(report.points, 120);
        assert_eq!(report.verdict.outlook, Outlook::Bullish);
    }

    #[test]
    fn csv_directory_falling_coin_is_bearish() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "ethereum", &linear(120, 1000.0, -5.0));

        let port = cli::open_data_port(dir.path(), None).unwrap();
        let report = cli::analyze_coin(port.as_ref(), "ethereum", &AnalysisConfig::default())
            .unwrap();
        assert_eq!(report.verdict.outlook, Outlook::Bearish);
    }

    #[test]
    fn unknown_coin_in_store_is_no_data() {
        let dir = TempDir::new().unwrap();
        let prices = linear(40, 100.0, 1.0);
        let path = write_json_store(&dir, &[("bitcoin", "btc", &prices)]);

        let port = cli::open_data_port(&path, None).unwrap();
        let err = cli::analyze_coin(port.as_ref(), "solana", &AnalysisConfig::default())
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::NoData { .. }));
        assert_eq!(ExitCode::from(&err), ExitCode::from(5));
    }

    #[test]
    fn report_written_from_ini_config() {
        let dir = TempDir::new().unwrap();
        let prices = wave(150, 30_000.0, 2_000.0);
        let store = write_json_store(&dir, &[("bitcoin", "btc", &prices)]);
        let ini = write_temp_ini(VALID_INI);

        let config = cli::load_config(ini.path()).unwrap();
        let analysis = cli::build_analysis_config(&config).unwrap();
        let port = cli::open_data_port(&store, None).unwrap();
        let report = cli::analyze_coin(port.as_ref(), "bitcoin", &analysis).unwrap();
        assert_eq!(report.verdict.tally.total(), 8);

        let output = dir.path().join("bitcoin.md");
        MarkdownReportAdapter::new()
            .write(&report, "bitcoin", output.to_str().unwrap())
            .unwrap();
        let md = std::fs::read_to_string(&output).unwrap();
        assert!(md.starts_with("# Technical analysis: BITCOIN"));
        assert!(md.contains("- SMA(10):"));
        assert!(md.contains("## Parabolic SAR"));
    }
}
