#![allow(dead_code)]

use chrono::NaiveDateTime;
use coinlens::domain::error::AnalyzerError;
pub use coinlens::domain::series::{MarketSeries, PricePoint, RawSeries};
use coinlens::ports::data_port::{CoinListing, DataPort};
use std::collections::BTreeMap;

pub const DAY_MS: i64 = 86_400_000;
/// 2024-01-01T00:00:00Z
pub const START_MS: i64 = 1_704_067_200_000;

pub struct MockDataPort {
    pub data: BTreeMap<String, RawSeries>,
    pub errors: BTreeMap<String, String>,
    pub updated: Option<NaiveDateTime>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            errors: BTreeMap::new(),
            updated: None,
        }
    }

    pub fn with_prices(mut self, coin: &str, prices: &[f64]) -> Self {
        self.data.insert(coin.to_string(), raw_series(prices, None));
        self
    }

    pub fn with_series(mut self, coin: &str, series: RawSeries) -> Self {
        self.data.insert(coin.to_string(), series);
        self
    }

    pub fn with_error(mut self, coin: &str, reason: &str) -> Self {
        self.errors.insert(coin.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn list_coins(&self) -> Result<Vec<CoinListing>, AnalyzerError> {
        Ok(self
            .data
            .keys()
            .map(|id| CoinListing {
                id: id.clone(),
                symbol: id.to_uppercase(),
            })
            .collect())
    }

    fn fetch_series(&self, coin: &str) -> Result<RawSeries, AnalyzerError> {
        if let Some(reason) = self.errors.get(coin) {
            return Err(AnalyzerError::DataSource {
                reason: reason.clone(),
            });
        }
        self.data
            .get(coin)
            .cloned()
            .ok_or_else(|| AnalyzerError::NoData {
                coin: coin.to_string(),
            })
    }

    fn last_updated(&self) -> Result<Option<NaiveDateTime>, AnalyzerError> {
        Ok(self.updated)
    }
}

/// Daily points starting at [`START_MS`].
pub fn points(values: &[f64]) -> Vec<PricePoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| PricePoint::new(START_MS + i as i64 * DAY_MS, v))
        .collect()
}

pub fn raw_series(prices: &[f64], volumes: Option<&[f64]>) -> RawSeries {
    RawSeries {
        prices: points(prices),
        volumes: volumes.map(points),
    }
}

pub fn market_series(prices: &[f64]) -> MarketSeries {
    MarketSeries::from_points(&points(prices), None).unwrap()
}

pub fn linear(n: usize, start: f64, step: f64) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

pub fn geometric(n: usize, start: f64, rate: f64) -> Vec<f64> {
    (0..n).map(|i| start * rate.powi(i as i32)).collect()
}

/// Bounded oscillation around `center`.
pub fn wave(n: usize, center: f64, amplitude: f64) -> Vec<f64> {
    (0..n)
        .map(|i| center + amplitude * (i as f64 * 0.35).sin())
        .collect()
}

fn json_pairs(values: &[f64]) -> serde_json::Value {
    points(values)
        .iter()
        .map(|p| serde_json::json!([p.timestamp, p.value]))
        .collect()
}

/// Collector-format JSON store holding the given coins, with volumes.
pub fn json_store(coins: &[(&str, &str, &[f64])]) -> String {
    let mut root = serde_json::Map::new();
    for (id, symbol, prices) in coins {
        let volumes: Vec<f64> = prices.iter().map(|p| p * 1000.0).collect();
        root.insert(
            id.to_string(),
            serde_json::json!({
                "symbol": symbol,
                "prices": json_pairs(prices),
                "total_volumes": json_pairs(&volumes),
                "market_caps": json_pairs(prices),
            }),
        );
    }
    root.insert(
        "last_updated".to_string(),
        serde_json::Value::String("2024-06-01 08:00:00".to_string()),
    );
    serde_json::Value::Object(root).to_string()
}
