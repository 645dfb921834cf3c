//! JSON store data adapter.
//!
//! Reads the collector's single-file store:
//!
//! ```json
//! {
//!   "bitcoin": {
//!     "symbol": "btc",
//!     "prices": [[1700000000000, 37000.5], ...],
//!     "total_volumes": [[1700000000000, 1.2e10], ...],
//!     "market_caps": [[1700000000000, 7.2e11], ...]
//!   },
//!   "last_updated": "2024-03-01 12:00:00"
//! }
//! ```
//!
//! Top-level entries without a `symbol` are metadata, not coins.

use crate::domain::error::AnalyzerError;
use crate::domain::series::{PricePoint, RawSeries};
use crate::ports::data_port::{CoinListing, DataPort};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const LAST_UPDATED_KEY: &str = "last_updated";
pub const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Deserialize)]
struct CoinRecord {
    symbol: String,
    #[serde(default)]
    prices: Vec<(f64, f64)>,
    #[serde(default)]
    total_volumes: Vec<(f64, f64)>,
}

pub struct JsonStoreAdapter {
    coins: BTreeMap<String, CoinRecord>,
    last_updated: Option<String>,
}

fn to_points(pairs: &[(f64, f64)]) -> Vec<PricePoint> {
    pairs
        .iter()
        .map(|&(ts, value)| PricePoint::new(ts as i64, value))
        .collect()
}

impl JsonStoreAdapter {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| AnalyzerError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_string(&content)
    }

    pub fn from_string(content: &str) -> Result<Self, AnalyzerError> {
        let root: Map<String, Value> =
            serde_json::from_str(content).map_err(|e| AnalyzerError::DataSource {
                reason: format!("JSON parse error: {}", e),
            })?;

        let mut coins = BTreeMap::new();
        let mut last_updated = None;
        for (key, value) in root {
            if key == LAST_UPDATED_KEY {
                last_updated = value.as_str().map(str::to_string);
                continue;
            }
            if value.get("symbol").is_none() {
                debug!(entry = %key, "skipping non-coin entry");
                continue;
            }
            let record: CoinRecord =
                serde_json::from_value(value).map_err(|e| AnalyzerError::DataSource {
                    reason: format!("invalid entry for {}: {}", key, e),
                })?;
            coins.insert(key, record);
        }

        debug!(coins = coins.len(), "loaded JSON store");
        Ok(Self {
            coins,
            last_updated,
        })
    }
}

impl DataPort for JsonStoreAdapter {
    fn list_coins(&self) -> Result<Vec<CoinListing>, AnalyzerError> {
        Ok(self
            .coins
            .iter()
            .map(|(id, record)| CoinListing {
                id: id.clone(),
                symbol: record.symbol.to_uppercase(),
            })
            .collect())
    }

    fn fetch_series(&self, coin: &str) -> Result<RawSeries, AnalyzerError> {
        let record = self.coins.get(coin).ok_or_else(|| AnalyzerError::NoData {
            coin: coin.to_string(),
        })?;
        if record.prices.is_empty() {
            return Err(AnalyzerError::NoData {
                coin: coin.to_string(),
            });
        }
        let volumes = if record.total_volumes.is_empty() {
            None
        } else {
            Some(to_points(&record.total_volumes))
        };
        Ok(RawSeries {
            prices: to_points(&record.prices),
            volumes,
        })
    }

    fn last_updated(&self) -> Result<Option<NaiveDateTime>, AnalyzerError> {
        self.last_updated
            .as_deref()
            .map(|s| {
                NaiveDateTime::parse_from_str(s, LAST_UPDATED_FORMAT).map_err(|e| {
                    AnalyzerError::DataSource {
                        reason: format!("invalid last_updated '{}': {}", s, e),
                    }
                })
            })
            .transpose()
    }
}
