//! CSV directory data adapter.
//!
//! One file per coin, `<coin>.csv`, with the header
//! `timestamp,price,volume`. Timestamps are milliseconds since epoch; the
//! volume column may be left empty.

use crate::domain::error::AnalyzerError;
use crate::domain::series::{PricePoint, RawSeries};
use crate::ports::data_port::{CoinListing, DataPort};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

const EXTENSION: &str = "csv";

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: i64,
    price: f64,
    volume: Option<f64>,
}

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, coin: &str) -> PathBuf {
        self.base_path.join(format!("{}.{}", coin, EXTENSION))
    }

    fn csv_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| AnalyzerError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AnalyzerError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl DataPort for CsvAdapter {
    fn list_coins(&self) -> Result<Vec<CoinListing>, AnalyzerError> {
        Ok(self
            .csv_files()?
            .iter()
            .filter_map(|path| path.file_stem())
            .map(|stem| {
                let id = stem.to_string_lossy().to_string();
                CoinListing {
                    symbol: id.to_uppercase(),
                    id,
                }
            })
            .collect())
    }

    fn fetch_series(&self, coin: &str) -> Result<RawSeries, AnalyzerError> {
        let path = self.csv_path(coin);
        if !path.exists() {
            return Err(AnalyzerError::NoData {
                coin: coin.to_string(),
            });
        }
        let content = fs::read_to_string(&path).map_err(|e| AnalyzerError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut rows = Vec::new();
        for result in rdr.deserialize::<CsvRow>() {
            let row = result.map_err(|e| AnalyzerError::DataSource {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            rows.push(row);
        }
        if rows.is_empty() {
            return Err(AnalyzerError::NoData {
                coin: coin.to_string(),
            });
        }
        rows.sort_by_key(|r| r.timestamp);

        let prices = rows
            .iter()
            .map(|r| PricePoint::new(r.timestamp, r.price))
            .collect();

        let with_volume = rows.iter().filter(|r| r.volume.is_some()).count();
        let volumes = if with_volume == rows.len() {
            Some(
                rows.iter()
                    .filter_map(|r| r.volume.map(|v| PricePoint::new(r.timestamp, v)))
                    .collect(),
            )
        } else {
            if with_volume > 0 {
                warn!(
                    coin,
                    rows = rows.len(),
                    with_volume,
                    "incomplete volume column, ignoring volumes"
                );
            }
            None
        };

        Ok(RawSeries { prices, volumes })
    }

    /// Modification time of the most recently written coin file.
    fn last_updated(&self) -> Result<Option<NaiveDateTime>, AnalyzerError> {
        let mut latest = None;
        for path in self.csv_files()? {
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .map_err(|e| AnalyzerError::DataSource {
                    reason: format!("failed to stat {}: {}", path.display(), e),
                })?;
            let ts = DateTime::<Utc>::from(modified).naive_utc();
            latest = latest.max(Some(ts));
        }
        Ok(latest)
    }
}
