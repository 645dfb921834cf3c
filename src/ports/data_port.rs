//! Data access port trait.

use crate::domain::error::AnalyzerError;
use crate::domain::series::RawSeries;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A coin available from a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinListing {
    pub id: String,
    pub symbol: String,
}

pub trait DataPort {
    /// Coins with stored series, sorted by id.
    fn list_coins(&self) -> Result<Vec<CoinListing>, AnalyzerError>;

    /// Raw price and volume history for one coin, oldest first.
    /// `NoData` when the coin is unknown to the source.
    fn fetch_series(&self, coin: &str) -> Result<RawSeries, AnalyzerError>;

    /// When the source was last refreshed, if it records that.
    fn last_updated(&self) -> Result<Option<NaiveDateTime>, AnalyzerError>;
}
