//! Price/volume series normalization.
//!
//! Raw series arrive as paired `[timestamp, value]` entries. [`MarketSeries`]
//! holds them as three parallel arrays ordered oldest to newest, which is the
//! shape every indicator consumes.

use crate::domain::error::AnalyzerError;
use serde::{Deserialize, Serialize};

/// Window used for the "recent" high/low/average figures.
pub const RECENT_PERIOD: usize = 30;

/// A single `(timestamp, value)` sample, timestamp in milliseconds since epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub value: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Series as handed over by a data source, before alignment.
#[derive(Debug, Clone, Default)]
pub struct RawSeries {
    pub prices: Vec<PricePoint>,
    pub volumes: Option<Vec<PricePoint>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSeries {
    dates: Vec<i64>,
    prices: Vec<f64>,
    volumes: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecentStats {
    pub high: f64,
    pub low: f64,
    pub average: f64,
}

impl MarketSeries {
    /// Build an aligned series.
    ///
    /// Volumes whose length differs from `prices` are replaced by `1.0` per
    /// point, so volume-weighted indicators degrade to their price-only form.
    /// A single non-finite volume discards the column the same way.
    pub fn new(
        dates: Vec<i64>,
        prices: Vec<f64>,
        volumes: Option<Vec<f64>>,
    ) -> Result<Self, AnalyzerError> {
        if prices.is_empty() {
            return Err(AnalyzerError::malformed("empty price series"));
        }
        if dates.len() != prices.len() {
            return Err(AnalyzerError::malformed(format!(
                "{} dates for {} prices",
                dates.len(),
                prices.len()
            )));
        }
        if let Some(idx) = prices.iter().position(|p| !p.is_finite()) {
            return Err(AnalyzerError::malformed(format!(
                "non-finite price at index {}",
                idx
            )));
        }

        let volumes = match volumes {
            Some(v) if v.len() != prices.len() => {
                tracing::warn!(
                    volumes = v.len(),
                    prices = prices.len(),
                    "volume length mismatch, falling back to unit volumes"
                );
                vec![1.0; prices.len()]
            }
            Some(v) => match v.iter().position(|x| !x.is_finite()) {
                Some(idx) => {
                    tracing::warn!(
                        index = idx,
                        "non-finite volume, falling back to unit volumes"
                    );
                    vec![1.0; prices.len()]
                }
                None => v,
            },
            None => vec![1.0; prices.len()],
        };

        Ok(Self {
            dates,
            prices,
            volumes,
        })
    }

    /// Split paired entries into parallel arrays. Volume timestamps are not
    /// cross-checked; only the value column is used.
    pub fn from_points(
        prices: &[PricePoint],
        volumes: Option<&[PricePoint]>,
    ) -> Result<Self, AnalyzerError> {
        let dates = prices.iter().map(|p| p.timestamp).collect();
        let values = prices.iter().map(|p| p.value).collect();
        let volumes = volumes.map(|v| v.iter().map(|p| p.value).collect());
        Self::new(dates, values, volumes)
    }

    pub fn from_raw(raw: &RawSeries) -> Result<Self, AnalyzerError> {
        Self::from_points(&raw.prices, raw.volumes.as_deref())
    }

    pub fn dates(&self) -> &[i64] {
        &self.dates
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn current_price(&self) -> f64 {
        self.prices[self.prices.len() - 1]
    }

    /// Percentage change over the last `k` points. Needs `k + 1` points.
    pub fn price_change_pct(&self, k: usize) -> Option<f64> {
        let n = self.prices.len();
        if k == 0 || n < k + 1 {
            return None;
        }
        let base = self.prices[n - 1 - k];
        if base == 0.0 {
            return None;
        }
        Some((self.prices[n - 1] - base) / base * 100.0)
    }

    pub fn change_24h(&self) -> Option<f64> {
        self.price_change_pct(1)
    }

    pub fn change_7d(&self) -> Option<f64> {
        self.price_change_pct(7)
    }

    pub fn change_30d(&self) -> Option<f64> {
        self.price_change_pct(30)
    }

    /// High, low and mean of the last `period` prices (or all of them when
    /// the series is shorter).
    pub fn recent_stats(&self, period: usize) -> RecentStats {
        let start = self.prices.len().saturating_sub(period.max(1));
        let window = &self.prices[start..];
        let high = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let low = window.iter().copied().fold(f64::INFINITY, f64::min);
        let average = window.iter().sum::<f64>() / window.len() as f64;
        RecentStats { high, low, average }
    }

    pub fn first_date(&self) -> i64 {
        self.dates[0]
    }

    pub fn last_date(&self) -> i64 {
        self.dates[self.dates.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(prices: &[f64]) -> MarketSeries {
        let dates = (0..prices.len() as i64).map(|i| i * 86_400_000).collect();
        MarketSeries::new(dates, prices.to_vec(), None).unwrap()
    }

    #[test]
    fn empty_series_is_malformed() {
        let err = MarketSeries::new(vec![], vec![], None).unwrap_err();
        assert!(matches!(err, AnalyzerError::MalformedInput { .. }));
    }

    #[test]
    fn mismatched_dates_are_malformed() {
        let err = MarketSeries::new(vec![1, 2], vec![1.0], None).unwrap_err();
        assert!(matches!(err, AnalyzerError::MalformedInput { .. }));
    }

    #[test]
    fn non_finite_price_is_malformed() {
        let err = MarketSeries::new(vec![1, 2], vec![1.0, f64::NAN], None).unwrap_err();
        assert!(matches!(err, AnalyzerError::MalformedInput { reason } if reason.contains("index 1")));
    }

    #[test]
    fn missing_volumes_default_to_one() {
        let s = series(&[1.0, 2.0, 3.0]);
        assert_eq!(s.volumes(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn mismatched_volumes_default_to_one() {
        let s = MarketSeries::new(vec![1, 2, 3], vec![1.0, 2.0, 3.0], Some(vec![5.0])).unwrap();
        assert_eq!(s.volumes(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn non_finite_volume_defaults_to_one() {
        let s = MarketSeries::new(
            vec![1, 2, 3],
            vec![1.0, 2.0, 3.0],
            Some(vec![10.0, f64::NAN, 30.0]),
        )
        .unwrap();
        assert_eq!(s.volumes(), &[1.0, 1.0, 1.0]);

        let s = MarketSeries::new(vec![1, 2], vec![1.0, 2.0], Some(vec![f64::INFINITY, 5.0])).unwrap();
        assert_eq!(s.volumes(), &[1.0, 1.0]);
    }

    #[test]
    fn matching_volumes_are_kept() {
        let s = MarketSeries::new(vec![1, 2], vec![1.0, 2.0], Some(vec![10.0, 20.0])).unwrap();
        assert_eq!(s.volumes(), &[10.0, 20.0]);
    }

    #[test]
    fn from_points_splits_pairs() {
        let prices = vec![PricePoint::new(1000, 10.0), PricePoint::new(2000, 11.0)];
        let volumes = vec![PricePoint::new(1000, 5.0), PricePoint::new(2000, 6.0)];
        let s = MarketSeries::from_points(&prices, Some(&volumes)).unwrap();
        assert_eq!(s.dates(), &[1000, 2000]);
        assert_eq!(s.prices(), &[10.0, 11.0]);
        assert_eq!(s.volumes(), &[5.0, 6.0]);
        assert_eq!(s.first_date(), 1000);
        assert_eq!(s.last_date(), 2000);
    }

    #[test]
    fn current_price_is_last() {
        let s = series(&[1.0, 2.0, 3.5]);
        assert_eq!(s.current_price(), 3.5);
    }

    #[test]
    fn change_requires_k_plus_one_points() {
        let s = series(&[100.0; 7]);
        assert!(s.change_7d().is_none());
        let s = series(&[100.0; 8]);
        assert!(s.change_7d().is_some());
    }

    #[test]
    fn change_24h_value() {
        let s = series(&[100.0, 110.0]);
        assert_relative_eq!(s.change_24h().unwrap(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn change_30d_uses_point_thirty_back() {
        let mut prices = vec![50.0];
        prices.extend(std::iter::repeat(80.0).take(29));
        prices.push(100.0);
        let s = series(&prices);
        assert_relative_eq!(s.change_30d().unwrap(), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn recent_stats_uses_tail() {
        let mut prices = vec![1000.0];
        prices.extend((1..=30).map(|i| i as f64));
        let s = series(&prices);
        let stats = s.recent_stats(RECENT_PERIOD);
        assert_eq!(stats.high, 30.0);
        assert_eq!(stats.low, 1.0);
        assert_relative_eq!(stats.average, 15.5, epsilon = 1e-12);
    }

    #[test]
    fn recent_stats_short_series_uses_all() {
        let s = series(&[2.0, 4.0]);
        let stats = s.recent_stats(RECENT_PERIOD);
        assert_eq!(stats.high, 4.0);
        assert_eq!(stats.low, 2.0);
        assert_eq!(stats.average, 3.0);
    }
}
