//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]). Warmup: first (n-1) points are `None`.

use crate::domain::indicator::Series;
use crate::domain::indicator_helpers::{mean, rolling};

pub const DEFAULT_WINDOW: usize = 7;

pub fn calculate_sma(prices: &[f64], window: usize) -> Option<Series> {
    if window == 0 || prices.len() < window {
        return None;
    }
    Some(rolling(prices, window, mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn sma_basic() {
        let sma = calculate_sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3).unwrap();
        assert_eq!(sma.len(), 5);
        assert!(sma[0].is_none());
        assert!(sma[1].is_none());
        assert_relative_eq!(sma[2].unwrap(), 20.0);
        assert_relative_eq!(sma[3].unwrap(), 30.0);
        assert_relative_eq!(sma[4].unwrap(), 40.0);
    }

    #[test]
    fn sma_insufficient_data() {
        assert!(calculate_sma(&[1.0, 2.0], 3).is_none());
    }

    #[test]
    fn sma_zero_window() {
        assert!(calculate_sma(&[1.0, 2.0], 0).is_none());
    }

    #[test]
    fn sma_window_equals_length() {
        let sma = calculate_sma(&[2.0, 4.0, 6.0], 3).unwrap();
        assert_eq!(sma, vec![None, None, Some(4.0)]);
    }

    proptest! {
        #[test]
        fn sma_window_contract(
            prices in prop::collection::vec(1.0f64..1000.0, 0..60),
            window in 1usize..40,
        ) {
            match calculate_sma(&prices, window) {
                None => prop_assert!(prices.len() < window),
                Some(sma) => {
                    prop_assert_eq!(sma.len(), prices.len());
                    prop_assert!(sma[..window - 1].iter().all(Option::is_none));
                    prop_assert!(sma[window - 1..].iter().all(Option::is_some));
                }
            }
        }
    }
}
