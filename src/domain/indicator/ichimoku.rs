//! Ichimoku Cloud.
//!
//! Closes stand in for highs and lows.
//! - Tenkan-sen: midpoint of the `conversion` window
//! - Kijun-sen: midpoint of the `base` window
//! - Senkou Span A: (Tenkan + Kijun) / 2, reported `base` periods later
//! - Senkou Span B: midpoint of the `span_b` window, reported `base` periods later
//! - Chikou Span: close reported `lag` periods earlier
//!
//! Every line keeps the input length. Shifted lines are padded with `None`
//! at the front (spans) or the back (chikou); values shifted past the last
//! index are dropped.
//!
//! Minimum length: span_b.

use crate::domain::indicator::Series;
use crate::domain::indicator_helpers::{rolling, shift_backward, shift_forward, window_midpoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IchimokuParams {
    pub conversion: usize,
    pub base: usize,
    pub span_b: usize,
    pub lag: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            conversion: 9,
            base: 26,
            span_b: 52,
            lag: 26,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IchimokuSeries {
    pub tenkan: Series,
    pub kijun: Series,
    pub span_a: Series,
    pub span_b: Series,
    pub chikou: Series,
}

pub fn calculate_ichimoku(prices: &[f64], params: IchimokuParams) -> Option<IchimokuSeries> {
    if params.conversion == 0
        || params.base == 0
        || params.span_b == 0
        || prices.len() < params.span_b
    {
        return None;
    }

    let tenkan = rolling(prices, params.conversion, window_midpoint);
    let kijun = rolling(prices, params.base, window_midpoint);

    let span_a_unshifted: Series = tenkan
        .iter()
        .zip(kijun.iter())
        .map(|(t, k)| Some((t.as_ref()? + k.as_ref()?) / 2.0))
        .collect();
    let span_b_unshifted = rolling(prices, params.span_b, window_midpoint);

    Some(IchimokuSeries {
        span_a: shift_forward(&span_a_unshifted, params.base),
        span_b: shift_forward(&span_b_unshifted, params.base),
        chikou: shift_backward(prices, params.lag),
        tenkan,
        kijun,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn ichimoku_insufficient_data() {
        assert!(calculate_ichimoku(&rising(51), IchimokuParams::default()).is_none());
        assert!(calculate_ichimoku(&rising(52), IchimokuParams::default()).is_some());
    }

    #[test]
    fn ichimoku_lines_keep_length() {
        let ichi = calculate_ichimoku(&rising(90), IchimokuParams::default()).unwrap();
        assert_eq!(ichi.tenkan.len(), 90);
        assert_eq!(ichi.kijun.len(), 90);
        assert_eq!(ichi.span_a.len(), 90);
        assert_eq!(ichi.span_b.len(), 90);
        assert_eq!(ichi.chikou.len(), 90);
    }

    #[test]
    fn ichimoku_tenkan_kijun_midpoints() {
        let prices = rising(60);
        let ichi = calculate_ichimoku(&prices, IchimokuParams::default()).unwrap();
        assert!(ichi.tenkan[7].is_none());
        // window 51..=59 -> (51 + 59) / 2
        assert_relative_eq!(ichi.tenkan[59].unwrap(), 55.0);
        assert!(ichi.kijun[24].is_none());
        // window 34..=59 -> (34 + 59) / 2
        assert_relative_eq!(ichi.kijun[59].unwrap(), 46.5);
    }

    #[test]
    fn ichimoku_span_a_shifted_forward_by_base() {
        let prices = rising(90);
        let p = IchimokuParams::default();
        let ichi = calculate_ichimoku(&prices, p).unwrap();
        // Span A first exists where Kijun first exists, shifted by base.
        let first = p.base - 1 + p.base;
        assert!(ichi.span_a[first - 1].is_none());
        let expected = (ichi.tenkan[p.base - 1].unwrap() + ichi.kijun[p.base - 1].unwrap()) / 2.0;
        assert_relative_eq!(ichi.span_a[first].unwrap(), expected);
        let at_end = (ichi.tenkan[89 - p.base].unwrap() + ichi.kijun[89 - p.base].unwrap()) / 2.0;
        assert_relative_eq!(ichi.span_a[89].unwrap(), at_end);
    }

    #[test]
    fn ichimoku_span_b_shifted_forward_by_base() {
        let prices = rising(90);
        let p = IchimokuParams::default();
        let ichi = calculate_ichimoku(&prices, p).unwrap();
        let first = p.span_b - 1 + p.base;
        assert!(ichi.span_b[first - 1].is_none());
        // computed at index 51 over 0..=51 -> 25.5
        assert_relative_eq!(ichi.span_b[first].unwrap(), 25.5);
    }

    #[test]
    fn ichimoku_span_b_absent_when_shift_exceeds_length() {
        let ichi = calculate_ichimoku(&rising(60), IchimokuParams::default()).unwrap();
        assert!(ichi.span_b.iter().all(Option::is_none));
    }

    #[test]
    fn ichimoku_chikou_shifted_backward() {
        let prices = rising(60);
        let ichi = calculate_ichimoku(&prices, IchimokuParams::default()).unwrap();
        assert_relative_eq!(ichi.chikou[0].unwrap(), 26.0);
        assert_relative_eq!(ichi.chikou[33].unwrap(), 59.0);
        assert!(ichi.chikou[34].is_none());
        assert!(ichi.chikou[59].is_none());
    }
}
