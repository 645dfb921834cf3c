//! Shared helper functions for indicator calculations.
//!
//! Everything here works on plain `f64` slices and right-aligned
//! [`Series`] values: index `i` of an output always corresponds to index `i`
//! of the input prices.

use crate::domain::indicator::Series;

/// Apply `f` to every full trailing window. Positions before the first full
/// window are `None`.
pub fn rolling<F>(values: &[f64], window: usize, f: F) -> Series
where
    F: Fn(&[f64]) -> f64,
{
    (0..values.len())
        .map(|i| {
            if window > 0 && i + 1 >= window {
                Some(f(&values[i + 1 - window..=i]))
            } else {
                None
            }
        })
        .collect()
}

pub fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

pub fn window_max(window: &[f64]) -> f64 {
    window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

pub fn window_min(window: &[f64]) -> f64 {
    window.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Midpoint of the highest and lowest value in the window.
pub fn window_midpoint(window: &[f64]) -> f64 {
    (window_max(window) + window_min(window)) / 2.0
}

/// Sample standard deviation (divides by n-1). Zero for fewer than two values.
pub fn sample_stddev(window: &[f64]) -> f64 {
    let n = window.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(window);
    let variance = window.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Wrap a fully-computed vector, hiding the first `warmup` entries.
pub fn mask_warmup(values: Vec<f64>, warmup: usize) -> Series {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| if i < warmup { None } else { Some(v) })
        .collect()
}

/// Report the value computed at `i` at position `i + periods`. Output keeps
/// the input length, so the last `periods` computed values fall off the end.
pub fn shift_forward(series: &[Option<f64>], periods: usize) -> Series {
    (0..series.len())
        .map(|i| if i >= periods { series[i - periods] } else { None })
        .collect()
}

/// Report the value at `i + periods` at position `i`, padding the tail with `None`.
pub fn shift_backward(values: &[f64], periods: usize) -> Series {
    (0..values.len())
        .map(|i| values.get(i + periods).copied())
        .collect()
}

pub fn last_value(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

/// `(previous, current)` when both of the last two entries are present.
pub fn last_two(series: &[Option<f64>]) -> Option<(f64, f64)> {
    let n = series.len();
    if n < 2 {
        return None;
    }
    Some((series[n - 2]?, series[n - 1]?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rolling_pads_warmup() {
        let out = rolling(&[1.0, 2.0, 3.0, 4.0], 3, mean);
        assert_eq!(out, vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn rolling_zero_window_is_all_none() {
        let out = rolling(&[1.0, 2.0], 0, mean);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn window_extremes_and_midpoint() {
        let w = [3.0, 9.0, 1.0, 4.0];
        assert_eq!(window_max(&w), 9.0);
        assert_eq!(window_min(&w), 1.0);
        assert_eq!(window_midpoint(&w), 5.0);
    }

    #[test]
    fn sample_stddev_known_value() {
        // mean 5, squared deviations sum 32, n-1 = 7
        let w = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_stddev(&w), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn sample_stddev_single_value_is_zero() {
        assert_eq!(sample_stddev(&[42.0]), 0.0);
    }

    #[test]
    fn mask_warmup_hides_prefix() {
        assert_eq!(
            mask_warmup(vec![1.0, 2.0, 3.0], 2),
            vec![None, None, Some(3.0)]
        );
    }

    #[test]
    fn shift_forward_moves_values_later() {
        let s = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        assert_eq!(shift_forward(&s, 2), vec![None, None, Some(1.0), Some(2.0)]);
    }

    #[test]
    fn shift_backward_moves_values_earlier() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(shift_backward(&v, 1), vec![Some(2.0), Some(3.0), Some(4.0), None]);
    }

    #[test]
    fn last_two_requires_both() {
        assert_eq!(last_two(&[Some(1.0), Some(2.0)]), Some((1.0, 2.0)));
        assert_eq!(last_two(&[None, Some(2.0)]), None);
        assert_eq!(last_two(&[Some(2.0)]), None);
    }

    #[test]
    fn last_value_skips_missing_tail() {
        assert_eq!(last_value(&[Some(1.0), None]), None);
        assert_eq!(last_value(&[None, Some(3.0)]), Some(3.0));
        assert_eq!(last_value(&[]), None);
    }
}
