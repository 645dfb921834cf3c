//! Fibonacci retracement levels over the most recent `period` prices.
//!
//! level = min + pct × (max - min) for the standard ratios below.

use serde::Serialize;

pub const DEFAULT_PERIOD: usize = 30;

/// `(label, ratio)` pairs, lowest first.
pub const RATIOS: [(&str, f64); 7] = [
    ("0", 0.0),
    ("23.6", 0.236),
    ("38.2", 0.382),
    ("50", 0.5),
    ("61.8", 0.618),
    ("78.6", 0.786),
    ("100", 1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibonacciLevel {
    pub label: &'static str,
    pub ratio: f64,
    pub price: f64,
}

impl FibonacciLevel {
    pub fn is_lowest(&self) -> bool {
        self.ratio == 0.0
    }

    pub fn is_highest(&self) -> bool {
        self.ratio == 1.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FibonacciLevels {
    pub levels: Vec<FibonacciLevel>,
}

impl FibonacciLevels {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.levels.iter().find(|l| l.label == label).map(|l| l.price)
    }
}

pub fn calculate_fibonacci(prices: &[f64], period: usize) -> Option<FibonacciLevels> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let recent = &prices[prices.len() - period..];
    let max = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = recent.iter().copied().fold(f64::INFINITY, f64::min);
    let diff = max - min;

    let levels = RATIOS
        .iter()
        .map(|&(label, ratio)| FibonacciLevel {
            label,
            ratio,
            price: if ratio == 1.0 { max } else { min + ratio * diff },
        })
        .collect();

    Some(FibonacciLevels { levels })
}
