// =============================================================================
// Fibonacci Retracement Levels
// =============================================================================
//
// Seven static price levels between the global high and low of the series:
//   price = high - (high - low) * ratio
// Not a time series; the whole input collapses to seven scalars.
// =============================================================================

use serde::Serialize;

use crate::types::{value_range, PricePoint};

pub const FIBONACCI_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibonacciLevel {
    pub ratio: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FibonacciLevels {
    pub high: f64,
    pub low: f64,
    /// Descending from `high` (ratio 0) to `low` (ratio 1).
    pub levels: Vec<FibonacciLevel>,
}

/// Retracement levels of the whole series; empty input gives no levels and
/// `high == low == 0`.
pub fn fibonacci_levels(series: &[PricePoint]) -> FibonacciLevels {
    let Some((high, low)) = value_range(series) else {
        return FibonacciLevels::default();
    };

    let levels = FIBONACCI_RATIOS
        .iter()
        .map(|&ratio| FibonacciLevel {
            ratio,
            price: high - (high - low) * ratio,
        })
        .collect();

    FibonacciLevels { high, low, levels }
}
