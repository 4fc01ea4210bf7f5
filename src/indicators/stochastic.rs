// =============================================================================
// Stochastic Oscillator — zero-centered %K
// =============================================================================
//
//   %K_t = (close_t - lowest) / (highest - lowest) * 100 - 50
//
// highest / lowest span the trailing `period` closes *including* `t`, so the
// line ranges over [-50, 50].  A flat window yields 0.
//
// %D is the SMA of %K (`stochastic_signal`).
// =============================================================================

use crate::indicators::sma::calculate_sma;
use crate::types::PricePoint;

pub const DEFAULT_STOCHASTIC_PERIOD: usize = 14;
pub const DEFAULT_SIGNAL_PERIOD: usize = 3;

/// Compute zero-centered %K for every full trailing window.
pub fn calculate_stochastic(series: &[PricePoint], period: usize) -> Vec<PricePoint> {
    if period == 0 || series.len() < period {
        return Vec::new();
    }

    series
        .windows(period)
        .map(|window| {
            let close = window[period - 1];
            let (highest, lowest) = window.iter().fold((f64::MIN, f64::MAX), |(hi, lo), p| {
                (hi.max(p.value), lo.min(p.value))
            });
            let k = if highest == lowest {
                0.0
            } else {
                (close.value - lowest) / (highest - lowest) * 100.0 - 50.0
            };
            PricePoint::new(close.time, k)
        })
        .collect()
}

/// %D line: SMA of a %K series.
pub fn stochastic_signal(percent_k: &[PricePoint], period: usize) -> Vec<PricePoint> {
    calculate_sma(percent_k, period)
}
