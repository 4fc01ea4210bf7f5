// Awesome Oscillator: AO_t = SMA(5)_t - SMA(34)_t, defined from index 33.

use crate::indicators::sma::calculate_sma;
use crate::types::PricePoint;

pub const FAST_PERIOD: usize = 5;
pub const SLOW_PERIOD: usize = 34;

/// Compute the Awesome Oscillator with the standard 5/34 periods.
pub fn calculate_awesome(series: &[PricePoint]) -> Vec<PricePoint> {
    calculate_awesome_with(series, FAST_PERIOD, SLOW_PERIOD)
}

/// AO for arbitrary periods; starts at index `slow - 1`.  Empty when
/// `fast > slow` or either period is 0.
pub fn calculate_awesome_with(series: &[PricePoint], fast: usize, slow: usize) -> Vec<PricePoint> {
    if fast == 0 || fast > slow {
        return Vec::new();
    }

    let fast_sma = calculate_sma(series, fast);
    let slow_sma = calculate_sma(series, slow);

    // fast_sma[k] ends at index k + fast - 1; align it with slow_sma[0]
    let offset = slow - fast;
    fast_sma
        .iter()
        .skip(offset)
        .zip(&slow_sma)
        .map(|(f, s)| PricePoint::new(s.time, f.value - s.value))
        .collect()
}
