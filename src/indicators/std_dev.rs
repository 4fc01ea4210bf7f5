// =============================================================================
// Rolling population standard deviation
// =============================================================================
//
//   mean     = sum(window) / period
//   variance = sum((x - mean)^2) / period      (divisor = period, not period-1)
//   stdDev   = sqrt(variance)
// =============================================================================

use crate::types::PricePoint;

pub const DEFAULT_STD_DEV_PERIOD: usize = 14;

/// Population standard deviation of `window` around `mean`.
pub(crate) fn population_std_dev(window: &[PricePoint], mean: f64) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let variance =
        window.iter().map(|p| (p.value - mean).powi(2)).sum::<f64>() / window.len() as f64;
    variance.sqrt()
}

/// Rolling standard deviation, one point per full trailing window stamped at
/// the window's last time.  Empty when `period == 0` or input is too short.
pub fn calculate_std_dev(series: &[PricePoint], period: usize) -> Vec<PricePoint> {
    if period == 0 || series.len() < period {
        return Vec::new();
    }

    series
        .windows(period)
        .map(|window| {
            let mean = window.iter().map(|p| p.value).sum::<f64>() / period as f64;
            let last = window[period - 1];
            PricePoint::new(last.time, population_std_dev(window, mean))
        })
        .collect()
}
