// =============================================================================
// Commodity Channel Index (CCI)
// =============================================================================
//
//   SMA_t = mean(window_t)
//   MD_t  = mean(|x - SMA_t| for x in window_t)
//   CCI_t = (close_t - SMA_t) / (0.015 * MD_t)
//
// A flat window has MD = 0; CCI is 0 there rather than NaN/Infinity.
// =============================================================================

use crate::indicators::sma::calculate_sma;
use crate::types::PricePoint;

pub const DEFAULT_CCI_PERIOD: usize = 14;

/// Lambert's constant: scales CCI so ~70–80% of values fall within ±100.
const LAMBERT: f64 = 0.015;

/// Compute CCI for every full trailing window.
pub fn calculate_cci(series: &[PricePoint], period: usize) -> Vec<PricePoint> {
    let sma = calculate_sma(series, period);

    series
        .windows(period.max(1))
        .zip(&sma)
        .map(|(window, mean)| {
            let close = window[window.len() - 1];
            let mean_dev =
                window.iter().map(|p| (p.value - mean.value).abs()).sum::<f64>() / period as f64;
            let cci = if mean_dev == 0.0 {
                0.0
            } else {
                (close.value - mean.value) / (LAMBERT * mean_dev)
            };
            PricePoint::new(close.time, cci)
        })
        .collect()
}
