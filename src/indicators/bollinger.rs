// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the population standard deviation
// of the same trailing window.
// =============================================================================

use crate::indicators::sma::calculate_sma;
use crate::indicators::std_dev::population_std_dev;
use crate::types::PricePoint;

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULTIPLIER: f64 = 2.0;

/// The three bands, index-aligned and stamped at each window's last time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BollingerBands {
    pub median: Vec<PricePoint>,
    pub upper: Vec<PricePoint>,
    pub lower: Vec<PricePoint>,
}

/// Calculate Bollinger Bands over every full trailing window.
///
/// Returns three empty series when `period == 0` or the input is shorter than
/// `period`.
pub fn calculate_bollinger(series: &[PricePoint], period: usize, multiplier: f64) -> BollingerBands {
    let median = calculate_sma(series, period);
    if median.is_empty() {
        return BollingerBands::default();
    }

    let mut upper = Vec::with_capacity(median.len());
    let mut lower = Vec::with_capacity(median.len());

    for (window, mid) in series.windows(period).zip(&median) {
        let std_dev = population_std_dev(window, mid.value);
        upper.push(PricePoint::new(mid.time, mid.value + multiplier * std_dev));
        lower.push(PricePoint::new(mid.time, mid.value - multiplier * std_dev));
    }

    BollingerBands {
        median,
        upper,
        lower,
    }
}
