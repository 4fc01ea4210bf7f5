// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Unweighted mean of the trailing `period` closes:
//   SMA_t = (close_{t-period+1} + ... + close_t) / period
//
// The first output point is stamped at index `period - 1`.
// =============================================================================

use crate::types::PricePoint;

/// Compute the SMA series for `series` with look-back `period`.
///
/// Output length is `max(0, len - period + 1)`.  Returns an empty vec when
/// `period == 0` or the input is shorter than `period`.
pub fn calculate_sma(series: &[PricePoint], period: usize) -> Vec<PricePoint> {
    if period == 0 || series.len() < period {
        return Vec::new();
    }

    let period_f = period as f64;
    let mut sum: f64 = series[..period].iter().map(|p| p.value).sum();

    let mut result = Vec::with_capacity(series.len() - period + 1);
    result.push(PricePoint::new(series[period - 1].time, sum / period_f));

    for i in period..series.len() {
        sum += series[i].value - series[i - period].value;
        result.push(PricePoint::new(series[i].time, sum / period_f));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_close, series_from};

    #[test]
    fn sma_known_values() {
        let series = series_from(&[10.0, 20.0, 10.0, 20.0]);
        let sma = calculate_sma(&series, 2);
        let got: Vec<f64> = sma.iter().map(|p| p.value).collect();
        assert_close(&got, &[15.0, 15.0, 15.0]);
        let times: Vec<_> = sma.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![2, 3, 4]);
    }

    #[test]
    fn sma_length() {
        let series = series_from(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        for period in 1..=7 {
            let expected = (series.len() + 1).saturating_sub(period);
            assert_eq!(calculate_sma(&series, period).len(), expected, "period {period}");
        }
    }

    #[test]
    fn sma_period_zero_and_short_input() {
        let series = series_from(&[1.0, 2.0]);
        assert!(calculate_sma(&series, 0).is_empty());
        assert!(calculate_sma(&series, 3).is_empty());
        assert!(calculate_sma(&[], 1).is_empty());
    }

    #[test]
    fn sma_constant_series() {
        let series = series_from(&[7.5; 12]);
        for p in calculate_sma(&series, 5) {
            assert!((p.value - 7.5).abs() < 1e-12);
        }
    }

    #[test]
    fn sma_matches_direct_window_mean() {
        let values = [4.0, 8.0, 15.0, 16.0, 23.0, 42.0, 4.0, 8.0];
        let series = series_from(&values);
        let sma = calculate_sma(&series, 3);
        for (k, p) in sma.iter().enumerate() {
            let direct: f64 = values[k..k + 3].iter().sum::<f64>() / 3.0;
            assert!((p.value - direct).abs() < 1e-9);
        }
    }
}
