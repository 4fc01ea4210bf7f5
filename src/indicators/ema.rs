// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_0      = close_0
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The series is seeded with the first close, so the output always carries one
// point per input point.  MACD relies on that to subtract two EMAs pointwise.
// =============================================================================

use crate::types::PricePoint;

/// Compute the EMA series for `series` with look-back `period`.
///
/// Output length always equals input length; each point keeps the time of the
/// input point it was computed at.
///
/// # Edge cases
/// - empty input => empty vec
/// - `period == 0` is treated as `period == 1` (multiplier 1, output = input)
pub fn calculate_ema(series: &[PricePoint], period: usize) -> Vec<PricePoint> {
    let Some(first) = series.first() else {
        return Vec::new();
    };

    let multiplier = 2.0 / (period.max(1) + 1) as f64;

    let mut result = Vec::with_capacity(series.len());
    result.push(*first);

    let mut prev_ema = first.value;
    for point in &series[1..] {
        let ema = point.value * multiplier + prev_ema * (1.0 - multiplier);
        result.push(PricePoint::new(point.time, ema));
        prev_ema = ema;
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_close, series_from};

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 5).is_empty());
    }

    #[test]
    fn ema_known_values() {
        // period 3 => multiplier 0.5
        let series = series_from(&[10.0, 20.0, 10.0, 20.0]);
        let ema = calculate_ema(&series, 3);
        let got: Vec<f64> = ema.iter().map(|p| p.value).collect();
        assert_close(&got, &[10.0, 15.0, 12.5, 16.25]);
        let times: Vec<_> = ema.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![1, 2, 3, 4]);
    }

    #[test]
    fn ema_length_and_seed_for_every_period() {
        let series = series_from(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
        for period in 0..20 {
            let ema = calculate_ema(&series, period);
            assert_eq!(ema.len(), series.len(), "period {period}");
            assert_eq!(ema[0].value, series[0].value, "period {period}");
        }
    }

    #[test]
    fn ema_period_zero_is_identity() {
        let series = series_from(&[1.0, 7.0, -2.0]);
        let ema = calculate_ema(&series, 0);
        assert_eq!(ema, series);
    }

    #[test]
    fn ema_constant_series_stays_constant() {
        let series = series_from(&[42.0; 30]);
        for p in calculate_ema(&series, 14) {
            assert!((p.value - 42.0).abs() < 1e-9);
        }
    }

    #[test]
    fn ema_does_not_touch_input() {
        let series = series_from(&[1.0, 2.0, 3.0]);
        let before = series.clone();
        let _ = calculate_ema(&series, 2);
        assert_eq!(series, before);
    }
}
