// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// Two variants live here:
//
// 1. `calculate_rsi_ema`: the RSI view plots an EMA of price in place of the
//    gain/loss oscillator.  This is the served default.
//
// 2. `calculate_wilder_rsi`: the textbook formula with Wilder's smoothing:
//      Step 1: Compute price changes (deltas) from consecutive closes.
//      Step 2: Seed average gain / average loss with the SMA of the first
//               `period` gains / losses.
//      Step 3: avg = (prev_avg * (period - 1) + current) / period
//      Step 4: RS  = avg_gain / avg_loss
//               RSI = 100 - 100 / (1 + RS)
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::indicators::ema::calculate_ema;
use crate::types::PricePoint;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Which RSI formula a view should serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiMethod {
    /// EMA of price.
    #[default]
    Ema,
    /// Wilder's gain/loss oscillator in [0, 100].
    Wilder,
}

/// RSI as plotted by the RSI view: `EMA(series, period)`.
pub fn calculate_rsi_ema(series: &[PricePoint], period: usize) -> Vec<PricePoint> {
    calculate_ema(series, period)
}

/// Dispatch on `method`.
pub fn calculate_rsi(series: &[PricePoint], period: usize, method: RsiMethod) -> Vec<PricePoint> {
    match method {
        RsiMethod::Ema => calculate_rsi_ema(series, period),
        RsiMethod::Wilder => calculate_wilder_rsi(series, period),
    }
}

/// Compute the Wilder RSI series.
///
/// One value per input point starting at index `period` (the first `period`
/// deltas seed the averages).
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `series.len() < period + 1` => empty vec
/// - no down moves => 100, no movement at all => 50
pub fn calculate_wilder_rsi(series: &[PricePoint], period: usize) -> Vec<PricePoint> {
    if period == 0 || series.len() < period + 1 {
        return Vec::new();
    }

    let deltas: Vec<f64> = series.windows(2).map(|w| w[1].value - w[0].value).collect();

    let (sum_gain, sum_loss) = deltas[..period].iter().fold((0.0_f64, 0.0_f64), |(g, l), &d| {
        if d > 0.0 {
            (g + d, l)
        } else {
            (g, l + d.abs())
        }
    });

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;

    let mut result = Vec::with_capacity(deltas.len() - period + 1);
    result.push(PricePoint::new(
        series[period].time,
        rsi_from_averages(avg_gain, avg_loss),
    ));

    for (offset, &delta) in deltas[period..].iter().enumerate() {
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;

        result.push(PricePoint::new(
            series[period + 1 + offset].time,
            rsi_from_averages(avg_gain, avg_loss),
        ));
    }

    result
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::series_from;

    #[test]
    fn rsi_ema_is_plain_ema() {
        let series = series_from(&[44.0, 44.5, 43.9, 45.2, 46.0]);
        assert_eq!(calculate_rsi_ema(&series, 14), calculate_ema(&series, 14));
        assert_eq!(
            calculate_rsi(&series, 14, RsiMethod::default()),
            calculate_ema(&series, 14)
        );
    }

    #[test]
    fn wilder_insufficient_data() {
        let series = series_from(&(1..=14).map(|x| x as f64).collect::<Vec<_>>());
        assert!(calculate_wilder_rsi(&series, 14).is_empty());
        assert!(calculate_wilder_rsi(&series, 0).is_empty());
        assert!(calculate_wilder_rsi(&[], 14).is_empty());
    }

    #[test]
    fn wilder_all_gains() {
        let series = series_from(&(1..=30).map(|x| x as f64).collect::<Vec<_>>());
        let rsi = calculate_wilder_rsi(&series, 14);
        assert_eq!(rsi.len(), 16);
        assert_eq!(rsi[0].time, series[14].time);
        assert_eq!(rsi.last().unwrap().time, series[29].time);
        assert!(rsi.iter().all(|p| (p.value - 100.0).abs() < 1e-10));
    }

    #[test]
    fn wilder_all_losses() {
        let series = series_from(&(1..=30).rev().map(|x| x as f64).collect::<Vec<_>>());
        let rsi = calculate_wilder_rsi(&series, 14);
        assert!(rsi.iter().all(|p| p.value.abs() < 1e-10));
    }

    #[test]
    fn wilder_flat_market() {
        let rsi = calculate_wilder_rsi(&series_from(&[100.0; 30]), 14);
        assert!(rsi.iter().all(|p| (p.value - 50.0).abs() < 1e-10));
    }

    #[test]
    fn wilder_range_check() {
        let series = series_from(&[
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ]);
        let rsi = calculate_wilder_rsi(&series, 14);
        assert_eq!(rsi.len(), 4);
        for p in &rsi {
            assert!((0.0..=100.0).contains(&p.value), "RSI {} out of range", p.value);
        }
    }

    #[test]
    fn wilder_known_values() {
        let series = series_from(&[
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            45.61, 46.28, 46.28, 46.00,
        ]);
        let rsi = calculate_wilder_rsi(&series, 14);
        assert_eq!(rsi.len(), 2);
        assert_eq!(rsi[0].time, series[14].time);
        assert!((rsi[0].value - 70.4641).abs() < 1e-3, "got {}", rsi[0].value);
        assert_eq!(rsi[1].time, series[15].time);
        assert!((rsi[1].value - 66.2496).abs() < 1e-3, "got {}", rsi[1].value);
    }

    #[test]
    fn method_parses_from_lowercase() {
        let m: RsiMethod = serde_json::from_str(r#""wilder""#).unwrap();
        assert_eq!(m, RsiMethod::Wilder);
    }
}
