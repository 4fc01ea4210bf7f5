// =============================================================================
// Average Directional Index (ADX) — close-only proxy
// =============================================================================
//
// ADX quantifies trend **strength** regardless of direction.  Only closes are
// available, so the pipeline substitutes close-to-close moves for the usual
// high/low ranges:
//
//   1. TR  = |close_t - close_{t-1}|
//      +DM = max(close_t - close_{t-1}, 0)
//      -DM = max(close_{t-1} - close_t, 0)
//   2. Smooth TR, +DM, -DM with a rolling `period` window:
//        sum_0 = raw_0 + ... + raw_{period-1}
//        sum_k = sum_{k-1} - raw_{k-1} + raw_{k+period-1}
//        smoothed_k = sum_k / period
//   3. +DI = smoothed(+DM) / smoothed(TR) * 100      (0 when TR is 0)
//      -DI = smoothed(-DM) / smoothed(TR) * 100
//   4. DX  = |+DI - -DI| / (+DI + -DI) * 100         (0 when the sum is 0)
//   5. ADX = smooth(DX)
//
// ADX value `k` is labeled at input index `k + 2 * period`; values whose label
// index falls past the end of the input are dropped.
// =============================================================================

use crate::types::PricePoint;

pub const DEFAULT_ADX_PERIOD: usize = 14;

/// Compute the ADX series.
///
/// Output length is `max(0, len - 2 * period)`.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - fewer than `period + 1` points => empty vec
pub fn calculate_adx(series: &[PricePoint], period: usize) -> Vec<PricePoint> {
    if period == 0 || series.len() < period + 1 {
        return Vec::new();
    }

    // ------------------------------------------------------------------
    // Step 1: raw TR, +DM, -DM per consecutive pair
    // ------------------------------------------------------------------
    let bar_count = series.len() - 1;
    let mut tr_vals = Vec::with_capacity(bar_count);
    let mut plus_dm = Vec::with_capacity(bar_count);
    let mut minus_dm = Vec::with_capacity(bar_count);

    for pair in series.windows(2) {
        let delta = pair[1].value - pair[0].value;
        tr_vals.push(delta.abs());
        plus_dm.push(delta.max(0.0));
        minus_dm.push((-delta).max(0.0));
    }

    // ------------------------------------------------------------------
    // Steps 2–4: smoothed DI+/DI- and DX
    // ------------------------------------------------------------------
    let smooth_tr = rolling_mean(&tr_vals, period);
    let smooth_plus = rolling_mean(&plus_dm, period);
    let smooth_minus = rolling_mean(&minus_dm, period);

    let dx: Vec<f64> = smooth_tr
        .iter()
        .zip(smooth_plus.iter().zip(&smooth_minus))
        .map(|(&tr, (&pdm, &mdm))| compute_dx(pdm, mdm, tr))
        .collect();

    // ------------------------------------------------------------------
    // Step 5: ADX and label alignment
    // ------------------------------------------------------------------
    rolling_mean(&dx, period)
        .into_iter()
        .enumerate()
        .filter_map(|(k, adx)| {
            series
                .get(k + 2 * period)
                .map(|anchor| PricePoint::new(anchor.time, adx))
        })
        .collect()
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Running-sum smoother: one mean per full window of `raw`.
fn rolling_mean(raw: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || raw.len() < period {
        return Vec::new();
    }

    let period_f = period as f64;
    let mut sum: f64 = raw[..period].iter().sum();
    let mut smoothed = Vec::with_capacity(raw.len() - period + 1);
    smoothed.push(sum / period_f);

    for i in period..raw.len() {
        sum = sum - raw[i - period] + raw[i];
        smoothed.push(sum / period_f);
    }

    smoothed
}

/// DX from smoothed +DM, -DM and TR, with every division guarded to 0.
fn compute_dx(smooth_plus_dm: f64, smooth_minus_dm: f64, smooth_tr: f64) -> f64 {
    let (plus_di, minus_di) = if smooth_tr != 0.0 {
        (
            smooth_plus_dm / smooth_tr * 100.0,
            smooth_minus_dm / smooth_tr * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        return 0.0;
    }

    (plus_di - minus_di).abs() / di_sum * 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::series_from;

    fn ascending(n: usize) -> Vec<PricePoint> {
        series_from(&(0..n).map(|i| 100.0 + i as f64 * 2.0).collect::<Vec<_>>())
    }

    #[test]
    fn adx_period_zero() {
        assert!(calculate_adx(&ascending(50), 0).is_empty());
    }

    #[test]
    fn adx_insufficient_data() {
        assert!(calculate_adx(&ascending(10), 14).is_empty());
        // period + 1 points pass the first guard but leave no labelled ADX
        assert!(calculate_adx(&ascending(15), 14).is_empty());
    }

    #[test]
    fn adx_output_length_and_alignment() {
        let series = ascending(60);
        let adx = calculate_adx(&series, 14);
        assert_eq!(adx.len(), 60 - 28);
        assert_eq!(adx[0].time, series[28].time);
        assert_eq!(adx.last().unwrap().time, series[59].time);
    }

    #[test]
    fn adx_strong_uptrend_is_100() {
        // only up moves => DI- = 0, DX = 100 everywhere
        let adx = calculate_adx(&ascending(60), 14);
        assert!(adx.iter().all(|p| (p.value - 100.0).abs() < 1e-9));
    }

    #[test]
    fn adx_flat_market_is_zero() {
        // TR is 0 everywhere => DI guarded to 0 => DX and ADX are 0
        let adx = calculate_adx(&series_from(&[100.0; 60]), 14);
        assert_eq!(adx.len(), 32);
        assert!(adx.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn adx_result_range() {
        let series = series_from(
            &(0..100)
                .map(|i| 50.0 + (i as f64 * 0.3).sin() * 10.0)
                .collect::<Vec<_>>(),
        );
        for p in calculate_adx(&series, 14) {
            assert!((0.0..=100.0).contains(&p.value), "ADX {} out of range", p.value);
        }
    }

    #[test]
    fn adx_small_period_by_hand() {
        // closes 1,2,1,2,1 with period 1: every DX is 100, labels start at index 2
        let series = series_from(&[1.0, 2.0, 1.0, 2.0, 1.0]);
        let adx = calculate_adx(&series, 1);
        assert_eq!(adx.len(), 3);
        assert_eq!(adx[0].time, series[2].time);
        assert!(adx.iter().all(|p| (p.value - 100.0).abs() < 1e-12));
    }

    #[test]
    fn rolling_mean_windows() {
        assert_eq!(rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2), vec![1.5, 2.5, 3.5]);
        assert!(rolling_mean(&[1.0], 2).is_empty());
    }

    #[test]
    fn dx_guards() {
        assert_eq!(compute_dx(1.0, 1.0, 0.0), 0.0);
        assert_eq!(compute_dx(0.0, 0.0, 5.0), 0.0);
        assert!((compute_dx(3.0, 1.0, 4.0) - 50.0).abs() < 1e-12);
    }
}
