// =============================================================================
// Fair Gap Value
// =============================================================================
//
//   gap_t       = close_t - close_{t-1}
//   scaleFactor = (maxPrice / 3) / max(|gap|)
//   scaled_t    = gap_t * scaleFactor
//
// The largest move is drawn at a third of the top price.  Gaps are taken over
// a time-sorted copy of the input.  A flat series has no moves: every point
// is 0.
// =============================================================================

use crate::types::{sort_series, value_range, PricePoint};

/// Scaled close-to-close gaps, one per point after the first.
pub fn calculate_fair_gap(series: &[PricePoint]) -> Vec<PricePoint> {
    if series.len() < 2 {
        return Vec::new();
    }

    let mut sorted = series.to_vec();
    sort_series(&mut sorted);

    let max_price = value_range(&sorted).map(|(hi, _)| hi).unwrap_or(0.0);

    let gaps: Vec<PricePoint> = sorted
        .windows(2)
        .map(|w| PricePoint::new(w[1].time, w[1].value - w[0].value))
        .collect();

    let max_gap = gaps.iter().map(|g| g.value.abs()).fold(0.0_f64, f64::max);
    let scale = if max_gap == 0.0 {
        0.0
    } else {
        max_price / 3.0 / max_gap
    };

    gaps.into_iter()
        .map(|g| PricePoint::new(g.time, g.value * scale))
        .collect()
}
