// =============================================================================
// Aroon Indicator
// =============================================================================
//
// For each index `i >= period`, look at the window `data[i-period .. i)`
// (the current point is excluded):
//
//   Aroon Up   = (maxIndex + 1) / period * 100
//   Aroon Down = (minIndex + 1) / period * 100
//
// where maxIndex / minIndex is the position of the first highest / lowest
// value within the window.  A recent extreme sits at the window's end and
// scores 100.
//
// `scale_aroon_to_price` maps the 0–100 range into price units so both lines
// can be overlaid on the price chart.
// =============================================================================

use crate::types::{value_range, PricePoint};

pub const DEFAULT_AROON_PERIOD: usize = 14;

/// Aroon Up / Aroon Down, index-aligned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AroonOutput {
    pub up: Vec<PricePoint>,
    pub down: Vec<PricePoint>,
}

impl AroonOutput {
    pub fn len(&self) -> usize {
        self.up.len()
    }

    pub fn is_empty(&self) -> bool {
        self.up.is_empty()
    }
}

/// Compute Aroon Up/Down.  Output length is `max(0, len - period)`.
pub fn calculate_aroon(series: &[PricePoint], period: usize) -> AroonOutput {
    if period == 0 || series.len() <= period {
        return AroonOutput::default();
    }

    let period_f = period as f64;
    let mut out = AroonOutput {
        up: Vec::with_capacity(series.len() - period),
        down: Vec::with_capacity(series.len() - period),
    };

    for i in period..series.len() {
        let window = &series[i - period..i];
        let (max_idx, min_idx) = extreme_indices(window);
        let time = series[i].time;
        out.up.push(PricePoint::new(time, (max_idx + 1) as f64 / period_f * 100.0));
        out.down.push(PricePoint::new(time, (min_idx + 1) as f64 / period_f * 100.0));
    }

    out
}

/// Rescale Aroon values into price units:
/// `scaled = aroon / 100 * (max - min) / 3 + min` over the whole price series.
pub fn scale_aroon_to_price(aroon: &AroonOutput, prices: &[PricePoint]) -> AroonOutput {
    let Some((max_price, min_price)) = value_range(prices) else {
        return AroonOutput::default();
    };
    if aroon.is_empty() {
        return AroonOutput::default();
    }

    let scale = (max_price - min_price) / 3.0;
    let rescale = |line: &[PricePoint]| -> Vec<PricePoint> {
        line.iter()
            .map(|p| PricePoint::new(p.time, p.value / 100.0 * scale + min_price))
            .collect()
    };

    AroonOutput {
        up: rescale(&aroon.up),
        down: rescale(&aroon.down),
    }
}

/// First-occurrence positions of the maximum and minimum in `window`.
fn extreme_indices(window: &[PricePoint]) -> (usize, usize) {
    let mut max_idx = 0;
    let mut min_idx = 0;
    for (idx, p) in window.iter().enumerate() {
        if p.value > window[max_idx].value {
            max_idx = idx;
        }
        if p.value < window[min_idx].value {
            min_idx = idx;
        }
    }
    (max_idx, min_idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::series_from;

    #[test]
    fn aroon_length() {
        let series = series_from(&(0..30).map(|i| i as f64).collect::<Vec<_>>());
        let out = calculate_aroon(&series, DEFAULT_AROON_PERIOD);
        assert_eq!(out.len(), 16);
        assert_eq!(out.down.len(), 16);
        assert_eq!(out.up[0].time, series[14].time);
    }

    #[test]
    fn aroon_strictly_increasing() {
        let series = series_from(&(0..40).map(|i| i as f64 * 1.5).collect::<Vec<_>>());
        let period = 10;
        let out = calculate_aroon(&series, period);
        for (up, down) in out.up.iter().zip(&out.down) {
            assert!((up.value - 100.0).abs() < 1e-12);
            assert!((down.value - 100.0 / period as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn aroon_ties_take_first_occurrence() {
        // window [5,5,1,1] -> max at 0, min at 2
        let series = series_from(&[5.0, 5.0, 1.0, 1.0, 3.0]);
        let out = calculate_aroon(&series, 4);
        assert_eq!(out.len(), 1);
        assert!((out.up[0].value - 25.0).abs() < 1e-12);
        assert!((out.down[0].value - 75.0).abs() < 1e-12);
        assert_eq!(out.up[0].time, 5);
    }

    #[test]
    fn aroon_short_input() {
        assert!(calculate_aroon(&series_from(&[1.0; 14]), 14).is_empty());
        assert!(calculate_aroon(&series_from(&[1.0; 5]), 0).is_empty());
    }

    #[test]
    fn scaling_maps_into_bottom_third_of_price_range() {
        let prices = series_from(&[10.0, 40.0, 25.0, 13.0]);
        let aroon = AroonOutput {
            up: vec![PricePoint::new(4, 100.0)],
            down: vec![PricePoint::new(4, 0.0)],
        };
        let scaled = scale_aroon_to_price(&aroon, &prices);
        assert!((scaled.up[0].value - 20.0).abs() < 1e-12);
        assert!((scaled.down[0].value - 10.0).abs() < 1e-12);
        assert_eq!(scaled.up[0].time, 4);
    }

    #[test]
    fn scaling_empty_inputs() {
        let aroon = calculate_aroon(&series_from(&[1.0, 2.0, 3.0]), 2);
        assert!(scale_aroon_to_price(&aroon, &[]).is_empty());
        assert!(scale_aroon_to_price(&AroonOutput::default(), &series_from(&[1.0])).is_empty());
    }
}
