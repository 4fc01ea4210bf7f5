// =============================================================================
// MACD (Moving Average Convergence Divergence)
// =============================================================================
//
//   MACD line   = EMA(fast) - EMA(slow)
//   Signal line = EMA(MACD line, signal)
//   Histogram   = MACD line - Signal line
//
// Both EMAs run over the full input range.  `calculate_ema` returns one point
// per input point, so the subtraction is index-aligned without bounds checks.
// =============================================================================

use crate::indicators::ema::calculate_ema;
use crate::types::PricePoint;

/// MACD periods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD output; every line has the input's length.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub macd_line: Vec<PricePoint>,
    pub signal_line: Vec<PricePoint>,
    pub histogram: Vec<PricePoint>,
}

/// Compute MACD with the given periods.
pub fn calculate_macd(series: &[PricePoint], config: &MacdConfig) -> MacdOutput {
    let fast = calculate_ema(series, config.fast_period);
    let slow = calculate_ema(series, config.slow_period);

    let macd_line: Vec<PricePoint> = fast
        .iter()
        .zip(&slow)
        .map(|(f, s)| PricePoint::new(f.time, f.value - s.value))
        .collect();

    let signal_line = calculate_ema(&macd_line, config.signal_period);

    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| PricePoint::new(m.time, m.value - s.value))
        .collect();

    MacdOutput {
        macd_line,
        signal_line,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::series_from;

    #[test]
    fn macd_lines_have_input_length() {
        let series = series_from(&(1..=50).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let out = calculate_macd(&series, &MacdConfig::default());
        assert_eq!(out.macd_line.len(), 50);
        assert_eq!(out.signal_line.len(), 50);
        assert_eq!(out.histogram.len(), 50);
        assert_eq!(out.macd_line[49].time, series[49].time);
    }

    #[test]
    fn macd_constant_series_is_zero() {
        let series = series_from(&[100.0; 40]);
        let out = calculate_macd(&series, &MacdConfig::default());
        for line in [&out.macd_line, &out.signal_line, &out.histogram] {
            assert!(line.iter().all(|p| p.value.abs() < 1e-9));
        }
    }

    #[test]
    fn macd_rising_series_is_positive() {
        let series = series_from(&(0..60).map(|i| i as f64).collect::<Vec<_>>());
        let out = calculate_macd(&series, &MacdConfig::default());
        assert_eq!(out.macd_line[0].value, 0.0);
        assert!(out.macd_line[1..].iter().all(|p| p.value > 0.0));
    }

    #[test]
    fn macd_matches_ema_difference() {
        let series = series_from(&[5.0, 3.0, 8.0, 13.0, 2.0, 1.0, 9.0]);
        let out = calculate_macd(&series, &MacdConfig::default());
        let fast = calculate_ema(&series, 12);
        let slow = calculate_ema(&series, 26);
        for i in 0..series.len() {
            assert_eq!(out.macd_line[i].value, fast[i].value - slow[i].value);
        }
        assert_eq!(out.signal_line, calculate_ema(&out.macd_line, 9));
    }

    #[test]
    fn macd_empty_input() {
        let out = calculate_macd(&[], &MacdConfig::default());
        assert!(out.macd_line.is_empty());
        assert!(out.signal_line.is_empty());
        assert!(out.histogram.is_empty());
    }
}
