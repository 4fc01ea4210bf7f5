// =============================================================================
// Ichimoku Cloud
// =============================================================================
//
// For each index `i` with a full look-back for every window:
//
//   Tenkan-sen    = (high9  + low9)  / 2
//   Kijun-sen     = (high26 + low26) / 2
//   Senkou Span A = (Tenkan + Kijun) / 2
//   Senkou Span B = (high52 + low52) / 2
//   Chikou Span   = close_i, labeled at time_i - 26
//
// highN / lowN are taken over the N points *preceding* `i` (the current point
// is excluded).  Only closes are available, so high/low are the extreme
// closes.
//
// By default the Senkou spans stay at `time_i`; `senkou_shift` moves them
// that many bars forward.  The Chikou shift is a time-label offset, not an
// index shift, so `time` must be a numeric axis.  Decoded dates are Unix
// seconds, so on a date axis the Chikou label lands 26 seconds earlier, not
// 26 bars back.
// =============================================================================

use crate::types::{PricePoint, Timestamp};

/// Ichimoku window lengths and plot offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IchimokuConfig {
    pub tenkan_period: usize,
    pub kijun_period: usize,
    pub senkou_b_period: usize,
    /// Subtracted from `time` to label the Chikou span.
    pub chikou_shift: Timestamp,
    /// Bars to plot both Senkou spans ahead. 0 keeps them at `time_i`.
    pub senkou_shift: usize,
}

impl Default for IchimokuConfig {
    fn default() -> Self {
        Self {
            tenkan_period: 9,
            kijun_period: 26,
            senkou_b_period: 52,
            chikou_shift: 26,
            senkou_shift: 0,
        }
    }
}

impl IchimokuConfig {
    /// First index with a full look-back for all three windows.
    pub fn warmup(&self) -> usize {
        self.tenkan_period
            .max(self.kijun_period)
            .max(self.senkou_b_period)
            .max(1)
    }
}

/// The five Ichimoku lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IchimokuOutput {
    pub tenkan: Vec<PricePoint>,
    pub kijun: Vec<PricePoint>,
    pub senkou_a: Vec<PricePoint>,
    pub senkou_b: Vec<PricePoint>,
    pub chikou: Vec<PricePoint>,
}

/// Compute the Ichimoku lines.  Empty when the input has no index past the
/// warm-up (or a window length is 0).
pub fn calculate_ichimoku(series: &[PricePoint], config: &IchimokuConfig) -> IchimokuOutput {
    let start = config.warmup();
    if config.tenkan_period == 0
        || config.kijun_period == 0
        || config.senkou_b_period == 0
        || series.len() <= start
    {
        return IchimokuOutput::default();
    }

    let mut out = IchimokuOutput::default();

    for i in start..series.len() {
        let point = series[i];
        let tenkan = midpoint(&series[i - config.tenkan_period..i]);
        let kijun = midpoint(&series[i - config.kijun_period..i]);
        let senkou_a = (tenkan + kijun) / 2.0;
        let senkou_b = midpoint(&series[i - config.senkou_b_period..i]);

        out.tenkan.push(PricePoint::new(point.time, tenkan));
        out.kijun.push(PricePoint::new(point.time, kijun));

        if let Some(anchor) = series.get(i + config.senkou_shift) {
            out.senkou_a.push(PricePoint::new(anchor.time, senkou_a));
            out.senkou_b.push(PricePoint::new(anchor.time, senkou_b));
        }

        out.chikou.push(PricePoint::new(
            point.time - config.chikou_shift,
            point.value,
        ));
    }

    out
}

/// (highest + lowest) / 2 of a non-empty window.
fn midpoint(window: &[PricePoint]) -> f64 {
    let (high, low) = window.iter().fold((f64::MIN, f64::MAX), |(hi, lo), p| {
        (hi.max(p.value), lo.min(p.value))
    });
    (high + low) / 2.0
}
