// =============================================================================
// View Catalog — which indicators each chart view derives from a price series
// =============================================================================
//
// A view is a named bundle of indicator computations over one price series.
// Rendering is pure: the same input always yields the same chart series.
// The price line is always the first series of every view.  Input is
// expected to be sorted ascending by time (the state layer and the API sort
// every fetched series before rendering).
// =============================================================================

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::indicators::{
    adx::{calculate_adx, DEFAULT_ADX_PERIOD},
    aroon::{calculate_aroon, scale_aroon_to_price, DEFAULT_AROON_PERIOD},
    awesome::calculate_awesome,
    bollinger::{calculate_bollinger, DEFAULT_BOLLINGER_MULTIPLIER, DEFAULT_BOLLINGER_PERIOD},
    cci::{calculate_cci, DEFAULT_CCI_PERIOD},
    ema::calculate_ema,
    fair_gap::calculate_fair_gap,
    fibonacci::fibonacci_levels,
    ichimoku::{calculate_ichimoku, IchimokuConfig},
    macd::{calculate_macd, MacdConfig},
    rsi::{calculate_rsi, RsiMethod, DEFAULT_RSI_PERIOD},
    sma::calculate_sma,
    std_dev::{calculate_std_dev, DEFAULT_STD_DEV_PERIOD},
    stochastic::{
        calculate_stochastic, stochastic_signal, DEFAULT_SIGNAL_PERIOD, DEFAULT_STOCHASTIC_PERIOD,
    },
};
use crate::types::PricePoint;
use crate::views::chart::{ChartSeries, Pane};

/// Period of the single-EMA, single-SMA and EMA+Bollinger views.
pub const MOVING_AVERAGE_PERIOD: usize = 14;
pub const TRIPLE_EMA_PERIODS: [usize; 3] = [50, 100, 200];

/// Per-request rendering knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub rsi: RsiMethod,
    /// Bars to shift the Ichimoku Senkou spans forward.
    #[serde(default)]
    pub senkou_shift: usize,
}

// =============================================================================
// IndicatorView
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorView {
    Ema,
    Sma,
    TripleEma,
    Macd,
    Rsi,
    Bollinger,
    EmaBollinger,
    StdDev,
    Adx,
    Cci,
    Aroon,
    Ichimoku,
    Stochastic,
    Awesome,
    MacdAwesome,
    Fibonacci,
    FairGap,
}

impl IndicatorView {
    pub const ALL: [IndicatorView; 17] = [
        Self::Ema,
        Self::Sma,
        Self::TripleEma,
        Self::Macd,
        Self::Rsi,
        Self::Bollinger,
        Self::EmaBollinger,
        Self::StdDev,
        Self::Adx,
        Self::Cci,
        Self::Aroon,
        Self::Ichimoku,
        Self::Stochastic,
        Self::Awesome,
        Self::MacdAwesome,
        Self::Fibonacci,
        Self::FairGap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ema => "ema",
            Self::Sma => "sma",
            Self::TripleEma => "triple_ema",
            Self::Macd => "macd",
            Self::Rsi => "rsi",
            Self::Bollinger => "bollinger",
            Self::EmaBollinger => "ema_bollinger",
            Self::StdDev => "std_dev",
            Self::Adx => "adx",
            Self::Cci => "cci",
            Self::Aroon => "aroon",
            Self::Ichimoku => "ichimoku",
            Self::Stochastic => "stochastic",
            Self::Awesome => "awesome",
            Self::MacdAwesome => "macd_awesome",
            Self::Fibonacci => "fibonacci",
            Self::FairGap => "fair_gap",
        }
    }

    /// Derive this view's chart series from a time-sorted price series.
    pub fn render(&self, series: &[PricePoint], options: &RenderOptions) -> Vec<ChartSeries> {
        let mut out = vec![ChartSeries::line("price", Pane::Price, series)];

        match self {
            Self::Ema => out.push(ChartSeries::line(
                format!("ema_{MOVING_AVERAGE_PERIOD}"),
                Pane::Price,
                &calculate_ema(series, MOVING_AVERAGE_PERIOD),
            )),
            Self::Sma => out.push(ChartSeries::line(
                format!("sma_{MOVING_AVERAGE_PERIOD}"),
                Pane::Price,
                &calculate_sma(series, MOVING_AVERAGE_PERIOD),
            )),
            Self::TripleEma => {
                for period in TRIPLE_EMA_PERIODS {
                    out.push(ChartSeries::line(
                        format!("ema_{period}"),
                        Pane::Price,
                        &calculate_ema(series, period),
                    ));
                }
            }
            Self::Macd => push_macd(&mut out, series, false),
            Self::Rsi => {
                // The EMA flavour lives on the price axis; Wilder's is 0..100.
                let pane = match options.rsi {
                    RsiMethod::Ema => Pane::Price,
                    RsiMethod::Wilder => Pane::Indicator,
                };
                out.push(ChartSeries::line(
                    "rsi",
                    pane,
                    &calculate_rsi(series, DEFAULT_RSI_PERIOD, options.rsi),
                ));
            }
            Self::Bollinger => push_bollinger(&mut out, series),
            Self::EmaBollinger => {
                out.push(ChartSeries::line(
                    format!("ema_{MOVING_AVERAGE_PERIOD}"),
                    Pane::Price,
                    &calculate_ema(series, MOVING_AVERAGE_PERIOD),
                ));
                push_bollinger(&mut out, series);
            }
            Self::StdDev => out.push(ChartSeries::line(
                "std_dev",
                Pane::Indicator,
                &calculate_std_dev(series, DEFAULT_STD_DEV_PERIOD),
            )),
            Self::Adx => out.push(ChartSeries::line(
                "adx",
                Pane::Indicator,
                &calculate_adx(series, DEFAULT_ADX_PERIOD),
            )),
            Self::Cci => out.push(ChartSeries::line(
                "cci",
                Pane::Indicator,
                &calculate_cci(series, DEFAULT_CCI_PERIOD),
            )),
            Self::Aroon => {
                let scaled = scale_aroon_to_price(&calculate_aroon(series, DEFAULT_AROON_PERIOD), series);
                out.push(ChartSeries::line("aroon_up", Pane::Price, &scaled.up));
                out.push(ChartSeries::line("aroon_down", Pane::Price, &scaled.down));
            }
            Self::Ichimoku => {
                let config = IchimokuConfig {
                    senkou_shift: options.senkou_shift,
                    ..IchimokuConfig::default()
                };
                let ichimoku = calculate_ichimoku(series, &config);
                out.push(ChartSeries::area("senkou_a", Pane::Price, &ichimoku.senkou_a));
                out.push(ChartSeries::area("senkou_b", Pane::Price, &ichimoku.senkou_b));
                out.push(ChartSeries::line("tenkan", Pane::Price, &ichimoku.tenkan));
                out.push(ChartSeries::line("kijun", Pane::Price, &ichimoku.kijun));
                out.push(ChartSeries::line("chikou", Pane::Price, &ichimoku.chikou));
            }
            Self::Stochastic => {
                let percent_k = calculate_stochastic(series, DEFAULT_STOCHASTIC_PERIOD);
                let percent_d = stochastic_signal(&percent_k, DEFAULT_SIGNAL_PERIOD);
                out.push(
                    ChartSeries::histogram("stochastic_k", Pane::Indicator, &percent_k)
                        .colored_by_sign(|v| v >= 0.0),
                );
                out.push(ChartSeries::line("stochastic_d", Pane::Indicator, &percent_d));
            }
            Self::Awesome => push_awesome(&mut out, series),
            Self::MacdAwesome => {
                push_awesome(&mut out, series);
                push_macd(&mut out, series, true);
            }
            Self::Fibonacci => {
                let fib = fibonacci_levels(series);
                for level in &fib.levels {
                    let flat: Vec<PricePoint> = series
                        .iter()
                        .map(|p| PricePoint::new(p.time, level.price))
                        .collect();
                    out.push(ChartSeries::area(
                        format!("fib_{:.1}", level.ratio * 100.0),
                        Pane::Price,
                        &flat,
                    ));
                }
            }
            Self::FairGap => out.push(
                ChartSeries::line("fair_gap", Pane::Indicator, &calculate_fair_gap(series))
                    .colored_by_sign(|v| v > 0.0),
            ),
        }

        out
    }

    /// Names of the series this view produces for a non-trivial input.
    pub fn series_names(&self) -> Vec<String> {
        let sample: Vec<PricePoint> = (0..2).map(|i| PricePoint::new(i, 1.0)).collect();
        self.render(&sample, &RenderOptions::default())
            .into_iter()
            .map(|s| s.name)
            .collect()
    }
}

fn push_macd(out: &mut Vec<ChartSeries>, series: &[PricePoint], with_histogram: bool) {
    let macd = calculate_macd(series, &MacdConfig::default());
    out.push(ChartSeries::line("macd", Pane::Indicator, &macd.macd_line));
    out.push(ChartSeries::line("signal", Pane::Indicator, &macd.signal_line));
    if with_histogram {
        out.push(ChartSeries::histogram(
            "macd_histogram",
            Pane::Indicator,
            &macd.histogram,
        ));
    }
}

fn push_bollinger(out: &mut Vec<ChartSeries>, series: &[PricePoint]) {
    let bands = calculate_bollinger(series, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_MULTIPLIER);
    out.push(ChartSeries::line("bb_median", Pane::Price, &bands.median));
    out.push(ChartSeries::line("bb_upper", Pane::Price, &bands.upper));
    out.push(ChartSeries::line("bb_lower", Pane::Price, &bands.lower));
}

fn push_awesome(out: &mut Vec<ChartSeries>, series: &[PricePoint]) {
    out.push(
        ChartSeries::histogram("awesome", Pane::Indicator, &calculate_awesome(series))
            .colored_by_sign(|v| v >= 0.0),
    );
}

impl std::fmt::Display for IndicatorView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorView {
    type Err = String;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| format!("unknown view '{s}'"))
    }
}
