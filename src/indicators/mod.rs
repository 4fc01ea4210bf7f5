// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free transformations of a price series.  Every function
// takes `&[PricePoint]`, never mutates it, and degrades to empty (or
// documented zero) output on short input instead of panicking.  Ratios that
// can divide by zero fall back to 0 so no NaN/Infinity reaches the chart.

pub mod adx;
pub mod aroon;
pub mod awesome;
pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod fair_gap;
pub mod fibonacci;
pub mod ichimoku;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod std_dev;
pub mod stochastic;


#[cfg(test)]
mod tests {
    use super::test_support::series_from;
    use super::*;

    fn bits(series: &[crate::types::PricePoint]) -> Vec<(i64, u64)> {
        series.iter().map(|p| (p.time, p.value.to_bits())).collect()
    }

    #[test]
    fn every_indicator_is_deterministic() {
        let values: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.37).sin() * 12.0 + i as f64 * 0.1)
            .collect();
        let series = series_from(&values);

        let runs: Vec<Box<dyn Fn() -> Vec<(i64, u64)> + '_>> = vec![
            Box::new(|| bits(&ema::calculate_ema(&series, 14))),
            Box::new(|| bits(&sma::calculate_sma(&series, 14))),
            Box::new(|| bits(&macd::calculate_macd(&series, &macd::MacdConfig::default()).signal_line)),
            Box::new(|| bits(&rsi::calculate_wilder_rsi(&series, 14))),
            Box::new(|| bits(&bollinger::calculate_bollinger(&series, 20, 2.0).upper)),
            Box::new(|| bits(&std_dev::calculate_std_dev(&series, 14))),
            Box::new(|| bits(&adx::calculate_adx(&series, 14))),
            Box::new(|| bits(&cci::calculate_cci(&series, 14))),
            Box::new(|| bits(&aroon::calculate_aroon(&series, 14).down)),
            Box::new(|| {
                bits(&ichimoku::calculate_ichimoku(&series, &ichimoku::IchimokuConfig::default()).senkou_b)
            }),
            Box::new(|| bits(&stochastic::calculate_stochastic(&series, 14))),
            Box::new(|| bits(&awesome::calculate_awesome(&series))),
            Box::new(|| bits(&fair_gap::calculate_fair_gap(&series))),
        ];

        for run in &runs {
            let first = run();
            assert!(!first.is_empty());
            assert_eq!(first, run());
        }

        assert_eq!(fibonacci::fibonacci_levels(&series), fibonacci::fibonacci_levels(&series));
    }

    #[test]
    fn every_indicator_tolerates_empty_input() {
        assert!(ema::calculate_ema(&[], 14).is_empty());
        assert!(sma::calculate_sma(&[], 14).is_empty());
        assert!(macd::calculate_macd(&[], &macd::MacdConfig::default()).macd_line.is_empty());
        assert!(rsi::calculate_wilder_rsi(&[], 14).is_empty());
        assert!(bollinger::calculate_bollinger(&[], 20, 2.0).median.is_empty());
        assert!(std_dev::calculate_std_dev(&[], 14).is_empty());
        assert!(adx::calculate_adx(&[], 14).is_empty());
        assert!(cci::calculate_cci(&[], 14).is_empty());
        assert!(aroon::calculate_aroon(&[], 14).is_empty());
        assert!(ichimoku::calculate_ichimoku(&[], &ichimoku::IchimokuConfig::default())
            .tenkan
            .is_empty());
        assert!(stochastic::calculate_stochastic(&[], 14).is_empty());
        assert!(awesome::calculate_awesome(&[]).is_empty());
        assert!(fibonacci::fibonacci_levels(&[]).levels.is_empty());
        assert!(fair_gap::calculate_fair_gap(&[]).is_empty());
    }
}
