//! Moving Average Convergence/Divergence (MACD).
//!
//! Three components, computed together:
//! - Line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(line, signal), seeded with the first line value
//! - Histogram: line - signal
//!
//! Both EMAs are first-price seeded, so the line is defined at every index.
//! The guard is on overall length: fewer than `slow` bars gives empty output.
//!
//! The signal line is computed over the valid line values only and mapped
//! back onto the bar dates through an explicit date → value lookup, so a
//! filtered line never shifts signal values onto the wrong session.
//!
//! As an `Indicator`, one component is exposed per instance (see
//! [`Macd::line`], [`Macd::signal`], [`Macd::histogram`]).

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{Bar, IndicatorSeries, MacdPoint, MacdSeries};
use crate::error::IndicatorError;
use crate::indicator::Indicator;
use crate::indicators::ema::ema_of_series;

pub const DEFAULT_FAST_PERIOD: usize = 12;
pub const DEFAULT_SLOW_PERIOD: usize = 26;
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;

/// Which MACD component an `Indicator` instance reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdComponent {
    Line,
    Signal,
    Histogram,
}

impl MacdComponent {
    fn label(self) -> &'static str {
        match self {
            MacdComponent::Line => "line",
            MacdComponent::Signal => "signal",
            MacdComponent::Histogram => "histogram",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    component: MacdComponent,
    name: String,
}

impl Macd {
    /// MACD with custom windows. Requires `1 <= fast < slow` and `signal >= 1`.
    /// The returned instance reports the line component.
    pub fn new(fast: usize, slow: usize, signal: usize) -> Result<Self, IndicatorError> {
        if fast == 0 || fast >= slow || signal == 0 {
            return Err(IndicatorError::InvalidMacdWindows { fast, slow, signal });
        }
        Ok(Self::with_component(fast, slow, signal, MacdComponent::Line))
    }

    /// The conventional (12, 26, 9) MACD.
    pub fn standard() -> Self {
        Self::with_component(
            DEFAULT_FAST_PERIOD,
            DEFAULT_SLOW_PERIOD,
            DEFAULT_SIGNAL_PERIOD,
            MacdComponent::Line,
        )
    }

    fn with_component(fast: usize, slow: usize, signal: usize, component: MacdComponent) -> Self {
        Self {
            fast,
            slow,
            signal,
            component,
            name: format!("macd_{}_{fast}_{slow}_{signal}", component.label()),
        }
    }

    pub fn line(self) -> Self {
        Self::with_component(self.fast, self.slow, self.signal, MacdComponent::Line)
    }

    pub fn signal(self) -> Self {
        Self::with_component(self.fast, self.slow, self.signal, MacdComponent::Signal)
    }

    pub fn histogram(self) -> Self {
        Self::with_component(self.fast, self.slow, self.signal, MacdComponent::Histogram)
    }

    pub fn fast_period(&self) -> usize {
        self.fast
    }

    pub fn slow_period(&self) -> usize {
        self.slow
    }

    pub fn signal_period(&self) -> usize {
        self.signal
    }

    pub fn component(&self) -> MacdComponent {
        self.component
    }

    /// Compute all three components, aligned to the bars.
    pub fn compute_composite(&self, bars: &[Bar]) -> MacdSeries {
        let n = bars.len();
        if n < self.slow {
            tracing::debug!(
                indicator = %self.name,
                bars = n,
                required = self.slow,
                "insufficient data"
            );
            return MacdSeries::empty();
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();

        let signal_by_date = self.signal_by_date(bars, &line);

        let points = bars
            .iter()
            .zip(&line)
            .map(|(bar, &line)| {
                let signal = signal_by_date.get(&bar.date).copied();
                MacdPoint {
                    date: bar.date,
                    line,
                    signal,
                    histogram: signal.map(|s| line - s),
                }
            })
            .collect();

        MacdSeries::from_points(points)
    }

    /// EMA(signal) over the valid line values, keyed by session date.
    fn signal_by_date(&self, bars: &[Bar], line: &[f64]) -> BTreeMap<NaiveDate, f64> {
        let (dates, values): (Vec<NaiveDate>, Vec<f64>) = bars
            .iter()
            .zip(line)
            .filter(|(_, v)| v.is_finite())
            .map(|(bar, &v)| (bar.date, v))
            .unzip();

        dates
            .into_iter()
            .zip(ema_of_series(&values, self.signal))
            .collect()
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::standard()
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn min_bars(&self) -> usize {
        self.slow
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        let composite = self.compute_composite(bars);
        match self.component {
            MacdComponent::Line => composite.line_series(),
            MacdComponent::Signal => composite.signal_series(),
            MacdComponent::Histogram => composite.histogram_series(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn macd_guard_on_slow_period() {
        let bars = make_bars(&ramp(25));
        assert!(Macd::standard().compute_composite(&bars).is_empty());
        assert!(Macd::standard().compute(&bars).is_empty());

        let bars = make_bars(&ramp(26));
        assert_eq!(Macd::standard().compute_composite(&bars).len(), 26);
    }

    #[test]
    fn macd_fully_defined_after_guard() {
        let bars = make_bars(&ramp(40));
        let series = Macd::standard().compute_composite(&bars);
        assert_eq!(series.len(), 40);
        for (point, bar) in series.iter().zip(&bars) {
            assert_eq!(point.date, bar.date);
            assert!(point.signal.is_some());
            assert!(point.histogram.is_some());
        }
    }

    #[test]
    fn macd_matches_manual_recurrence() {
        let closes = ramp(30);
        let bars = make_bars(&closes);
        let series = Macd::standard().compute_composite(&bars);

        let fast = ema_of_series(&closes, 12);
        let slow = ema_of_series(&closes, 26);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&line, 9);

        for i in 0..30 {
            let p = series.get(i).unwrap();
            assert_eq!(p.line, line[i]);
            assert_eq!(p.signal, Some(signal[i]));
            assert_eq!(p.histogram, Some(line[i] - signal[i]));
        }
    }

    #[test]
    fn macd_seed_is_zero() {
        // Both EMAs seed at close[0], so line[0] = 0 and signal[0] = line[0].
        let bars = make_bars(&ramp(26));
        let first = *Macd::standard().compute_composite(&bars).get(0).unwrap();
        assert_eq!(first.line, 0.0);
        assert_eq!(first.signal, Some(0.0));
        assert_eq!(first.histogram, Some(0.0));
    }

    #[test]
    fn macd_rising_prices_positive_line() {
        let bars = make_bars(&ramp(60));
        let series = Macd::standard().compute_composite(&bars);
        assert!(series.iter().skip(1).all(|p| p.line > 0.0));
    }

    #[test]
    fn macd_component_indicators() {
        let bars = make_bars(&ramp(30));
        let composite = Macd::standard().compute_composite(&bars);
        let hist = Macd::standard().histogram().compute(&bars);
        let signal = Macd::standard().signal().compute(&bars);
        let line = Macd::standard().histogram().line().compute(&bars);

        assert_eq!(hist.values(), composite.histogram_values());
        assert_eq!(signal.values(), composite.signal_series().values());
        assert_approx(
            line.value_at(29).unwrap(),
            composite.get(29).unwrap().line,
            DEFAULT_EPSILON,
        );
    }

    #[test]
    fn macd_names() {
        assert_eq!(Macd::standard().name(), "macd_line_12_26_9");
        assert_eq!(Macd::standard().signal().name(), "macd_signal_12_26_9");
        assert_eq!(Macd::standard().histogram().name(), "macd_histogram_12_26_9");
        assert_eq!(Macd::new(5, 10, 3).unwrap().name(), "macd_line_5_10_3");
    }

    #[test]
    fn macd_invalid_windows() {
        assert!(Macd::new(26, 12, 9).is_err());
        assert!(Macd::new(12, 12, 9).is_err());
        assert!(Macd::new(0, 26, 9).is_err());
        assert!(Macd::new(12, 26, 0).is_err());
    }

    #[test]
    fn macd_custom_windows_guard() {
        let macd = Macd::new(3, 6, 2).unwrap();
        assert_eq!(macd.min_bars(), 6);
        assert!(macd.compute_composite(&make_bars(&ramp(5))).is_empty());
        assert_eq!(macd.compute_composite(&make_bars(&ramp(6))).len(), 6);
    }
}
