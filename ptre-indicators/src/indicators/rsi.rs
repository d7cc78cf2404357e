//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Seed: simple mean of the first `period` gains and losses.
//! Lookback: period. Fewer than period + 1 bars: empty output.
//! Edge cases: avg_loss == 0 → RSI = 100; avg_gain == 0 → RSI = 0.

use crate::domain::{Bar, IndicatorSeries};
use crate::error::{check_period, IndicatorError};
use crate::indicator::Indicator;
use crate::indicators::atr::wilder_step;

pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("RSI", period)?;
        Ok(Self {
            period,
            name: format!("rsi_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
            name: format!("rsi_{DEFAULT_RSI_PERIOD}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        let n = bars.len();
        let p = self.period;
        if n <= p {
            tracing::debug!(
                indicator = %self.name,
                bars = n,
                required = p.saturating_add(1),
                "insufficient data"
            );
            return IndicatorSeries::empty();
        }

        let mut result = vec![f64::NAN; n];
        let period = p as f64;

        // Seed: average gain and average loss over the first `period` changes
        let (sum_gain, sum_loss) = (1..=p).fold((0.0, 0.0), |(g, l), i| {
            let (gain, loss) = gain_loss(bars[i].close - bars[i - 1].close);
            (g + gain, l + loss)
        });
        let mut avg_gain = sum_gain / period;
        let mut avg_loss = sum_loss / period;

        result[p] = compute_rsi(avg_gain, avg_loss);

        // Wilder smoothing for subsequent values
        for i in (p + 1)..n {
            let (gain, loss) = gain_loss(bars[i].close - bars[i - 1].close);
            avg_gain = wilder_step(avg_gain, gain, p);
            avg_loss = wilder_step(avg_loss, loss, p);
            result[i] = compute_rsi(avg_gain, avg_loss);
        }

        IndicatorSeries::from_values(bars, &result)
    }
}

fn gain_loss(change: f64) -> (f64, f64) {
    if change > 0.0 {
        (change, 0.0)
    } else if change < 0.0 {
        (0.0, -change)
    } else {
        (0.0, 0.0)
    }
}

/// RSI from smoothed averages. A zero average loss saturates to 100, even
/// when the average gain is zero too.
pub(crate) fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn rsi_all_gains() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = Rsi::new(3).unwrap().compute(&bars);
        // All positive changes → RSI = 100
        for i in 3..6 {
            assert_eq!(result.value_at(i), Some(100.0));
        }
    }

    #[test]
    fn rsi_all_losses() {
        let bars = make_bars(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = Rsi::new(3).unwrap().compute(&bars);
        // All negative changes → RSI = 0
        for i in 3..6 {
            assert_eq!(result.value_at(i), Some(0.0));
        }
    }

    #[test]
    fn rsi_flat_prices_saturate_high() {
        let bars = make_bars(&[50.0; 6]);
        let result = Rsi::new(3).unwrap().compute(&bars);
        assert_eq!(result.value_at(3), Some(100.0));
        assert_eq!(result.value_at(5), Some(100.0));
    }

    #[test]
    fn rsi_mixed() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Changes: +0.34, -0.25, -0.48, +0.72
        // period=3, seed gains=0.34, losses=0.25+0.48=0.73
        // RSI[3] = 100 - 100/(1 + 0.34/0.73) ≈ 31.7757
        // avg_gain = (0.34/3*2 + 0.72)/3, avg_loss = (0.73/3*2)/3
        let bars = make_bars(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let result = Rsi::new(3).unwrap().compute(&bars);

        assert_eq!(result.value_at(0), None);
        assert_eq!(result.value_at(1), None);
        assert_eq!(result.value_at(2), None);

        let g = 0.34 / 3.0;
        let l = 0.73 / 3.0;
        assert_approx(result.value_at(3).unwrap(), 100.0 - 100.0 / (1.0 + g / l), 1e-9);

        let g2 = (g * 2.0 + 0.72) / 3.0;
        let l2 = (l * 2.0) / 3.0;
        assert_approx(result.value_at(4).unwrap(), 100.0 - 100.0 / (1.0 + g2 / l2), 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        // RSI should always be between 0 and 100
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let result = Rsi::new(3).unwrap().compute(&bars);
        for (i, point) in result.iter().enumerate() {
            if let Some(v) = point.value {
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds at bar {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_guard() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        assert!(Rsi::new(3).unwrap().compute(&bars).is_empty());
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Rsi::new(3).unwrap().compute(&bars).len(), 4);
    }

    #[test]
    fn rsi_huge_period_is_empty() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let rsi = Rsi::new(usize::MAX).unwrap();
        assert!(rsi.compute(&bars).is_empty());
        assert_eq!(rsi.min_bars(), usize::MAX);
    }

    #[test]
    fn rsi_lookback_and_default() {
        assert_eq!(Rsi::new(14).unwrap().lookback(), 14);
        assert_eq!(Rsi::default().name(), "rsi_14");
        assert_eq!(Rsi::default().min_bars(), 15);
    }

    #[test]
    fn compute_rsi_saturation() {
        assert_eq!(compute_rsi(1.0, 0.0), 100.0);
        assert_eq!(compute_rsi(0.0, 0.0), 100.0);
        assert_eq!(compute_rsi(0.0, 1.0), 0.0);
        assert_approx(compute_rsi(1.0, 1.0), 50.0, 1e-12);
    }
}
