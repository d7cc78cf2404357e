//! Simple Moving Average (SMA).
//!
//! Mean of close prices over a trailing window, summed per window.
//! Lookback: period - 1 (first valid value at index period-1).
//! Fewer than `period` bars: empty output.

use crate::domain::{Bar, IndicatorSeries};
use crate::error::{check_period, IndicatorError};
use crate::indicator::Indicator;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("SMA", period)?;
        Ok(Self {
            period,
            name: format!("sma_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        let n = bars.len();
        if n < self.period {
            tracing::debug!(
                indicator = %self.name,
                bars = n,
                required = self.period,
                "insufficient data"
            );
            return IndicatorSeries::empty();
        }

        let mut result = vec![f64::NAN; n];
        let period = self.period as f64;

        // Per-window sum: no residue from closes that already left the window.
        for (window, slot) in bars.windows(self.period).zip(&mut result[self.period - 1..]) {
            *slot = window.iter().map(|b| b.close).sum::<f64>() / period;
        }

        IndicatorSeries::from_values(bars, &result)
    }
}
