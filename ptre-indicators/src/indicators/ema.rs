//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = close[t] * k + EMA[t-1] * (1 - k), k = 2 / (period + 1)
//! Seed: EMA[0] = close[0]. Every point is defined, there is no warm-up.
//! Lookback: 0. Empty input: empty output.
//!
//! The first-price seed pulls early values toward the first observed close.
//! It is kept as is so output matches the published recurrence bit for bit.

use crate::domain::{Bar, IndicatorSeries};
use crate::error::{check_period, IndicatorError};
use crate::indicator::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("EMA", period)?;
        Ok(Self {
            period,
            name: format!("ema_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        if bars.is_empty() {
            return IndicatorSeries::empty();
        }
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        IndicatorSeries::from_values(bars, &ema_of_series(&closes, self.period))
    }
}

/// Smoothing factor for an EMA of the given period.
pub fn ema_alpha(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Compute raw EMA values from a pre-extracted f64 slice, seeded with the
/// first value. Used by MACD for the signal line over the line values.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let Some((&first, rest)) = values.split_first() else {
        return Vec::new();
    };

    let k = ema_alpha(period);
    let mut result = Vec::with_capacity(values.len());
    let mut prev = first;
    result.push(prev);

    for &v in rest {
        prev = v * k + prev * (1.0 - k);
        result.push(prev);
    }

    result
}
