//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), with
//! TR[0] = high[0] - low[0].
//! ATR[period] = mean(TR[0..period]), then Wilder smoothing:
//! ATR[t] = (ATR[t-1] * (period - 1) + TR[t]) / period.
//! Lookback: period. Fewer than period + 1 bars: empty output.

use crate::domain::{Bar, IndicatorSeries};
use crate::error::{check_period, IndicatorError};
use crate::indicator::Indicator;

pub const DEFAULT_ATR_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("ATR", period)?;
        Ok(Self {
            period,
            name: format!("atr_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for Atr {
    fn default() -> Self {
        Self {
            period: DEFAULT_ATR_PERIOD,
            name: format!("atr_{DEFAULT_ATR_PERIOD}"),
        }
    }
}

/// Compute the True Range series from bars.
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let Some(first) = bars.first() else {
        return Vec::new();
    };

    let mut tr = Vec::with_capacity(bars.len());
    tr.push(first.high - first.low);

    for w in bars.windows(2) {
        let (prev, bar) = (&w[0], &w[1]);
        let h = bar.high;
        let l = bar.low;
        let pc = prev.close;
        tr.push((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }

    tr
}

/// One Wilder smoothing update: `(prev * (period - 1) + value) / period`.
pub fn wilder_step(prev: f64, value: f64, period: usize) -> f64 {
    let period = period as f64;
    (prev * (period - 1.0) + value) / period
}

impl Indicator for Atr {
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

        let tr = true_range(bars);
        let mut result = vec![f64::NAN; n];

        // Seed at index `period` from TR[0..period]; TR[period] itself is
        // not folded in.
        let mut atr = tr[..p].iter().sum::<f64>() / p as f64;
        result[p] = atr;

        for i in (p + 1)..n {
            atr = wilder_step(atr, tr[i], p);
            result[i] = atr;
        }

        IndicatorSeries::from_values(bars, &result)
    }
}
