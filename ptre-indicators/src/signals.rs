//! Interpretation of indicator output — crossovers, zones, bias, trend.
//!
//! These read computed series; they never recompute indicators and never
//! treat an undefined point as zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::domain::MacdSeries;

/// Direction of a MACD histogram sign change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossDirection {
    /// Histogram turned positive: line crossed above signal.
    Bullish,
    /// Histogram turned negative: line crossed below signal.
    Bearish,
}

/// A histogram sign change at `index` relative to the previous signed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossover {
    pub index: usize,
    pub date: NaiveDate,
    pub direction: CrossDirection,
}

/// Detect MACD crossovers.
///
/// A zero histogram has no sign, and undefined points are skipped, so
/// `-1, 0, +1` reports a single bullish crossover at the `+1` point.
pub fn detect_crossovers(series: &MacdSeries) -> Vec<Crossover> {
    let mut crossovers = Vec::new();
    let mut prev_positive: Option<bool> = None;

    for (index, point) in series.iter().enumerate() {
        let Some(h) = point.histogram else {
            continue;
        };
        if h == 0.0 || h.is_nan() {
            continue;
        }
        let positive = h > 0.0;
        if let Some(was_positive) = prev_positive {
            if was_positive != positive {
                crossovers.push(Crossover {
                    index,
                    date: point.date,
                    direction: if positive {
                        CrossDirection::Bullish
                    } else {
                        CrossDirection::Bearish
                    },
                });
            }
        }
        prev_positive = Some(positive);
    }

    crossovers
}

/// RSI reading relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Overbought,
    Neutral,
    Oversold,
}

impl RsiZone {
    /// Strictly above `overbought` or strictly below `oversold`; the
    /// boundaries themselves are neutral.
    pub fn classify(rsi: f64, thresholds: &Thresholds) -> Self {
        if rsi > thresholds.overbought {
            RsiZone::Overbought
        } else if rsi < thresholds.oversold {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}

/// Momentum bias from the MACD histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdBias {
    Bullish,
    Bearish,
}

impl MacdBias {
    /// Positive histogram is bullish; zero or negative is bearish.
    pub fn from_histogram(histogram: f64) -> Self {
        if histogram > 0.0 {
            MacdBias::Bullish
        } else {
            MacdBias::Bearish
        }
    }
}

/// Price position relative to the slow moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendContext {
    Uptrend,
    Downtrend,
}

impl TrendContext {
    pub fn classify(close: f64, sma_slow: f64) -> Self {
        if close > sma_slow {
            TrendContext::Uptrend
        } else {
            TrendContext::Downtrend
        }
    }
}
