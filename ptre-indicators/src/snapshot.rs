//! Latest-value summary of the standard indicator set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, Thresholds};
use crate::domain::{Bar, MacdPoint};
use crate::error::ConfigError;
use crate::indicator::Indicator;
use crate::indicators::{Atr, Ema, Macd, Rsi, Sma};
use crate::signals::{MacdBias, RsiZone, TrendContext};

/// Indicator readings at the final bar of a sequence.
///
/// Every reading is `None` when that indicator is undefined at the final bar
/// (warm-up, or the length guard rejected the sequence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub date: NaiveDate,
    pub close: f64,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<MacdPoint>,
    pub atr: Option<f64>,
    pub rsi_zone: Option<RsiZone>,
    pub macd_bias: Option<MacdBias>,
    pub trend: Option<TrendContext>,
}

/// The built indicator set a snapshot reads from.
#[derive(Debug, Clone)]
pub struct SnapshotIndicators {
    pub sma_fast: Sma,
    pub sma_slow: Sma,
    pub ema: Ema,
    pub rsi: Rsi,
    pub atr: Atr,
    pub macd: Macd,
    pub thresholds: Thresholds,
}

impl SnapshotIndicators {
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sma_fast: config.sma_fast()?,
            sma_slow: config.sma_slow()?,
            ema: config.ema()?,
            rsi: config.rsi()?,
            atr: config.atr()?,
            macd: config.macd.build()?,
            thresholds: config.thresholds,
        })
    }
}

impl IndicatorSnapshot {
    /// Summarize `bars` under `config`. `Ok(None)` for an empty sequence.
    pub fn from_bars(bars: &[Bar], config: &EngineConfig) -> Result<Option<Self>, ConfigError> {
        let set = SnapshotIndicators::from_config(config)?;
        Ok(Self::from_indicators(bars, &set))
    }

    /// Summarize `bars` with an already built set. `None` for an empty sequence.
    pub fn from_indicators(bars: &[Bar], set: &SnapshotIndicators) -> Option<Self> {
        let last = bars.last()?;

        let sma_fast = set.sma_fast.compute(bars).last_value();
        let sma_slow = set.sma_slow.compute(bars).last_value();
        let ema = set.ema.compute(bars).last_value();
        let rsi = set.rsi.compute(bars).last_value();
        let atr = set.atr.compute(bars).last_value();
        let macd = set.macd.compute_composite(bars).last().copied();

        Some(Self {
            date: last.date,
            close: last.close,
            sma_fast,
            sma_slow,
            ema,
            rsi,
            macd,
            atr,
            rsi_zone: rsi.map(|v| RsiZone::classify(v, &set.thresholds)),
            macd_bias: macd
                .and_then(|p| p.histogram)
                .map(MacdBias::from_histogram),
            trend: sma_slow.map(|s| TrendContext::classify(last.close, s)),
        })
    }
}
