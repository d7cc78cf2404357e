//! Engine configuration: indicator periods and interpretation thresholds.
//!
//! Stored as TOML. Every field has a default, so an empty document yields
//! the standard dashboard set (SMA 20/50, EMA 20, RSI 14, MACD 12/26/9,
//! ATR 14, RSI zones at 70/30).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{check_period, ConfigError};
use crate::indicators::macd::{DEFAULT_FAST_PERIOD, DEFAULT_SIGNAL_PERIOD, DEFAULT_SLOW_PERIOD};
use crate::indicators::{Atr, Ema, Macd, Rsi, Sma};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sma_fast_period: usize,
    pub sma_slow_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub atr_period: usize,
    pub macd: MacdConfig,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// RSI zone boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sma_fast_period: 20,
            sma_slow_period: 50,
            ema_period: 20,
            rsi_period: 14,
            atr_period: 14,
            macd: MacdConfig::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: DEFAULT_FAST_PERIOD,
            slow: DEFAULT_SLOW_PERIOD,
            signal: DEFAULT_SIGNAL_PERIOD,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl EngineConfig {
    /// Load and validate a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading engine config");
        Self::from_toml_str(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(format!("serialize: {e}")))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_period("SMA", self.sma_fast_period)?;
        check_period("SMA", self.sma_slow_period)?;
        check_period("EMA", self.ema_period)?;
        check_period("RSI", self.rsi_period)?;
        check_period("ATR", self.atr_period)?;
        self.macd.build()?;
        self.thresholds.validate()
    }

    pub fn sma_fast(&self) -> Result<Sma, ConfigError> {
        Ok(Sma::new(self.sma_fast_period)?)
    }

    pub fn sma_slow(&self) -> Result<Sma, ConfigError> {
        Ok(Sma::new(self.sma_slow_period)?)
    }

    pub fn ema(&self) -> Result<Ema, ConfigError> {
        Ok(Ema::new(self.ema_period)?)
    }

    pub fn rsi(&self) -> Result<Rsi, ConfigError> {
        Ok(Rsi::new(self.rsi_period)?)
    }

    pub fn atr(&self) -> Result<Atr, ConfigError> {
        Ok(Atr::new(self.atr_period)?)
    }
}

impl MacdConfig {
    pub fn build(&self) -> Result<Macd, ConfigError> {
        Ok(Macd::new(self.fast, self.slow, self.signal)?)
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.overbought) || !in_range(self.oversold) {
            return Err(ConfigError::Invalid(format!(
                "RSI thresholds must lie in [0, 100] (overbought={}, oversold={})",
                self.overbought, self.oversold
            )));
        }
        if self.oversold >= self.overbought {
            return Err(ConfigError::Invalid(format!(
                "oversold ({}) must be below overbought ({})",
                self.oversold, self.overbought
            )));
        }
        Ok(())
    }
}
