//! Error types.
//!
//! Short input is not an error: every indicator answers it with an empty
//! series. Errors only cover construction and configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("{indicator} period must be >= 1 (got {period})")]
    InvalidPeriod {
        indicator: &'static str,
        period: usize,
    },

    #[error("MACD windows must satisfy 1 <= fast < slow and signal >= 1 (got {fast}/{slow}/{signal})")]
    InvalidMacdWindows {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

pub(crate) fn check_period(indicator: &'static str, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator, period });
    }
    Ok(())
}
