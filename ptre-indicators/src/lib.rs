//! PTRE indicators — technical-indicator engine over daily price bars.
//!
//! This crate turns an ordered bar sequence for one instrument into aligned
//! indicator series:
//! - Simple and exponential moving averages
//! - Relative Strength Index (Wilder smoothing)
//! - MACD line, signal and histogram
//! - Average True Range (Wilder smoothing)
//!
//! Every indicator is a pure function of `&[Bar]`. Output is either empty
//! (input too short) or one point per bar, with warm-up points undefined.
//! Nothing is fetched, cached or persisted here.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod indicators;
pub mod signals;
pub mod snapshot;

pub use config::EngineConfig;
pub use domain::{Bar, IndicatorPoint, IndicatorSeries, MacdPoint, MacdSeries};
pub use engine::IndicatorEngine;
pub use error::{ConfigError, IndicatorError};
pub use indicator::{Indicator, IndicatorValues};
pub use snapshot::{IndicatorSnapshot, SnapshotIndicators};
