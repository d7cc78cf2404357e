//! Indicator engine — runs a configured indicator set over one bar sequence.
//!
//! Every indicator is independent and pure, so the set is evaluated in
//! parallel on the global rayon pool. Output does not depend on the
//! evaluation order.

use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::domain::{Bar, IndicatorSeries, MacdSeries};
use crate::error::ConfigError;
use crate::indicator::{Indicator, IndicatorValues};
use crate::signals::{detect_crossovers, Crossover};
use crate::snapshot::{IndicatorSnapshot, SnapshotIndicators};

pub struct IndicatorEngine {
    config: EngineConfig,
    indicators: Vec<Box<dyn Indicator>>,
    standard: SnapshotIndicators,
    parallel: bool,
}

impl IndicatorEngine {
    /// Validate `config` and build its indicator set.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let standard = SnapshotIndicators::from_config(&config)?;

        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(standard.sma_fast.clone()),
            Box::new(standard.sma_slow.clone()),
            Box::new(standard.ema.clone()),
            Box::new(standard.rsi.clone()),
            Box::new(standard.atr.clone()),
            Box::new(standard.macd.clone().line()),
            Box::new(standard.macd.clone().signal()),
            Box::new(standard.macd.clone().histogram()),
        ];

        tracing::debug!(
            indicators = indicators.len(),
            warmup = indicators.iter().map(|i| i.lookback()).max().unwrap_or(0),
            "indicator engine ready"
        );

        Ok(Self {
            config,
            indicators,
            standard,
            parallel: true,
        })
    }

    /// Toggle parallel evaluation (on by default).
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Names of the configured series, in evaluation order.
    pub fn indicator_names(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.name()).collect()
    }

    /// Longest warm-up across the configured indicators.
    pub fn warmup(&self) -> usize {
        self.indicators
            .iter()
            .map(|i| i.lookback())
            .max()
            .unwrap_or(0)
    }

    /// Compute every configured series for `bars`, keyed by indicator name.
    pub fn compute(&self, bars: &[Bar]) -> IndicatorValues {
        let computed: Vec<(String, IndicatorSeries)> = if self.parallel {
            self.indicators
                .par_iter()
                .map(|indicator| (indicator.name().to_string(), indicator.compute(bars)))
                .collect()
        } else {
            self.indicators
                .iter()
                .map(|indicator| (indicator.name().to_string(), indicator.compute(bars)))
                .collect()
        };

        let mut values = IndicatorValues::new();
        for (name, series) in computed {
            debug_assert!(
                series.is_empty() || series.len() == bars.len(),
                "indicator '{name}' produced {} values for {} bars",
                series.len(),
                bars.len()
            );
            values.insert(name, series);
        }
        values
    }

    /// Full MACD composite for `bars`.
    pub fn macd(&self, bars: &[Bar]) -> MacdSeries {
        self.standard.macd.compute_composite(bars)
    }

    /// MACD histogram crossovers for `bars`.
    pub fn crossovers(&self, bars: &[Bar]) -> Vec<Crossover> {
        detect_crossovers(&self.macd(bars))
    }

    /// Latest readings for `bars`, `None` when `bars` is empty.
    pub fn snapshot(&self, bars: &[Bar]) -> Option<IndicatorSnapshot> {
        IndicatorSnapshot::from_indicators(bars, &self.standard)
    }
}
