//! Indicator trait and the named-series container.
//!
//! Indicators are pure functions: bar history in, aligned series out.
//! No state survives between calls.

use crate::domain::{Bar, IndicatorSeries};
use serde::Serialize;
use std::collections::BTreeMap;

/// Trait for single-series indicators.
///
/// `compute` returns either an empty series (input shorter than the
/// indicator's minimum) or exactly one point per bar, in bar order, with
/// the first `lookback()` points undefined.
///
/// # Look-ahead contamination guard
/// No value at bar t may depend on bars t+1 or later. Every indicator must
/// pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "atr_14").
    fn name(&self) -> &str;

    /// Number of leading undefined points in a non-empty output.
    fn lookback(&self) -> usize;

    /// Minimum number of bars for a non-empty output.
    fn min_bars(&self) -> usize {
        self.lookback().saturating_add(1)
    }

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> IndicatorSeries;
}

/// Computed indicator series keyed by indicator name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndicatorValues {
    series: BTreeMap<String, IndicatorSeries>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: IndicatorSeries) {
        self.series.insert(name.into(), values);
    }

    /// Get the indicator value at a specific bar index.
    ///
    /// `None` when the name is unknown, the index is out of range, or the
    /// point is undefined.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|s| s.value_at(bar_index))
    }

    /// Get the full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&IndicatorSeries> {
        self.series.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn indicator_values_insert_and_get() {
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let mut iv = IndicatorValues::new();
        iv.insert(
            "sma_2",
            IndicatorSeries::from_values(&bars, &[f64::NAN, 10.5, 11.5]),
        );
        assert_eq!(iv.get("sma_2", 0), None);
        assert_eq!(iv.get("sma_2", 1), Some(10.5));
        assert_eq!(iv.get("sma_2", 2), Some(11.5));
        assert_eq!(iv.get("sma_2", 3), None); // out of bounds
    }

    #[test]
    fn indicator_values_missing_name() {
        let iv = IndicatorValues::new();
        assert_eq!(iv.get("nonexistent", 0), None);
        assert!(iv.get_series("nonexistent").is_none());
    }

    #[test]
    fn indicator_values_len_and_names() {
        let mut iv = IndicatorValues::new();
        assert!(iv.is_empty());
        iv.insert("sma", IndicatorSeries::empty());
        iv.insert("ema", IndicatorSeries::empty());
        assert_eq!(iv.len(), 2);
        assert_eq!(iv.names().collect::<Vec<_>>(), vec!["ema", "sma"]);
    }
}
