//! Indicator output series, aligned 1:1 with the input bars.
//!
//! A point whose value is `None` is in warm-up (not enough history yet).
//! Consumers must treat it as "not renderable", never as zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// One output value of a single-series indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl IndicatorPoint {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }

    pub fn undefined(date: NaiveDate) -> Self {
        Self { date, value: None }
    }

    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }
}

/// Ordered indicator output. Either empty (length guard failed) or exactly
/// one point per input bar, carrying the bar's date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries {
    points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Zip raw values onto the bar dates. NaN values become undefined points.
    pub fn from_values(bars: &[Bar], values: &[f64]) -> Self {
        debug_assert_eq!(bars.len(), values.len());
        let points = bars
            .iter()
            .zip(values)
            .map(|(bar, &v)| IndicatorPoint::new(bar.date, (!v.is_nan()).then_some(v)))
            .collect();
        Self { points }
    }

    pub fn from_points(points: Vec<IndicatorPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[IndicatorPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndicatorPoint> {
        self.points.iter()
    }

    pub fn get(&self, index: usize) -> Option<&IndicatorPoint> {
        self.points.get(index)
    }

    /// Value at `index`, `None` if out of range or undefined.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|p| p.value)
    }

    /// Value of the final point, `None` if the series is empty or the final
    /// point is still in warm-up.
    pub fn last_value(&self) -> Option<f64> {
        self.points.last().and_then(|p| p.value)
    }

    /// Number of defined points.
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_defined()).count()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Values with undefined points as `f64::NAN`, for raw numeric pipelines.
    pub fn to_nan_vec(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.value.unwrap_or(f64::NAN))
            .collect()
    }
}

impl<'a> IntoIterator for &'a IndicatorSeries {
    type Item = &'a IndicatorPoint;
    type IntoIter = std::slice::Iter<'a, IndicatorPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// One output row of the convergence/divergence composite.
///
/// `line` is always defined once the series passed its length guard.
/// `signal` and `histogram` are defined wherever the signal line has a value
/// for this date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub date: NaiveDate,
    pub line: f64,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// Ordered MACD output, aligned 1:1 with the input bars (or empty).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacdSeries {
    points: Vec<MacdPoint>,
}

impl MacdSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<MacdPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[MacdPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MacdPoint> {
        self.points.iter()
    }

    pub fn get(&self, index: usize) -> Option<&MacdPoint> {
        self.points.get(index)
    }

    pub fn last(&self) -> Option<&MacdPoint> {
        self.points.last()
    }

    pub fn histogram_values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.histogram).collect()
    }

    /// Project the line component onto a single-value series.
    pub fn line_series(&self) -> IndicatorSeries {
        self.project(|p| Some(p.line))
    }

    /// Project the signal component onto a single-value series.
    pub fn signal_series(&self) -> IndicatorSeries {
        self.project(|p| p.signal)
    }

    /// Project the histogram component onto a single-value series.
    pub fn histogram_series(&self) -> IndicatorSeries {
        self.project(|p| p.histogram)
    }

    fn project(&self, f: impl Fn(&MacdPoint) -> Option<f64>) -> IndicatorSeries {
        IndicatorSeries::from_points(
            self.points
                .iter()
                .map(|p| IndicatorPoint::new(p.date, f(p)))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a MacdSeries {
    type Item = &'a MacdPoint;
    type IntoIter = std::slice::Iter<'a, MacdPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn from_values_maps_nan_to_undefined() {
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let series = IndicatorSeries::from_values(&bars, &[f64::NAN, 1.5, 2.5]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.value_at(0), None);
        assert_eq!(series.value_at(1), Some(1.5));
        assert_eq!(series.defined_count(), 2);
        assert_eq!(series.last_value(), Some(2.5));
        assert_eq!(series.dates(), bars.iter().map(|b| b.date).collect::<Vec<_>>());
    }

    #[test]
    fn nan_vec_roundtrip() {
        let bars = make_bars(&[10.0, 11.0]);
        let series = IndicatorSeries::from_values(&bars, &[f64::NAN, 3.0]);
        let raw = series.to_nan_vec();
        assert!(raw[0].is_nan());
        assert_eq!(raw[1], 3.0);
    }

    #[test]
    fn last_value_undefined_tail() {
        let bars = make_bars(&[10.0, 11.0]);
        let series = IndicatorSeries::from_values(&bars, &[1.0, f64::NAN]);
        assert_eq!(series.last_value(), None);
        assert_eq!(IndicatorSeries::empty().last_value(), None);
    }

    #[test]
    fn undefined_serializes_as_null() {
        let bars = make_bars(&[10.0, 11.0]);
        let series = IndicatorSeries::from_values(&bars, &[f64::NAN, 4.0]);
        let json = serde_json::to_value(&series).unwrap();
        assert!(json[0]["value"].is_null());
        assert_eq!(json[1]["value"], 4.0);
        assert_eq!(json[0]["date"], "2024-01-02");
    }

    #[test]
    fn macd_projections_keep_alignment() {
        let bars = make_bars(&[10.0, 11.0]);
        let series = MacdSeries::from_points(vec![
            MacdPoint {
                date: bars[0].date,
                line: 0.0,
                signal: Some(0.0),
                histogram: Some(0.0),
            },
            MacdPoint {
                date: bars[1].date,
                line: 0.5,
                signal: None,
                histogram: None,
            },
        ]);
        assert_eq!(series.line_series().values(), vec![Some(0.0), Some(0.5)]);
        assert_eq!(series.signal_series().values(), vec![Some(0.0), None]);
        assert_eq!(series.histogram_values(), vec![Some(0.0), None]);
        assert_eq!(series.histogram_series().dates(), series.line_series().dates());
    }
}
