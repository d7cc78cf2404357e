//! Domain types: input bars and aligned indicator output.

pub mod bar;
pub mod series;

pub use bar::{is_chronological, Bar};
pub use series::{IndicatorPoint, IndicatorSeries, MacdPoint, MacdSeries};
