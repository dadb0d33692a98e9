//! Technical indicators over a daily [`PriceSeries`](quote_ingestor::models::price_series::PriceSeries).
//!
//! Everything here is a pure function of its input: no I/O, no shared state.
//! Each output is an [`IndicatorSeries`] aligned bar-for-bar with the input,
//! with `None` where a rolling window is not yet full. Short inputs produce
//! more leading gaps, never errors.

pub mod bollinger;
pub mod config;
pub mod engine;
pub mod rolling;
pub mod rsi;
pub mod series;
pub mod sma;
pub mod volume;

pub use bollinger::{BollingerBands, bollinger_bands};
pub use config::IndicatorConfig;
pub use engine::{IndicatorSet, IndicatorSnapshot};
pub use rsi::{RsiZone, rsi};
pub use series::{IndicatorPoint, IndicatorSeries};
pub use sma::sma;
pub use volume::volume;
