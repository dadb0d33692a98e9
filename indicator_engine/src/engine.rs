//! Computes the full indicator set for one price series.

use chrono::NaiveDate;
use quote_ingestor::models::price_series::PriceSeries;
use serde::Serialize;

use crate::{
    bollinger::{BollingerBands, bollinger_bands},
    config::IndicatorConfig,
    rsi::{RsiZone, rsi},
    series::IndicatorSeries,
    sma::sma,
    volume::volume,
};

/// Every derived series for one request, aligned to the same dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    pub close: IndicatorSeries,
    pub sma_fast: IndicatorSeries,
    pub sma_slow: IndicatorSeries,
    pub bollinger: BollingerBands,
    pub rsi: IndicatorSeries,
    pub volume: IndicatorSeries,
}

/// The indicator readings at the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub date: NaiveDate,
    pub close: f64,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub rsi: Option<f64>,
    pub rsi_zone: Option<RsiZone>,
}

impl IndicatorSet {
    pub fn compute(series: &PriceSeries, config: &IndicatorConfig) -> Self {
        Self {
            close: IndicatorSeries::new(
                "Closing Price",
                series.dates(),
                series.bars().iter().map(|bar| Some(bar.close)),
            ),
            sma_fast: sma(series, config.sma_fast),
            sma_slow: sma(series, config.sma_slow),
            bollinger: bollinger_bands(series, config.bollinger_window, config.bollinger_k),
            rsi: rsi(series, config.rsi_window),
            volume: volume(series),
        }
    }

    /// Readings at the last bar, or `None` for an empty series.
    pub fn latest(&self) -> Option<IndicatorSnapshot> {
        let last = self.close.points().last()?;
        let rsi = self.rsi.last_value();

        Some(IndicatorSnapshot {
            date: last.date,
            close: last.value?,
            sma_fast: self.sma_fast.last_value(),
            sma_slow: self.sma_slow.last_value(),
            bollinger_upper: self.bollinger.upper.last_value(),
            bollinger_lower: self.bollinger.lower.last_value(),
            rsi,
            rsi_zone: rsi.map(RsiZone::classify),
        })
    }
}
