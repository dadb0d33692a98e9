//! Bollinger Bands: a volatility envelope of `k` sample standard deviations
//! around the simple moving average, over the same trailing window.

use quote_ingestor::models::price_series::PriceSeries;
use serde::Serialize;

use crate::{
    rolling::{rolling_mean, rolling_sample_std},
    series::IndicatorSeries,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBands {
    pub middle: IndicatorSeries,
    pub upper: IndicatorSeries,
    pub lower: IndicatorSeries,
}

/// Computes the bands over `window` trailing closes.
///
/// The middle band is exactly `sma(series, window)`. Upper and lower bands
/// are defined wherever both the mean and the deviation are, so a window of
/// one leaves them undefined. With `k >= 0`, `upper >= middle >= lower` holds
/// for every defined entry.
pub fn bollinger_bands(series: &PriceSeries, window: usize, k: f64) -> BollingerBands {
    let closes = series.closes();
    let means = rolling_mean(&closes, window);
    let deviations = rolling_sample_std(&closes, window);

    let band = |sign: f64| -> Vec<Option<f64>> {
        means
            .iter()
            .zip(&deviations)
            .map(|(&mean, &std)| Some(mean? + sign * k * std?))
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);

    BollingerBands {
        middle: IndicatorSeries::new(format!("{window}-Day SMA"), series.dates(), means),
        upper: IndicatorSeries::new("Upper Bollinger Band", series.dates(), upper),
        lower: IndicatorSeries::new("Lower Bollinger Band", series.dates(), lower),
    }
}
