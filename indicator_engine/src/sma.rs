use quote_ingestor::models::price_series::PriceSeries;

use crate::{rolling::rolling_mean, series::IndicatorSeries};

/// Simple moving average of the close over `window` trailing bars.
pub fn sma(series: &PriceSeries, window: usize) -> IndicatorSeries {
    IndicatorSeries::new(
        format!("{window}-Day SMA"),
        series.dates(),
        rolling_mean(&series.closes(), window),
    )
}
