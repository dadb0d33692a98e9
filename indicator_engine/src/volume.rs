use quote_ingestor::models::price_series::PriceSeries;

use crate::series::IndicatorSeries;

/// Raw per-bar volume, every entry defined.
pub fn volume(series: &PriceSeries) -> IndicatorSeries {
    IndicatorSeries::new(
        "Trading Volume",
        series.dates(),
        series.bars().iter().map(|bar| Some(bar.volume)),
    )
}
