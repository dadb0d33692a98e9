//! One insights pass: normalize the symbol, fetch its history, compute the
//! indicators, and hand the charts to a renderer.

use std::sync::Arc;

use indicator_engine::{IndicatorConfig, IndicatorSet, IndicatorSnapshot};
use quote_ingestor::{
    QuoteFetcher,
    cache::SeriesCache,
    models::{price_series::PriceSeries, symbol::Symbol},
    providers::{DataProvider, alpha_vantage::AlphaVantageProvider},
    rate_limit::RequestLimiter,
};
use tracing::{info, instrument, warn};

use crate::{
    charts::{ChartRequest, build_charts},
    config::InsightsConfig,
    errors::InsightsError,
    render::ChartRenderer,
};

/// The result of a successful pass.
#[derive(Debug, Clone)]
pub struct Insights {
    pub symbol: Symbol,
    pub series: Arc<PriceSeries>,
    pub indicators: IndicatorSet,
}

impl Insights {
    pub fn charts(&self) -> Vec<ChartRequest> {
        build_charts(&self.symbol, &self.indicators)
    }

    pub fn latest(&self) -> Option<IndicatorSnapshot> {
        self.indicators.latest()
    }

    /// Sends all five charts to `renderer`, stopping at the first failure.
    pub fn render(&self, renderer: &mut impl ChartRenderer) -> Result<(), InsightsError> {
        renderer.render_all(&self.charts())?;
        Ok(())
    }
}

pub struct InsightsPipeline {
    fetcher: QuoteFetcher<Box<dyn DataProvider>>,
    indicators: IndicatorConfig,
}

impl InsightsPipeline {
    pub fn new(fetcher: QuoteFetcher<Box<dyn DataProvider>>, indicators: IndicatorConfig) -> Self {
        Self {
            fetcher,
            indicators,
        }
    }

    /// Wires the Alpha Vantage provider, the limiter, and the optional cache
    /// from `config`. The cache is passed in so its owner decides its scope.
    pub fn from_config(
        config: &InsightsConfig,
        cache: Option<Arc<SeriesCache>>,
    ) -> Result<Self, InsightsError> {
        let provider: Box<dyn DataProvider> =
            Box::new(AlphaVantageProvider::new(config.provider.clone())?);
        let limiter: RequestLimiter = config.limiter()?;

        let mut fetcher = QuoteFetcher::new(provider, limiter);
        if let Some(cache) = cache {
            fetcher = fetcher.with_cache(cache);
        }

        Ok(Self::new(fetcher, config.indicators))
    }

    /// Runs one pass for `raw_symbol`. A failed fetch returns before any
    /// indicator is computed.
    #[instrument(skip(self))]
    pub async fn run(&self, raw_symbol: &str) -> Result<Insights, InsightsError> {
        let symbol = Symbol::parse(raw_symbol)?;

        let series = self
            .fetcher
            .fetch(&symbol)
            .await
            .map_err(|source| InsightsError::Fetch {
                symbol: symbol.clone(),
                source,
            })?;

        let needed = self.indicators.max_window();
        if series.len() < needed {
            warn!(
                bars = series.len(),
                needed, "history shorter than the longest window; some indicators stay undefined"
            );
        }

        let indicators = IndicatorSet::compute(&series, &self.indicators);
        if let Some(latest) = indicators.latest() {
            info!(
                date = %latest.date,
                close = latest.close,
                rsi = ?latest.rsi,
                zone = ?latest.rsi_zone,
                "indicators computed"
            );
        }

        Ok(Insights {
            symbol,
            series,
            indicators,
        })
    }
}
