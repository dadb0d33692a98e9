//! The quote fetcher: cache lookup, rate limiting, then the provider call.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    cache::SeriesCache,
    errors::FetchError,
    models::{price_series::PriceSeries, symbol::Symbol},
    providers::DataProvider,
    rate_limit::RequestLimiter,
};

pub struct QuoteFetcher<P> {
    provider: P,
    limiter: RequestLimiter,
    cache: Option<Arc<SeriesCache>>,
}

impl<P: DataProvider> QuoteFetcher<P> {
    pub fn new(provider: P, limiter: RequestLimiter) -> Self {
        Self {
            provider,
            limiter,
            cache: None,
        }
    }

    /// Attaches a cache owned by the caller. Only successful fetches are
    /// stored.
    pub fn with_cache(mut self, cache: Arc<SeriesCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&Arc<SeriesCache>> {
        self.cache.as_ref()
    }

    /// Returns the daily history for `symbol`.
    ///
    /// A fresh cache entry is returned without touching the limiter or the
    /// network. Otherwise one limiter token is taken and exactly one provider
    /// request is made.
    #[instrument(skip_all, fields(symbol = %symbol))]
    pub async fn fetch(&self, symbol: &Symbol) -> Result<Arc<PriceSeries>, FetchError> {
        if let Some(series) = self.cache.as_ref().and_then(|cache| cache.get(symbol)) {
            debug!(bars = series.len(), "serving cached series");
            return Ok(series);
        }

        self.limiter.acquire().await;

        let series = match self.provider.fetch_daily(symbol).await {
            Ok(series) => Arc::new(series),
            Err(err) => {
                debug!(kind = err.kind(), "fetch failed");
                return Err(err);
            }
        };
        info!(bars = series.len(), "fetched daily series");

        if let Some(cache) = &self.cache {
            cache.insert(symbol.clone(), Arc::clone(&series));
        }

        Ok(series)
    }
}
