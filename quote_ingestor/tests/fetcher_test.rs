use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use nonzero_ext::nonzero;
use quote_ingestor::{
    FetchError, QuoteFetcher,
    cache::{CachePolicy, SeriesCache},
    models::{price_series::PriceSeries, symbol::Symbol},
    providers::{DataProvider, alpha_vantage::response::parse_daily_response},
    rate_limit::RequestLimiter,
};
use serde_json::{Value, json};

/// Replays a canned provider payload and counts how often it was asked.
struct CannedProvider {
    body: Value,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl DataProvider for CannedProvider {
    async fn fetch_daily(&self, symbol: &Symbol) -> Result<PriceSeries, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        parse_daily_response(symbol, self.body.clone())
    }
}

fn daily_body() -> Value {
    json!({
        "Meta Data": { "2. Symbol": "AAPL" },
        "Time Series (Daily)": {
            "2024-05-02": { "1. open": "172.5", "2. high": "173.4", "3. low": "170.9",
                            "4. close": "173.0", "5. volume": "94214915" },
            "2024-05-01": { "1. open": "169.6", "2. high": "172.7", "3. low": "169.1",
                            "4. close": "169.3", "5. volume": "50383147" },
        }
    })
}

fn fetcher(body: Value) -> (QuoteFetcher<CannedProvider>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CannedProvider {
        body,
        calls: Arc::clone(&calls),
    };
    let limiter = RequestLimiter::per_minute(nonzero!(600u32), nonzero!(10u32));
    (QuoteFetcher::new(provider, limiter), calls)
}

#[tokio::test]
async fn fetch_returns_sorted_series() {
    let (fetcher, calls) = fetcher(daily_body());
    let symbol = Symbol::parse("aapl").unwrap();

    let series = fetcher.fetch(&symbol).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(series.symbol().as_str(), "AAPL");
    assert_eq!(series.closes(), vec![169.3, 173.0]);
}

#[tokio::test]
async fn cached_series_skips_provider() {
    let (fetcher, calls) = fetcher(daily_body());
    let cache = Arc::new(SeriesCache::new(CachePolicy {
        ttl: Duration::from_secs(60),
        capacity: 4,
    }));
    let fetcher = fetcher.with_cache(Arc::clone(&cache));
    let symbol = Symbol::parse("AAPL").unwrap();

    let first = fetcher.fetch(&symbol).await.unwrap();
    let second = fetcher.fetch(&symbol).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn cache_hit_does_not_consume_quota() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CannedProvider {
        body: daily_body(),
        calls: Arc::clone(&calls),
    };
    // One request per minute: a second provider call would block the test.
    let limiter = RequestLimiter::per_minute(nonzero!(1u32), nonzero!(1u32));
    let fetcher = QuoteFetcher::new(provider, limiter).with_cache(Arc::new(SeriesCache::default()));
    let symbol = Symbol::parse("AAPL").unwrap();

    fetcher.fetch(&symbol).await.unwrap();
    let cached = tokio::time::timeout(Duration::from_secs(1), fetcher.fetch(&symbol)).await;

    assert!(cached.is_ok(), "cache hit waited on the rate limiter");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn errors_are_not_cached() {
    let (fetcher, calls) = fetcher(json!({ "Error Message": "Invalid API call." }));
    let cache = Arc::new(SeriesCache::default());
    let fetcher = fetcher.with_cache(Arc::clone(&cache));
    let symbol = Symbol::parse("ZZZZ").unwrap();

    for _ in 0..2 {
        let err = fetcher.fetch(&symbol).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidSymbol { .. }));
        assert_eq!(err.kind(), "invalid_symbol");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn rate_limit_sentinel_surfaces_as_rate_limited() {
    let (fetcher, _) = fetcher(json!({
        "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."
    }));

    let err = fetcher
        .fetch(&Symbol::parse("IBM").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::RateLimited { .. }));
    assert!(err.to_string().starts_with("API request limit reached"));
}

#[tokio::test]
async fn boxed_providers_can_be_swapped_at_runtime() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider: Box<dyn DataProvider> = Box::new(CannedProvider {
        body: daily_body(),
        calls: Arc::clone(&calls),
    });
    let fetcher = QuoteFetcher::new(provider, RequestLimiter::default());

    let series = fetcher.fetch(&Symbol::parse("AAPL").unwrap()).await.unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
