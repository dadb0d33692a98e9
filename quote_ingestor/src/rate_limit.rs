//! Client-side request throttling.
//!
//! The free Alpha Vantage tier allows 5 requests per minute. Instead of
//! sleeping a fixed interval before every call, the fetcher asks a
//! [`RequestLimiter`] for a token; the limiter only waits when the bucket is
//! actually empty.

use std::{num::NonZeroU32, time::Duration};

use governor::{
    DefaultDirectRateLimiter, Quota, RateLimiter,
    clock::{Clock, DefaultClock},
};
use nonzero_ext::nonzero;
use tracing::info;

/// Token-bucket limiter consulted before every outbound request.
pub struct RequestLimiter {
    inner: DefaultDirectRateLimiter,
    clock: DefaultClock,
}

impl RequestLimiter {
    /// Allows `requests_per_minute` requests, replenished evenly, with at most
    /// `burst` of them back to back.
    ///
    /// `per_minute(5, 1)` spaces requests 12 seconds apart.
    pub fn per_minute(requests_per_minute: NonZeroU32, burst: NonZeroU32) -> Self {
        Self::from_quota(Quota::per_minute(requests_per_minute).allow_burst(burst))
    }

    pub fn from_quota(quota: Quota) -> Self {
        Self {
            inner: RateLimiter::direct(quota),
            clock: DefaultClock::default(),
        }
    }

    /// Takes a token if one is available, otherwise reports how long until
    /// the next one is.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        self.inner
            .check()
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    /// Waits until a token is available and takes it.
    pub async fn acquire(&self) {
        if let Err(wait) = self.try_acquire() {
            info!(
                wait_ms = wait.as_millis() as u64,
                "request quota exhausted, waiting before next request"
            );
            self.inner.until_ready().await;
        }
    }
}

impl Default for RequestLimiter {
    fn default() -> Self {
        Self::per_minute(nonzero!(5u32), nonzero!(1u32))
    }
}

impl std::fmt::Debug for RequestLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLimiter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn second_immediate_request_is_refused() {
        let limiter = RequestLimiter::per_minute(nonzero!(1u32), nonzero!(1u32));

        assert!(limiter.try_acquire().is_ok());
        let wait = limiter.try_acquire().unwrap_err();
        assert!(wait > Duration::from_secs(50), "wait was {wait:?}");
    }

    #[test]
    fn default_quota_spaces_requests_twelve_seconds_apart() {
        let limiter = RequestLimiter::default();

        assert!(limiter.try_acquire().is_ok());
        let wait = limiter.try_acquire().unwrap_err();
        assert!(wait <= Duration::from_secs(12));
        assert!(wait > Duration::from_secs(11));
    }

    #[test]
    fn burst_allows_back_to_back_requests() {
        let limiter = RequestLimiter::per_minute(nonzero!(60u32), nonzero!(3u32));

        for _ in 0..3 {
            assert!(limiter.try_acquire().is_ok());
        }
        assert!(limiter.try_acquire().is_err());
    }

    #[tokio::test]
    async fn acquire_waits_for_replenishment() {
        let quota = Quota::with_period(Duration::from_millis(60)).unwrap();
        let limiter = RequestLimiter::from_quota(quota);

        limiter.acquire().await;
        let started = Instant::now();
        limiter.acquire().await;

        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
