//! Application configuration: a TOML file with optional sections, falling
//! back to defaults that match the provider's free tier.

use std::{num::NonZeroU32, path::Path, time::Duration};

use indicator_engine::IndicatorConfig;
use quote_ingestor::{
    cache::CachePolicy, providers::alpha_vantage::AlphaVantageParams,
    rate_limit::RequestLimiter,
};
use serde::{Deserialize, Serialize};
use shared_utils::config::{ConfigError, load_toml};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InsightsConfig {
    pub provider: AlphaVantageParams,
    pub rate_limit: RateLimitConfig,
    pub cache: CacheConfig,
    pub indicators: IndicatorConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 5,
            burst: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_secs: u64,
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let policy = CachePolicy::default();
        Self {
            enabled: true,
            ttl_secs: policy.ttl.as_secs(),
            capacity: policy.capacity,
        }
    }
}

impl CacheConfig {
    pub fn policy(&self) -> CachePolicy {
        CachePolicy {
            ttl: Duration::from_secs(self.ttl_secs),
            capacity: self.capacity,
        }
    }
}

impl InsightsConfig {
    /// Loads and validates the config file, or returns the defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = match path {
            Some(path) => load_toml(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("provider.base_url", "must not be empty"));
        }
        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigError::invalid("provider.api_key_env", "must not be empty"));
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::invalid("provider.timeout_secs", "must be at least 1"));
        }

        self.limiter()?;

        if self.cache.enabled && self.cache.capacity == 0 {
            return Err(ConfigError::invalid(
                "cache.capacity",
                "must be at least 1 when the cache is enabled",
            ));
        }

        let indicators = &self.indicators;
        for (field, window) in [
            ("indicators.sma_fast", indicators.sma_fast),
            ("indicators.sma_slow", indicators.sma_slow),
            ("indicators.bollinger_window", indicators.bollinger_window),
            ("indicators.rsi_window", indicators.rsi_window),
        ] {
            if window == 0 {
                return Err(ConfigError::invalid(field, "window must be at least 1"));
            }
        }
        if !(indicators.bollinger_k.is_finite() && indicators.bollinger_k >= 0.0) {
            return Err(ConfigError::invalid(
                "indicators.bollinger_k",
                "must be a finite, non-negative number",
            ));
        }

        Ok(())
    }

    /// Builds the request limiter described by `[rate_limit]`.
    pub fn limiter(&self) -> Result<RequestLimiter, ConfigError> {
        let per_minute = NonZeroU32::new(self.rate_limit.requests_per_minute).ok_or_else(|| {
            ConfigError::invalid("rate_limit.requests_per_minute", "must be at least 1")
        })?;
        let burst = NonZeroU32::new(self.rate_limit.burst)
            .ok_or_else(|| ConfigError::invalid("rate_limit.burst", "must be at least 1"))?;

        Ok(RequestLimiter::per_minute(per_minute, burst))
    }
}
