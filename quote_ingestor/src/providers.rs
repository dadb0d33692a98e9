//! Provider abstraction for daily quote sources.
//!
//! This module defines the [`DataProvider`] trait, the single seam between the
//! fetcher and any remote quote vendor. Each concrete provider (currently
//! [`alpha_vantage`]) handles its own URL construction, authentication, and
//! payload validation, and hands back a canonical
//! [`PriceSeries`](crate::models::price_series::PriceSeries).
//!
//! The trait is async and object safe, so callers can pick a provider at
//! runtime behind a `Box<dyn DataProvider>`.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use quote_ingestor::errors::FetchError;
//! use quote_ingestor::models::{price_series::PriceSeries, symbol::Symbol};
//! use quote_ingestor::providers::DataProvider;
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl DataProvider for EmptyProvider {
//!     async fn fetch_daily(&self, symbol: &Symbol) -> Result<PriceSeries, FetchError> {
//!         Ok(PriceSeries::new(symbol.clone(), vec![]).expect("no duplicates"))
//!     }
//! }
//! ```

pub mod alpha_vantage;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::{
    errors::FetchError,
    models::{price_series::PriceSeries, symbol::Symbol},
};

/// Trait for fetching daily bars from a quote provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the daily price history for `symbol`.
    ///
    /// # Returns
    ///
    /// * `Ok(PriceSeries)` - bars sorted ascending by date, fully populated.
    /// * `Err(FetchError)` - the provider-specific failure, already classified.
    async fn fetch_daily(&self, symbol: &Symbol) -> Result<PriceSeries, FetchError>;
}

#[async_trait]
impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    async fn fetch_daily(&self, symbol: &Symbol) -> Result<PriceSeries, FetchError> {
        (**self).fetch_daily(symbol).await
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}
