//! Alpha Vantage `TIME_SERIES_DAILY` provider.

pub mod params;
pub mod provider;
pub mod response;

pub use params::{AlphaVantageParams, OutputSize};
pub use provider::AlphaVantageProvider;
