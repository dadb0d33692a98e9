use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::symbol::Symbol;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";
const DAILY_FUNCTION: &str = "TIME_SERIES_DAILY";

/// How much history the provider returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputSize {
    /// The latest 100 trading days.
    #[default]
    Compact,
    /// Up to 20+ years of history.
    Full,
}

impl OutputSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

/// Alpha Vantage connection settings.
///
/// Deserializes from the `[provider]` table of the application config; every
/// field is optional.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlphaVantageParams {
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub output_size: OutputSize,
    pub timeout_secs: u64,
}

impl Default for AlphaVantageParams {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            output_size: OutputSize::default(),
            timeout_secs: 30,
        }
    }
}

impl AlphaVantageParams {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builds the query string pairs for a daily series request.
pub fn construct_query(
    symbol: &Symbol,
    output_size: OutputSize,
    api_key: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("function", DAILY_FUNCTION.to_string()),
        ("symbol", symbol.as_str().to_string()),
        ("outputsize", output_size.as_str().to_string()),
        ("apikey", api_key.to_string()),
    ]
}
