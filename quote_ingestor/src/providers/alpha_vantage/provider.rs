use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::{debug, instrument};

use crate::{
    errors::FetchError,
    models::{price_series::PriceSeries, symbol::Symbol},
    providers::{
        ClientBuildSnafu, DataProvider, MissingEnvVarSnafu, ProviderInitError,
        alpha_vantage::{
            params::{AlphaVantageParams, construct_query},
            response::parse_daily_response,
        },
    },
};

pub struct AlphaVantageProvider {
    client: Client,
    api_key: SecretString,
    params: AlphaVantageParams,
}

impl AlphaVantageProvider {
    /// Creates a new Alpha Vantage provider.
    ///
    /// Reads the API key from the environment variable named by
    /// `params.api_key_env` (`ALPHAVANTAGE_API_KEY` by default).
    pub fn new(params: AlphaVantageParams) -> Result<Self, ProviderInitError> {
        let api_key = get_env_var(&params.api_key_env).context(MissingEnvVarSnafu)?;
        Self::with_api_key(params, SecretString::new(api_key.into()))
    }

    /// Creates a provider with an explicit API key.
    pub fn with_api_key(
        params: AlphaVantageParams,
        api_key: SecretString,
    ) -> Result<Self, ProviderInitError> {
        let client = Client::builder()
            .timeout(params.timeout())
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            api_key,
            params,
        })
    }
}

#[async_trait]
impl DataProvider for AlphaVantageProvider {
    #[instrument(skip(self), fields(provider = "alpha_vantage"))]
    async fn fetch_daily(&self, symbol: &Symbol) -> Result<PriceSeries, FetchError> {
        let query = construct_query(symbol, self.params.output_size, self.api_key.expose_secret());

        // The query carries the API key, so URLs are stripped from transport errors.
        let response = self
            .client
            .get(&self.params.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|err| FetchError::Transport(err.without_url()))?;

        let series = parse_daily_response(symbol, body)?;
        debug!(bars = series.len(), "parsed daily series");
        Ok(series)
    }
}
