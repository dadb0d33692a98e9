use quote_ingestor::{
    FetchError,
    models::symbol::{Symbol, SymbolError},
    providers::ProviderInitError,
};
use shared_utils::config::ConfigError;
use thiserror::Error;

use crate::render::RenderError;

/// Everything that can end a single insights pass.
#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("Invalid stock symbol: {0}")]
    Symbol(#[from] SymbolError),

    #[error("Unable to load stock data for '{symbol}': {source}")]
    Fetch {
        symbol: Symbol,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to initialize the quote provider: {0}")]
    ProviderInit(#[from] ProviderInitError),

    #[error("Failed to render charts: {0}")]
    Render(#[from] RenderError),
}

impl InsightsError {
    /// Stable failure kind, reused from [`FetchError::kind`] for fetch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Symbol(_) => "invalid_input",
            Self::Fetch { source, .. } => source.kind(),
            Self::Config(_) => "config",
            Self::ProviderInit(_) => "provider_init",
            Self::Render(_) => "render",
        }
    }
}
