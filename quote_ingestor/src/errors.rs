use chrono::NaiveDate;
use thiserror::Error;

use crate::models::symbol::Symbol;

/// The unified error type for a single quote fetch.
///
/// Every variant is terminal for the current request; nothing here is
/// retried automatically.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider does not recognize the symbol.
    #[error("Invalid stock symbol '{symbol}': {message}")]
    InvalidSymbol { symbol: Symbol, message: String },

    /// The provider refused the request because its request quota is used up.
    #[error("API request limit reached: {message}")]
    RateLimited { message: String },

    /// The request needs a paid plan (for example full output size on a
    /// free key).
    #[error("Premium API feature required: {message}")]
    PremiumRequired { message: String },

    /// The payload carried neither a sentinel nor the daily series.
    #[error("Unexpected API response for '{symbol}': daily time series missing")]
    UnexpectedShape { symbol: Symbol },

    /// The daily series was present but could not be turned into bars.
    #[error("Error processing data for '{symbol}': {source}")]
    Parse {
        symbol: Symbol,
        #[source]
        source: ParseError,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Network failure, timeout, or a body that was not JSON.
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Reasons a daily series entry could not be converted into a bar.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed daily series: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid date key '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid {field} '{value}' on {date}: {source}")]
    InvalidNumber {
        date: NaiveDate,
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("non-finite {field} on {date}")]
    NonFinite { date: NaiveDate, field: &'static str },

    #[error("duplicate bar for {0}")]
    DuplicateDate(NaiveDate),
}

impl FetchError {
    /// Short, stable name of the failure kind, used in user-facing messages
    /// and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSymbol { .. } => "invalid_symbol",
            Self::RateLimited { .. } => "rate_limited",
            Self::PremiumRequired { .. } => "premium_required",
            Self::UnexpectedShape { .. } => "unexpected_shape",
            Self::Parse { .. } => "parse_error",
            Self::Api { .. } => "api_error",
            Self::Transport(_) => "transport",
        }
    }
}
