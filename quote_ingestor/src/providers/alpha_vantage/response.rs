//! Wire format of the `TIME_SERIES_DAILY` endpoint and its conversion into
//! canonical bars.
//!
//! A successful payload looks like
//!
//! ```json
//! {
//!   "Meta Data": { "2. Symbol": "IBM" },
//!   "Time Series (Daily)": {
//!     "2024-01-03": { "1. open": "161.0", "2. high": "161.7", "3. low": "160.1",
//!                     "4. close": "160.9", "5. volume": "4086140" }
//!   }
//! }
//! ```
//!
//! Failures come back with HTTP 200 and a single sentinel key instead:
//! `"Error Message"` for unknown symbols, `"Note"` or `"Information"` when the
//! request quota is exhausted. `"Information"` also answers requests for
//! premium-only options, which are told apart by their wording.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    errors::{FetchError, ParseError},
    models::{
        bar::PriceBar,
        price_series::{PriceSeries, SeriesError},
        symbol::Symbol,
    },
};

pub const ERROR_MESSAGE_KEY: &str = "Error Message";
pub const NOTE_KEY: &str = "Note";
pub const INFORMATION_KEY: &str = "Information";
pub const DAILY_SERIES_KEY: &str = "Time Series (Daily)";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A numeric field as sent on the wire. The provider stringifies numbers,
/// but plain JSON numbers are accepted too.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum WireNumber {
    Text(String),
    Number(f64),
}

#[derive(Deserialize, Debug, Clone)]
pub struct AlphaVantageBar {
    #[serde(rename = "1. open")]
    pub open: WireNumber,
    #[serde(rename = "2. high")]
    pub high: WireNumber,
    #[serde(rename = "3. low")]
    pub low: WireNumber,
    #[serde(rename = "4. close")]
    pub close: WireNumber,
    #[serde(rename = "5. volume")]
    pub volume: WireNumber,
}

/// Classifies a decoded response body and converts the daily series.
///
/// Checks run in a fixed order: invalid-symbol sentinel, rate-limit
/// sentinels, presence of the daily series, then per-entry parsing.
pub fn parse_daily_response(symbol: &Symbol, body: Value) -> Result<PriceSeries, FetchError> {
    let Value::Object(mut object) = body else {
        return Err(FetchError::UnexpectedShape {
            symbol: symbol.clone(),
        });
    };

    if let Some(message) = object.get(ERROR_MESSAGE_KEY) {
        return Err(FetchError::InvalidSymbol {
            symbol: symbol.clone(),
            message: sentinel_text(message),
        });
    }

    if let Some(message) = object.get(NOTE_KEY) {
        return Err(FetchError::RateLimited {
            message: sentinel_text(message),
        });
    }

    if let Some(message) = object.get(INFORMATION_KEY) {
        let message = sentinel_text(message);
        if message.to_ascii_lowercase().contains("premium") {
            return Err(FetchError::PremiumRequired { message });
        }
        return Err(FetchError::RateLimited { message });
    }

    let Some(daily) = object.remove(DAILY_SERIES_KEY) else {
        return Err(FetchError::UnexpectedShape {
            symbol: symbol.clone(),
        });
    };

    convert_daily_series(symbol, daily).map_err(|source| FetchError::Parse {
        symbol: symbol.clone(),
        source,
    })
}

fn convert_daily_series(symbol: &Symbol, daily: Value) -> Result<PriceSeries, ParseError> {
    let raw: IndexMap<String, AlphaVantageBar> = serde_json::from_value(daily)?;

    let bars = raw
        .into_iter()
        .map(|(key, bar)| convert_bar(&key, bar))
        .collect::<Result<Vec<_>, _>>()?;

    PriceSeries::new(symbol.clone(), bars).map_err(|err| match err {
        SeriesError::DuplicateDate(date) => ParseError::DuplicateDate(date),
    })
}

fn convert_bar(key: &str, bar: AlphaVantageBar) -> Result<PriceBar, ParseError> {
    let date = NaiveDate::parse_from_str(key.trim(), DATE_FORMAT).map_err(|source| {
        ParseError::InvalidDate {
            value: key.to_string(),
            source,
        }
    })?;

    Ok(PriceBar {
        date,
        open: parse_field(date, "open", bar.open)?,
        high: parse_field(date, "high", bar.high)?,
        low: parse_field(date, "low", bar.low)?,
        close: parse_field(date, "close", bar.close)?,
        volume: parse_field(date, "volume", bar.volume)?,
    })
}

fn parse_field(date: NaiveDate, field: &'static str, raw: WireNumber) -> Result<f64, ParseError> {
    let value = match raw {
        WireNumber::Number(value) => value,
        WireNumber::Text(text) => {
            text.trim()
                .parse::<f64>()
                .map_err(|source| ParseError::InvalidNumber {
                    date,
                    field,
                    value: text.clone(),
                    source,
                })?
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::NonFinite { date, field })
    }
}

fn sentinel_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
