//! Validated ticker symbols.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Symbol must not be empty")]
    Empty,

    #[error("Symbol '{symbol}' contains invalid character '{ch}'")]
    InvalidCharacter { symbol: String, ch: char },
}

/// A ticker symbol, trimmed and uppercased.
///
/// The only way to build one is [`Symbol::parse`], so every `Symbol` that
/// reaches a provider is non-empty and already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Normalizes user input (`" aapl "` becomes `"AAPL"`) and validates it.
    ///
    /// Accepted characters after uppercasing are `A-Z`, `0-9`, `.` and `-`,
    /// which covers share classes such as `BRK.B` and exchange suffixes such
    /// as `TSCO.LON`.
    pub fn parse(raw: &str) -> Result<Self, SymbolError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(SymbolError::Empty);
        }

        if let Some(ch) = normalized
            .chars()
            .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '.' || *c == '-'))
        {
            return Err(SymbolError::InvalidCharacter {
                symbol: normalized,
                ch,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
