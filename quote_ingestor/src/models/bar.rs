//! Canonical in-memory representation of one daily bar (OHLCV).
//!
//! This struct is the standard output of every [`DataProvider`](crate::providers::DataProvider)
//! implementation, whatever field names the vendor uses on the wire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single calendar day's prices and traded volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// The trading day this bar covers.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the day.
    pub high: f64,

    /// Lowest price during the day.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the day.
    pub volume: f64,
}
