//! A date-ordered series of daily bars for one symbol.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{bar::PriceBar, symbol::Symbol};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Duplicate bar for date {0}")]
    DuplicateDate(NaiveDate),
}

/// Daily price history for a single symbol.
///
/// Bars are strictly increasing by date. Non-trading days are simply absent.
/// The series is immutable once built; consumers only get read access.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: Symbol,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Builds a series from bars in any order.
    ///
    /// Bars are sorted ascending by date. Two bars with the same date are
    /// rejected rather than silently merged.
    pub fn new(symbol: Symbol, mut bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        bars.sort_by_key(|bar| bar.date);

        if let Some(pair) = bars.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(SeriesError::DuplicateDate(pair[0].date));
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.bars.iter().map(|bar| bar.date)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.volume).collect()
    }

    /// The most recent bar, if any.
    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}
