use chrono::NaiveDate;
use serde::Serialize;

/// One value of an indicator, `None` where it is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A named indicator aligned to a price series' dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    name: String,
    points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Pairs `dates` with `values` positionally.
    ///
    /// Both inputs come from the same price series, so they have the same
    /// length; any excess on either side is ignored.
    pub fn new(
        name: impl Into<String>,
        dates: impl IntoIterator<Item = NaiveDate>,
        values: impl IntoIterator<Item = Option<f64>>,
    ) -> Self {
        let points = dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| IndicatorPoint { date, value })
            .collect();

        Self {
            name: name.into(),
            points,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[IndicatorPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.points.iter().map(|point| point.value)
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|point| point.value)
    }

    /// Only the defined entries, as `(date, value)` pairs.
    pub fn defined(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|point| point.value.map(|value| (point.date, value)))
    }

    /// Number of leading undefined entries.
    pub fn leading_gaps(&self) -> usize {
        self.points
            .iter()
            .take_while(|point| point.value.is_none())
            .count()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.last().and_then(|point| point.value)
    }
}
