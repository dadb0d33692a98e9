// =============================================================================
// Relative Strength Index (RSI), simple-average form
// =============================================================================
//
// Step 1: day-over-day close deltas. The first bar has no predecessor and
//         counts as a zero delta, so the output keeps the usual
//         `window - 1` leading gaps.
// Step 2: gain = max(delta, 0), loss = max(-delta, 0).
// Step 3: avg_gain / avg_loss are plain rolling means over `window` deltas.
// Step 4: RS = avg_gain / avg_loss, RSI = 100 - 100 / (1 + RS).
//
// Zero average loss: RSI is 100 when there were gains and undefined when
// there was no movement at all.
// =============================================================================

use quote_ingestor::models::price_series::PriceSeries;
use serde::Serialize;

use crate::{rolling::rolling_mean, series::IndicatorSeries};

pub const OVERBOUGHT: f64 = 70.0;
pub const OVERSOLD: f64 = 30.0;

/// Computes RSI over `window` trailing deltas.
pub fn rsi(series: &PriceSeries, window: usize) -> IndicatorSeries {
    let closes = series.closes();
    let deltas: Vec<f64> = closes
        .first()
        .map(|_| 0.0)
        .into_iter()
        .chain(closes.windows(2).map(|pair| pair[1] - pair[0]))
        .collect();

    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let values = rolling_mean(&gains, window)
        .into_iter()
        .zip(rolling_mean(&losses, window))
        .map(|(gain, loss)| rsi_from_averages(gain?, loss?));

    IndicatorSeries::new("RSI", series.dates(), values)
}

/// Converts average gain / average loss into an RSI value in [0, 100].
///
/// - Average loss zero, average gain positive: 100.
/// - Both zero: `None`, there is no momentum to measure.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return (avg_gain > 0.0).then_some(100.0);
    }

    let rs = avg_gain / avg_loss;
    let value = 100.0 - 100.0 / (1.0 + rs);
    value.is_finite().then(|| value.clamp(0.0, 100.0))
}

/// Where an RSI reading sits relative to the conventional thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    pub fn classify(value: f64) -> Self {
        if value >= OVERBOUGHT {
            RsiZone::Overbought
        } else if value <= OVERSOLD {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}
