use serde::{Deserialize, Serialize};

/// Window sizes and band width for the standard indicator set.
///
/// Deserializes from the `[indicators]` table of the application config;
/// missing fields take the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    /// Short trend average.
    pub sma_fast: usize,
    /// Long trend average.
    pub sma_slow: usize,
    pub bollinger_window: usize,
    /// Band half-width in standard deviations.
    pub bollinger_k: f64,
    pub rsi_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_fast: 50,
            sma_slow: 200,
            bollinger_window: 20,
            bollinger_k: 2.0,
            rsi_window: 14,
        }
    }
}

impl IndicatorConfig {
    /// The longest window in use; a series at least this long has every
    /// indicator defined at its last bar.
    pub fn max_window(&self) -> usize {
        [
            self.sma_fast,
            self.sma_slow,
            self.bollinger_window,
            self.rsi_window,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }
}
