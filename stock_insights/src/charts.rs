//! Chart requests handed to a renderer: what to draw, never how.

use chrono::NaiveDate;
use indicator_engine::{IndicatorSeries, IndicatorSet, rsi};
use quote_ingestor::models::symbol::Symbol;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashStyle {
    Solid,
    Dash,
    Dot,
}

/// One plotted series. `values` is aligned with the request's `dates`;
/// `None` serializes as `null` and is drawn as a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub color: &'static str,
    pub dash: DashStyle,
    pub values: Vec<Option<f64>>,
}

impl Trace {
    fn from_series(series: &IndicatorSeries, color: &'static str, dash: DashStyle) -> Self {
        Self {
            name: series.name().to_string(),
            color,
            dash,
            values: series.values().collect(),
        }
    }
}

/// A horizontal line across the whole chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
    pub dash: DashStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRequest {
    pub symbol: Symbol,
    pub title: String,
    pub kind: ChartKind,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
    pub dates: Vec<NaiveDate>,
    pub traces: Vec<Trace>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reference_lines: Vec<ReferenceLine>,
}

const BLUE: &str = "blue";
const ORANGE: &str = "orange";
const RED: &str = "red";
const GREEN: &str = "green";
const PURPLE: &str = "purple";

impl ChartRequest {
    fn line(symbol: &Symbol, title: String, set: &IndicatorSet, y_axis: &'static str) -> Self {
        Self {
            symbol: symbol.clone(),
            title,
            kind: ChartKind::Line,
            x_axis: "Date",
            y_axis,
            dates: set.close.points().iter().map(|point| point.date).collect(),
            traces: Vec::new(),
            reference_lines: Vec::new(),
        }
    }

    fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }
}

pub fn closing_price_chart(symbol: &Symbol, set: &IndicatorSet) -> ChartRequest {
    ChartRequest::line(symbol, format!("{symbol} Closing Price"), set, "Price (USD)")
        .with_trace(Trace::from_series(&set.close, BLUE, DashStyle::Solid))
}

pub fn moving_averages_chart(symbol: &Symbol, set: &IndicatorSet) -> ChartRequest {
    ChartRequest::line(symbol, "Moving Averages".to_string(), set, "Price (USD)")
        .with_trace(Trace::from_series(&set.close, BLUE, DashStyle::Solid))
        .with_trace(Trace::from_series(&set.sma_fast, ORANGE, DashStyle::Solid))
        .with_trace(Trace::from_series(&set.sma_slow, RED, DashStyle::Solid))
}

pub fn bollinger_chart(symbol: &Symbol, set: &IndicatorSet) -> ChartRequest {
    ChartRequest::line(symbol, "Bollinger Bands".to_string(), set, "Price (USD)")
        .with_trace(Trace::from_series(&set.close, BLUE, DashStyle::Solid))
        .with_trace(Trace::from_series(&set.bollinger.upper, RED, DashStyle::Dot))
        .with_trace(Trace::from_series(&set.bollinger.lower, GREEN, DashStyle::Dot))
}

pub fn volume_chart(symbol: &Symbol, set: &IndicatorSet) -> ChartRequest {
    let mut chart = ChartRequest::line(symbol, "Trading Volume".to_string(), set, "Volume")
        .with_trace(Trace::from_series(&set.volume, PURPLE, DashStyle::Solid));
    chart.kind = ChartKind::Bar;
    chart
}

pub fn rsi_chart(symbol: &Symbol, set: &IndicatorSet) -> ChartRequest {
    let mut chart = ChartRequest::line(
        symbol,
        "Relative Strength Index (RSI)".to_string(),
        set,
        "RSI Value",
    )
    .with_trace(Trace::from_series(&set.rsi, ORANGE, DashStyle::Solid));

    chart.reference_lines = vec![
        ReferenceLine {
            label: format!("Overbought ({})", rsi::OVERBOUGHT),
            value: rsi::OVERBOUGHT,
            color: RED,
            dash: DashStyle::Dash,
        },
        ReferenceLine {
            label: format!("Oversold ({})", rsi::OVERSOLD),
            value: rsi::OVERSOLD,
            color: GREEN,
            dash: DashStyle::Dash,
        },
    ];
    chart
}

/// The five dashboard charts, in display order.
pub fn build_charts(symbol: &Symbol, set: &IndicatorSet) -> Vec<ChartRequest> {
    vec![
        closing_price_chart(symbol, set),
        moving_averages_chart(symbol, set),
        bollinger_chart(symbol, set),
        volume_chart(symbol, set),
        rsi_chart(symbol, set),
    ]
}
