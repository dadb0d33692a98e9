use std::io::{self, Write};

use thiserror::Error;

use crate::charts::ChartRequest;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("write failed: {0}")]
    Io(#[from] io::Error),

    #[error("chart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Consumer of chart requests. Implementations decide how (and whether) to
/// draw; the pipeline only hands requests over.
pub trait ChartRenderer {
    fn render(&mut self, chart: &ChartRequest) -> Result<(), RenderError>;

    fn render_all(&mut self, charts: &[ChartRequest]) -> Result<(), RenderError> {
        charts.iter().try_for_each(|chart| self.render(chart))
    }
}

/// Writes each chart as one JSON document: a single line by default, or
/// indented when `pretty` is set.
pub struct JsonRenderer<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ChartRenderer for JsonRenderer<W> {
    fn render(&mut self, chart: &ChartRequest) -> Result<(), RenderError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, chart)?;
        } else {
            serde_json::to_writer(&mut self.writer, chart)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartKind, DashStyle, Trace};
    use chrono::NaiveDate;
    use quote_ingestor::models::symbol::Symbol;

    fn chart() -> ChartRequest {
        ChartRequest {
            symbol: Symbol::parse("MSFT").unwrap(),
            title: "MSFT Closing Price".to_string(),
            kind: ChartKind::Line,
            x_axis: "Date",
            y_axis: "Price (USD)",
            dates: vec![
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            ],
            traces: vec![Trace {
                name: "Closing Price".to_string(),
                color: "blue",
                dash: DashStyle::Solid,
                values: vec![None, Some(410.5)],
            }],
            reference_lines: Vec::new(),
        }
    }

    #[test]
    fn compact_output_is_one_line_per_chart() {
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer.render_all(&[chart(), chart()]).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["symbol"], "MSFT");
        assert_eq!(parsed["dates"][0], "2024-05-01");
        assert_eq!(parsed["traces"][0]["values"], serde_json::json!([null, 410.5]));
    }

    #[test]
    fn pretty_output_is_indented() {
        let mut renderer = JsonRenderer::new(Vec::new()).pretty(true);
        renderer.render(&chart()).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.lines().count() > 1);
        assert!(out.contains("\n  \"title\": \"MSFT Closing Price\""));
    }
}
