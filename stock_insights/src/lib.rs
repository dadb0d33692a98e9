pub mod charts;
pub mod cli;
pub mod config;
pub mod errors;
pub mod pipeline;
pub mod render;

pub use errors::InsightsError;
pub use pipeline::{Insights, InsightsPipeline};
