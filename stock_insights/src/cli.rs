use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about = "Daily quotes and technical indicators as chart requests")]
pub struct Cli {
    /// Path to the config file (e.g. configs/insights.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pretty-print each chart instead of one JSON document per line
    #[arg(long)]
    pub pretty: bool,

    /// Ticker symbols, processed one after another (e.g. AAPL MSFT)
    #[arg(default_value = "AAPL")]
    pub symbols: Vec<String>,
}
