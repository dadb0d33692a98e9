use std::{io, process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::Parser;
use quote_ingestor::cache::SeriesCache;
use stock_insights::{InsightsPipeline, cli::Cli, config::InsightsConfig, render::JsonRenderer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout carries only chart JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = InsightsConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let cache = config
        .cache
        .enabled
        .then(|| Arc::new(SeriesCache::new(config.cache.policy())));
    let pipeline =
        InsightsPipeline::from_config(&config, cache).context("setting up the quote provider")?;

    let mut renderer = JsonRenderer::new(io::stdout().lock()).pretty(cli.pretty);
    let (mut succeeded, mut failed) = (0usize, 0usize);

    for raw in &cli.symbols {
        let outcome = match pipeline.run(raw).await {
            Ok(insights) => insights.render(&mut renderer),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => succeeded += 1,
            Err(err) => {
                failed += 1;
                error!(symbol = %raw, kind = err.kind(), "pass failed");
                eprintln!("Error: {err:#}");
            }
        }
    }

    info!(succeeded, failed, "done");
    eprintln!("SUMMARY: {succeeded} succeeded, {failed} failed");

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
