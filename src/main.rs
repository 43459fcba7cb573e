//! TradingView news normalizer: binary entrypoint.
//! Loads raw items, normalizes + filters them, then previews or exports the result.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tv_news_normalizer::cli::{level_directive, Cli, RunOptions};
use tv_news_normalizer::config::{load_settings_default, load_settings_from, Settings};
use tv_news_normalizer::export;
use tv_news_normalizer::ingest::{self, types::RecordSource, JsonFileSource};

/// `RUST_LOG` wins; otherwise the configured level applies crate-wide.
fn init_tracing(level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_directive(level)));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

fn load_settings(cli: &Cli) -> Settings {
    let loaded = match &cli.settings {
        Some(p) => load_settings_from(p),
        None => load_settings_default(),
    };
    // Tracing is not up yet: the log level itself may come from settings.
    loaded.unwrap_or_else(|e| {
        eprintln!("failed to load settings: {e:#}");
        Settings::default()
    })
}

async fn run(opts: RunOptions) -> Result<()> {
    let sources: Vec<Box<dyn RecordSource>> = opts
        .inputs
        .iter()
        .map(|p| Box::new(JsonFileSource::new(p)) as Box<dyn RecordSource>)
        .collect();

    let outcome = ingest::run_once(&sources, &opts.filter).await?;
    tracing::info!(count = outcome.records.len(), "parsed items after filtering");

    if opts.preview {
        match outcome.records.first() {
            Some(first) => println!("{}", serde_json::to_string_pretty(first)?),
            None => tracing::warn!("no items found after parsing"),
        }
        return Ok(());
    }

    if outcome.records.is_empty() {
        tracing::warn!("no items produced after parsing and filtering; nothing to export");
        return Ok(());
    }

    export::export(&outcome.records, opts.output_format, &opts.output_path)?;
    tracing::info!(path = %opts.output_path.display(), "export complete");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let settings = load_settings(&cli);
    let opts = cli.resolve(&settings);

    init_tracing(&opts.log_level, opts.log_json);
    tracing::info!(inputs = ?opts.inputs, "using input files");

    match run(opts).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "run failed");
            ExitCode::FAILURE
        }
    }
}
