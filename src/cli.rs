// src/cli.rs
//! Command-line surface. Flags override the settings file, which overrides built-in defaults.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;
use crate::export::OutputFormat;
use crate::filter::FilterConfig;

pub const DEFAULT_INPUT: &str = "data/sample_input.json";
pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tv-news")]
#[command(about = "TradingView News Scraper - process and export TradingView news data.", long_about = None)]
pub struct Cli {
    /// Path to input JSON file (repeatable; items are concatenated in order)
    #[arg(long = "input")]
    pub inputs: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Output file path. If omitted, a file in the configured output dir is used.
    #[arg(long = "output")]
    pub output_path: Option<PathBuf>,

    /// Filter results by provider name (case-insensitive)
    #[arg(long = "provider")]
    pub provider_filter: Option<String>,

    /// Filter results by related symbol (e.g. NASDAQ:GOOG). Can be used multiple times.
    #[arg(long = "symbol")]
    pub symbols: Vec<String>,

    /// Minimum urgency value to include
    #[arg(long, allow_negative_numbers = true)]
    pub min_urgency: Option<i64>,

    /// Logging level (DEBUG, INFO, WARNING, ERROR)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Print the first parsed item instead of exporting
    #[arg(long)]
    pub preview: bool,

    /// Settings file (TOML or JSON); overrides the default lookup
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

/// Fully resolved run parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub inputs: Vec<PathBuf>,
    pub output_format: OutputFormat,
    pub output_path: PathBuf,
    pub filter: FilterConfig,
    pub log_level: String,
    pub log_json: bool,
    pub preview: bool,
}

impl Cli {
    pub fn resolve(self, settings: &Settings) -> RunOptions {
        let inputs = if self.inputs.is_empty() {
            vec![PathBuf::from(
                settings.input_file.as_deref().unwrap_or(DEFAULT_INPUT),
            )]
        } else {
            self.inputs
        };

        let output_format = self
            .output_format
            .or(settings.output_format)
            .unwrap_or_default();

        let output_path = self
            .output_path
            .or_else(|| settings.output_path.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| {
                PathBuf::from(settings.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR))
                    .join(output_format.default_file_name())
            });

        let symbols = if self.symbols.is_empty() {
            settings.symbols.clone()
        } else {
            self.symbols
        };
        let provider = self
            .provider_filter
            .or_else(|| settings.provider_filter.clone());
        let filter = FilterConfig::new(
            Some(symbols),
            provider.as_deref(),
            self.min_urgency.or(settings.min_urgency),
        );

        let log_level = self
            .log_level
            .or_else(|| settings.log_level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        RunOptions {
            inputs,
            output_format,
            output_path,
            filter,
            log_level,
            log_json: self.log_json,
            preview: self.preview,
        }
    }
}

/// Map a Python-style level name onto a `tracing` filter directive.
/// Unknown names fall back to `info`.
pub fn level_directive(name: &str) -> &'static str {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" | "fatal" => "error",
        _ => "info",
    }
}
