// src/config/settings.rs
//! Run settings file: optional defaults for the CLI (input, output, filters, logging).

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::OutputFormat;

pub const ENV_SETTINGS_PATH: &str = "TV_NEWS_SETTINGS_PATH";

const FALLBACK_PATHS: [&str; 3] = [
    "config/settings.toml",
    "config/settings.json",
    "config/settings.example.json",
];

/// Every field is optional; CLI flags override whatever is set here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_file: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output_dir: Option<String>,
    pub output_path: Option<String>,
    pub provider_filter: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub symbols: Vec<String>,
    pub min_urgency: Option<i64>,
    pub log_level: Option<String>,
}

fn null_as_empty<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(d)?.unwrap_or_default())
}

/// Load settings from an explicit path. Supports TOML or JSON formats.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_settings(&content, ext.as_str())
        .with_context(|| format!("parsing settings from {}", path.display()))
}

/// Load settings using env var + fallbacks:
/// 1) $TV_NEWS_SETTINGS_PATH
/// 2) config/settings.toml
/// 3) config/settings.json
/// 4) config/settings.example.json
///
/// Nothing found → defaults.
pub fn load_settings_default() -> Result<Settings> {
    if let Ok(p) = std::env::var(ENV_SETTINGS_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_settings_from(&pb);
        } else {
            return Err(anyhow!("{ENV_SETTINGS_PATH} points to non-existent path"));
        }
    }
    for p in FALLBACK_PATHS {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_settings_from(&pb);
        }
    }
    Ok(Settings::default())
}

fn parse_settings(s: &str, hint_ext: &str) -> Result<Settings> {
    let try_toml_first = hint_ext == "toml";
    if try_toml_first {
        if let Ok(v) = toml::from_str::<Settings>(s) {
            return Ok(clean(v));
        }
    }
    if let Ok(v) = serde_json::from_str::<Settings>(s) {
        return Ok(clean(v));
    }
    if !try_toml_first {
        if let Ok(v) = toml::from_str::<Settings>(s) {
            return Ok(clean(v));
        }
    }
    Err(anyhow!("unsupported settings format"))
}

/// Blank strings count as unset.
fn clean(mut s: Settings) -> Settings {
    fn non_blank(v: Option<String>) -> Option<String> {
        v.map(|x| x.trim().to_string()).filter(|x| !x.is_empty())
    }
    s.input_file = non_blank(s.input_file);
    s.output_dir = non_blank(s.output_dir);
    s.output_path = non_blank(s.output_path);
    s.provider_filter = non_blank(s.provider_filter);
    s.log_level = non_blank(s.log_level);
    s.symbols = s
        .symbols
        .into_iter()
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect();
    s
}
