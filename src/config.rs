//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::fanout::DEFAULT_CONCURRENCY;
use crate::lookup::{Engine, Region};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SerpApi key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Markets to look every product up in
    #[serde(default = "default_regions")]
    pub regions: Vec<Region>,

    /// Maximum lookups in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Search engines queried for every (product, region) pair, in order
    #[serde(default = "default_engines")]
    pub engines: Vec<Engine>,

    /// Interface language override (defaults to the region's language)
    #[serde(default)]
    pub language: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Alternative API base URL (e.g. a proxy or a mock server)
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_regions() -> Vec<Region> {
    vec![Region::Us]
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_engines() -> Vec<Engine> {
    vec![Engine::GoogleShopping]
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            regions: default_regions(),
            concurrency: default_concurrency(),
            engines: default_engines(),
            language: None,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
            base_url: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("price-scout").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Invalid values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var("SERPAPI_KEY") {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }

        if let Ok(regions) = std::env::var("PRICE_SCOUT_REGIONS") {
            if let Ok(parsed) = parse_region_list(&regions) {
                self.regions = parsed;
            }
        }

        if let Ok(engines) = std::env::var("PRICE_SCOUT_ENGINES") {
            if let Ok(parsed) = parse_engine_list(&engines) {
                self.engines = parsed;
            }
        }

        if let Ok(concurrency) = std::env::var("PRICE_SCOUT_CONCURRENCY") {
            if let Ok(n) = concurrency.parse() {
                self.concurrency = n;
            }
        }

        self
    }

    /// Returns the configured regions as lookup codes.
    pub fn region_codes(&self) -> Vec<String> {
        self.regions.iter().map(|r| r.to_string()).collect()
    }
}

/// Parses a comma-separated region list such as "us,in,uk".
///
/// Duplicates are dropped, keeping the first occurrence.
pub fn parse_region_list(list: &str) -> Result<Vec<Region>> {
    let mut regions: Vec<Region> = Vec::new();

    for code in list.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let region: Region = code.parse()?;
        if !regions.contains(&region) {
            regions.push(region);
        }
    }

    if regions.is_empty() {
        anyhow::bail!("No regions given");
    }

    Ok(regions)
}

/// Parses a comma-separated engine list such as "google,amazon".
pub fn parse_engine_list(list: &str) -> Result<Vec<Engine>> {
    let mut engines: Vec<Engine> = Vec::new();

    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let engine: Engine = name.parse()?;
        if !engines.contains(&engine) {
            engines.push(engine);
        }
    }

    if engines.is_empty() {
        anyhow::bail!("No engines given");
    }

    Ok(engines)
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
