//! Offer lookup contract and the SerpApi HTTP client implementing it.

use super::engine::Engine;
use super::regions::Region;
use super::response::SearchResponse;
use crate::config::Config;
use crate::offers::RawOffer;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use wreq::Client;

const SERPAPI_BASE: &str = "https://serpapi.com";

/// Error text SerpApi sends (with HTTP 200) when a search simply found nothing.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

/// Trait for per-(product, region) offer lookups - enables mocking for tests.
#[async_trait]
pub trait OfferLookup: Send + Sync {
    /// Returns the raw offers for `product` in the market `region`.
    async fn lookup(&self, product: &str, region: &str) -> Result<Vec<RawOffer>>;
}

/// Failures reported by the SerpApi client.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no SerpApi key configured (set SERPAPI_KEY or api_key in config)")]
    MissingApiKey,

    #[error(transparent)]
    UnknownRegion(#[from] super::regions::RegionParseError),

    #[error("SerpApi returned status: {0}")]
    Status(u16),

    #[error("SerpApi error: {0}")]
    Api(String),

    #[error("no configured engine serves region {0}")]
    NoEngineForRegion(Region),
}

/// SerpApi shopping-search client.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    engines: Vec<Engine>,
    language: Option<String>,
    base_url: String,
}

impl SerpApiClient {
    /// Creates a client from the configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url.clone().unwrap_or_else(|| SERPAPI_BASE.to_string());
        Self::with_base_url(config, base_url)
    }

    /// Creates a client against a custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LookupError::MissingApiKey)?;

        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            engines: config.engines.clone(),
            language: config.language.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the search URL for one product on one engine in one market.
    fn search_url(&self, engine: Engine, product: &str, region: Region) -> String {
        let language = self.language.as_deref().unwrap_or_else(|| region.language());

        let mut url = format!("{}/search.json?engine={}", self.base_url, engine.api_name());
        for (name, value) in engine.query_params(product, region, language) {
            url.push_str(&format!("&{}={}", name, urlencoding::encode(&value)));
        }
        url.push_str(&format!("&api_key={}", urlencoding::encode(&self.api_key)));

        url
    }

    async fn search(
        &self,
        engine: Engine,
        product: &str,
        market: Region,
        region: &str,
    ) -> Result<Vec<RawOffer>> {
        let response = self.fetch(&self.search_url(engine, product, market)).await?;

        let offers = response.into_raw_offers(engine, region);
        debug!("{} raw offers from {} for {} in {}", offers.len(), engine, product, region);

        Ok(offers)
    }

    async fn fetch(&self, url: &str) -> Result<SearchResponse> {
        // The key is part of the query string; keep it out of the logs
        debug!("GET {}", url.split("&api_key=").next().unwrap_or(url));

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await.context("Failed to read response body")?;

        // SerpApi reports bad keys and quota errors as JSON with an error status
        let parsed: Option<SearchResponse> = serde_json::from_str(&body).ok();
        if let Some(error) = parsed.as_ref().and_then(|r| r.error.clone()) {
            if error.contains(NO_RESULTS_MARKER) {
                debug!("No results: {}", error);
                return Ok(SearchResponse::default());
            }
            return Err(LookupError::Api(error).into());
        }

        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()).into());
        }

        parsed.context("Failed to decode SerpApi response")
    }
}

#[async_trait]
impl OfferLookup for SerpApiClient {
    async fn lookup(&self, product: &str, region: &str) -> Result<Vec<RawOffer>> {
        let market: Region = region.parse().map_err(LookupError::from)?;

        let engines: Vec<Engine> =
            self.engines.iter().copied().filter(|e| e.serves(market)).collect();
        if engines.is_empty() {
            return Err(LookupError::NoEngineForRegion(market).into());
        }

        info!("Looking up {} in {}", product, market);

        // Engines are queried in configured order so first-seen dedup is stable.
        // One failing engine does not discard the offers of the others.
        let mut offers = Vec::new();
        let mut first_error = None;
        let mut succeeded = 0;

        for engine in engines {
            match self.search(engine, product, market, region).await {
                Ok(mut found) => {
                    succeeded += 1;
                    offers.append(&mut found);
                }
                Err(e) => {
                    warn!("{} search failed for {} in {}: {:#}", engine, product, region, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(offers),
        }
    }
}
