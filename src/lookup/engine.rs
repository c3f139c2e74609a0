//! SerpApi search engines and the request parameters each one expects.

use super::regions::Region;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shopping-search engines offers can be looked up through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Engine {
    #[default]
    GoogleShopping,
    Amazon,
    Walmart,
}

impl Engine {
    /// Returns the SerpApi `engine` parameter.
    pub fn api_name(&self) -> &'static str {
        match self {
            Engine::GoogleShopping => "google_shopping",
            Engine::Amazon => "amazon",
            Engine::Walmart => "walmart",
        }
    }

    /// Marketplace every result of this engine is sold on.
    ///
    /// Google Shopping aggregates many stores, so its results carry their
    /// own `source` instead.
    pub fn marketplace(&self) -> Option<&'static str> {
        match self {
            Engine::GoogleShopping => None,
            Engine::Amazon => Some("Amazon"),
            Engine::Walmart => Some("Walmart"),
        }
    }

    /// Whether the engine can search the given market.
    pub fn serves(&self, region: Region) -> bool {
        match self {
            Engine::GoogleShopping | Engine::Amazon => true,
            Engine::Walmart => region == Region::Us,
        }
    }

    /// Query parameters locating `product` in `region`, without the key.
    pub fn query_params(
        &self,
        product: &str,
        region: Region,
        language: &str,
    ) -> Vec<(&'static str, String)> {
        match self {
            Engine::GoogleShopping => vec![
                ("q", product.to_string()),
                ("gl", region.country_code().to_string()),
                ("hl", language.to_string()),
                ("google_domain", region.google_domain().to_string()),
            ],
            Engine::Amazon => vec![
                ("k", product.to_string()),
                ("amazon_domain", region.amazon_domain().to_string()),
            ],
            Engine::Walmart => vec![("query", product.to_string())],
        }
    }

    /// Returns all supported engines.
    pub fn all() -> &'static [Engine] {
        &[Engine::GoogleShopping, Engine::Amazon, Engine::Walmart]
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

impl FromStr for Engine {
    type Err = EngineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google_shopping" | "google" | "shopping" => Ok(Engine::GoogleShopping),
            "amazon" => Ok(Engine::Amazon),
            "walmart" => Ok(Engine::Walmart),
            _ => Err(EngineParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Engine {
    type Error = EngineParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Engine> for String {
    fn from(engine: Engine) -> Self {
        engine.api_name().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct EngineParseError(String);

impl fmt::Display for EngineParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown engine '{}'. Valid engines: google_shopping, amazon, walmart", self.0)
    }
}

impl std::error::Error for EngineParseError {}
