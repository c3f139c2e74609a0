//! SerpApi search response schema and conversion into raw offers.

use super::engine::Engine;
use crate::offers::RawOffer;
use serde::Deserialize;

/// Top-level SerpApi response. Only the fields used for offers are decoded.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    /// Set by SerpApi when the search itself failed
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub shopping_results: Vec<ResultEntry>,
    #[serde(default)]
    pub organic_results: Vec<ResultEntry>,
}

/// A single shopping or organic result.
#[derive(Debug, Default, Deserialize)]
pub struct ResultEntry {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub price: Option<PriceField>,
    /// Amazon results may carry only the numeric price
    #[serde(default)]
    pub extracted_price: Option<f64>,
    /// Walmart nests the price in the primary offer
    #[serde(default)]
    pub primary_offer: Option<PrimaryOffer>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub product_link: Option<String>,
    #[serde(default)]
    pub product_page_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrimaryOffer {
    #[serde(default)]
    pub offer_price: Option<PriceField>,
}

/// Prices are usually display strings, but some engines send bare numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Text(String),
    Number(f64),
}

impl PriceField {
    fn into_text(self) -> String {
        match self {
            PriceField::Text(text) => text,
            PriceField::Number(n) => n.to_string(),
        }
    }
}

impl SearchResponse {
    /// Converts the response into raw offers tagged with `region`.
    ///
    /// Shopping results are preferred; organic results are only used when
    /// there are no shopping results. Results from a single-store engine are
    /// attributed to that store, others need a `source`. Entries without a
    /// site or a price are skipped.
    pub fn into_raw_offers(self, engine: Engine, region: &str) -> Vec<RawOffer> {
        let entries = if self.shopping_results.is_empty() {
            self.organic_results
        } else {
            self.shopping_results
        };

        entries
            .into_iter()
            .filter_map(|entry| {
                let site = match engine.marketplace() {
                    Some(store) => store.to_string(),
                    None => entry.source?,
                };
                let price_text = entry
                    .price
                    .or(entry.extracted_price.map(PriceField::Number))
                    .or(entry.primary_offer.and_then(|offer| offer.offer_price))?
                    .into_text();

                Some(RawOffer {
                    currency_symbol: currency_symbol(&price_text),
                    link: entry.link.or(entry.product_link).or(entry.product_page_url),
                    site,
                    price_text,
                    region: region.to_string(),
                })
            })
            .collect()
    }
}

/// Extracts the currency marker around a price, e.g. "$" from "$1,234.56"
/// or "€" from "45,00 €". Prefix markers take precedence over suffixes.
pub fn currency_symbol(price_text: &str) -> Option<String> {
    let text = price_text.trim();
    let is_numeric = |c: char| c.is_ascii_digit() || c == '.' || c == ',';

    let first = text.find(|c: char| c.is_ascii_digit())?;
    let prefix = text[..first].trim_end_matches(is_numeric).trim();
    if !prefix.is_empty() {
        return Some(prefix.to_string());
    }

    let last = text.rfind(|c: char| c.is_ascii_digit())?;
    let suffix = text[last + 1..].trim();
    if !suffix.is_empty() {
        return Some(suffix.to_string());
    }

    None
}
