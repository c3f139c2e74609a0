//! Data models for raw and normalized offers and per-pair results.

use serde::{Deserialize, Serialize};

/// One retailer's advertised price as returned by a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOffer {
    /// Free-form retailer label, e.g. "eBay - houstoncellphones"
    pub site: String,
    /// Locale-formatted price text, e.g. "$1,234.56"
    pub price_text: String,
    /// Currency symbol if the source reported or implied one
    pub currency_symbol: Option<String>,
    /// Product link
    pub link: Option<String>,
    /// Market code the offer was looked up in
    pub region: String,
}

impl RawOffer {
    /// Creates an offer with just a site and a price text.
    pub fn new(
        site: impl Into<String>,
        price_text: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            price_text: price_text.into(),
            currency_symbol: None,
            link: None,
            region: region.into(),
        }
    }

    /// Sets the currency symbol.
    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = Some(symbol.into());
        self
    }

    /// Sets the product link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// An offer whose price parsed and whose site identity was canonicalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedOffer {
    /// Canonical site identity used for de-duplication
    pub site_key: String,
    /// Original retailer label, kept for display
    pub site: String,
    /// Parsed price, always finite and non-negative
    pub price: f64,
    pub currency_symbol: Option<String>,
    pub link: Option<String>,
    pub region: String,
}

impl NormalizedOffer {
    /// Returns the price with its currency symbol, e.g. "$10.00".
    pub fn display_price(&self) -> String {
        match &self.currency_symbol {
            Some(symbol) => format!("{}{:.2}", symbol, self.price),
            None => format!("{:.2}", self.price),
        }
    }
}

/// Aggregated offers for one (product, region) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResult {
    /// Product name as queried
    pub product: String,
    /// Market code
    pub region: String,
    /// One offer per site key, in first-seen order
    pub offers: Vec<NormalizedOffer>,
    /// The minimum-price offer, absent when `offers` is empty
    pub lowest: Option<NormalizedOffer>,
}

impl ProductResult {
    /// Creates a result with no usable price data.
    pub fn empty(product: impl Into<String>, region: impl Into<String>) -> Self {
        Self { product: product.into(), region: region.into(), offers: Vec::new(), lowest: None }
    }

    /// Returns the lowest price if any offer survived normalization.
    pub fn lowest_price(&self) -> Option<f64> {
        self.lowest.as_ref().map(|o| o.price)
    }

    /// Returns the number of distinct-site offers.
    pub fn count(&self) -> usize {
        self.offers.len()
    }

    /// Returns true if no usable offers were found.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}
