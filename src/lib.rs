//! price-scout - Lowest-price finder across shopping markets
//!
//! Looks product names up through a shopping-search API in one or more
//! regions, normalizes the returned price strings, keeps one offer per
//! marketplace and reports the cheapest offer per product and region.

pub mod commands;
pub mod config;
pub mod fanout;
pub mod format;
pub mod input;
pub mod lookup;
pub mod offers;

pub use config::Config;
pub use fanout::{FanOut, FanOutResults};
pub use lookup::{OfferLookup, Region};
pub use offers::{
    aggregate, canonicalize, parse_price_text, NormalizedOffer, ProductResult, RawOffer,
};
