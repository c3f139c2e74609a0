//! Offer normalization, de-duplication and lowest-price selection.

pub mod aggregate;
pub mod models;
pub mod price;
pub mod site;

pub use aggregate::aggregate;
pub use models::{NormalizedOffer, ProductResult, RawOffer};
pub use price::parse_price_text;
pub use site::canonicalize;
