//! Offer lookups: the collaborator contract, SerpApi client, engines and market table.

pub mod client;
pub mod engine;
pub mod regions;
pub mod response;

pub use client::{LookupError, OfferLookup, SerpApiClient};
pub use engine::Engine;
pub use regions::Region;
