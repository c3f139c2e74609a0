//! Bounded concurrent lookups over every (product, region) pair.

use crate::lookup::OfferLookup;
use crate::offers::{aggregate, ProductResult};
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;
use tracing::{debug, info, warn};

/// Default number of lookups allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Identifies one requested pair as `(product, region)`.
pub type PairKey = (String, String);

/// Dispatches one lookup per (product, region) pair with bounded concurrency.
pub struct FanOut<'a, L: OfferLookup + ?Sized> {
    lookup: &'a L,
    concurrency: usize,
}

impl<'a, L: OfferLookup + ?Sized> FanOut<'a, L> {
    /// Creates a coordinator over `lookup` with at most `concurrency`
    /// lookups in flight (at least one).
    pub fn new(lookup: &'a L, concurrency: usize) -> Self {
        Self { lookup, concurrency: concurrency.max(1) }
    }

    /// Returns the effective concurrency limit.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Looks up every pair and waits for all of them.
    ///
    /// A lookup that errors or panics yields an empty result for its pair
    /// only. Repeated pairs are looked up once.
    pub async fn run(&self, products: &[String], regions: &[String]) -> FanOutResults {
        let mut seen = HashSet::new();
        let order: Vec<PairKey> = products
            .iter()
            .flat_map(|p| regions.iter().map(move |r| (p.clone(), r.clone())))
            .filter(|pair| seen.insert(pair.clone()))
            .collect();

        info!(
            "Dispatching {} lookups ({} products x {} regions, {} in flight)",
            order.len(),
            products.len(),
            regions.len(),
            self.concurrency
        );

        let lookup = self.lookup;
        let mut completed = stream::iter(order.clone())
            .map(|(product, region)| async move {
                let outcome =
                    AssertUnwindSafe(lookup.lookup(&product, &region)).catch_unwind().await;
                ((product, region), outcome)
            })
            .buffer_unordered(self.concurrency);

        let mut results: HashMap<PairKey, ProductResult> = HashMap::with_capacity(order.len());

        while let Some(((product, region), outcome)) = completed.next().await {
            let result = match outcome {
                Ok(Ok(raw)) => {
                    let result = aggregate(&product, &region, &raw);
                    debug!(
                        "{} in {}: {} raw offers, {} kept",
                        product,
                        region,
                        raw.len(),
                        result.count()
                    );
                    result
                }
                Ok(Err(e)) => {
                    warn!("Lookup failed for {} in {}: {:#}", product, region, e);
                    ProductResult::empty(&product, &region)
                }
                Err(_) => {
                    warn!("Lookup panicked for {} in {}", product, region);
                    ProductResult::empty(&product, &region)
                }
            };

            results.insert((product, region), result);
        }

        FanOutResults { order, results }
    }
}

/// One [`ProductResult`] per requested pair, keyed by `(product, region)`.
///
/// Iteration follows request order (products, then regions), not
/// completion order.
#[derive(Debug, Clone, Default)]
pub struct FanOutResults {
    order: Vec<PairKey>,
    results: HashMap<PairKey, ProductResult>,
}

impl FanOutResults {
    /// Returns the result for a pair.
    pub fn get(&self, product: &str, region: &str) -> Option<&ProductResult> {
        self.results.get(&(product.to_string(), region.to_string()))
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no pairs were requested.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates results in request order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductResult> {
        self.order.iter().filter_map(|key| self.results.get(key))
    }

    /// Consumes the collection, returning results in request order.
    pub fn into_vec(mut self) -> Vec<ProductResult> {
        self.order.iter().filter_map(|key| self.results.remove(key)).collect()
    }
}
