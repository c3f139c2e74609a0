//! Folds raw offers for one (product, region) pair into a result.

use super::models::{NormalizedOffer, ProductResult, RawOffer};
use super::price::parse_price_text;
use super::site::canonicalize;
use std::collections::HashSet;
use tracing::trace;

/// Aggregates raw offers into a [`ProductResult`].
///
/// Offers whose price does not parse are dropped, and only the first offer
/// per canonical site is kept. `lowest` is the first offer holding the
/// minimum price. Never fails: empty or all-invalid input gives an empty
/// result.
pub fn aggregate<'a, I>(product: &str, region: &str, raw: I) -> ProductResult
where
    I: IntoIterator<Item = &'a RawOffer>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut offers: Vec<NormalizedOffer> = Vec::new();

    for offer in raw {
        let Some(price) = parse_price_text(&offer.price_text) else {
            trace!("Dropping unparsable price {:?} from {}", offer.price_text, offer.site);
            continue;
        };

        let site_key = canonicalize(&offer.site);
        if !seen.insert(site_key) {
            trace!("Dropping duplicate offer from {} (key {})", offer.site, site_key);
            continue;
        }

        offers.push(NormalizedOffer {
            site_key: site_key.to_string(),
            site: offer.site.clone(),
            price,
            currency_symbol: offer.currency_symbol.clone(),
            link: offer.link.clone(),
            region: offer.region.clone(),
        });
    }

    let lowest = lowest_offer(&offers).cloned();

    ProductResult { product: product.to_string(), region: region.to_string(), offers, lowest }
}

/// Returns the first offer with the minimum price.
fn lowest_offer(offers: &[NormalizedOffer]) -> Option<&NormalizedOffer> {
    let mut lowest: Option<&NormalizedOffer> = None;

    for offer in offers {
        match lowest {
            Some(current) if offer.price >= current.price => {}
            _ => lowest = Some(offer),
        }
    }

    lowest
}
