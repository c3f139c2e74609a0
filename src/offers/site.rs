//! Site identity canonicalization for offer de-duplication.

/// Derives a de-duplication key from a free-form retailer label.
///
/// The key is the leading run of alphanumeric characters, so seller
/// suffixes and domain endings collapse onto the marketplace name:
/// `"eBay - houstoncellphones"` and `"eBay"` both yield `"eBay"`. A label
/// that does not start with an alphanumeric character is returned as-is.
pub fn canonicalize(site: &str) -> &str {
    let end =
        site.char_indices().find(|(_, c)| !c.is_alphanumeric()).map_or(site.len(), |(i, _)| i);

    if end == 0 {
        site
    } else {
        &site[..end]
    }
}
