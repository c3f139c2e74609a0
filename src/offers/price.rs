//! Price text normalization.

/// Parses a locale-formatted price string into a number.
///
/// Only ASCII digits and `.` are kept, in their original order, and the
/// result is parsed as a decimal. Returns `None` when nothing numeric is
/// left, when more than one `.` survives the filter, or when the value is
/// not a finite non-negative number.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let filtered: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();

    if filtered.is_empty() || filtered.matches('.').count() > 1 {
        return None;
    }

    // A lone "." has no digits to parse
    if !filtered.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    filtered.parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0)
}
