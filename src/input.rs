//! Product list loading from plain-text or CSV files.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Header names recognized as the product column (case-insensitive).
const PRODUCT_COLUMNS: &[&str] = &["product", "product_name", "product name"];

/// Reads product names from a file.
///
/// See [`parse_products`] for the accepted layouts.
pub fn load_products(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    debug!("Loading products from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read product file: {}", path.display()))?;

    let products = parse_products(&content);
    if products.is_empty() {
        anyhow::bail!("No product names found in {}", path.display());
    }

    debug!("Loaded {} products", products.len());
    Ok(products)
}

/// Parses product names from file contents.
///
/// If the first line is a CSV header with a `Product` or `Product_Name`
/// column, that column is read from every following row. Otherwise every
/// non-empty line is one product name. Names are trimmed and
/// near-duplicates collapsed (see [`dedup_products`]).
pub fn parse_products(content: &str) -> Vec<String> {
    let content = content.trim_start_matches('\u{feff}');
    let mut lines = content.lines();

    let Some(header) = lines.next() else {
        return Vec::new();
    };

    let column = split_csv_line(header)
        .iter()
        .position(|h| PRODUCT_COLUMNS.contains(&h.trim().to_lowercase().as_str()));

    let names: Vec<String> = match column {
        Some(idx) => {
            lines.filter_map(|line| split_csv_line(line).into_iter().nth(idx)).collect()
        }
        None => content.lines().map(String::from).collect(),
    };

    dedup_products(names)
}

/// Trims names, drops blanks, and collapses names that differ only in case
/// or whitespace. The first spelling wins.
pub fn dedup_products<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut products = Vec::new();

    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }

        let key = name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        if seen.insert(key) {
            products.push(name.to_string());
        }
    }

    products
}

/// Splits one CSV line into fields, honoring double-quoted fields.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_plain_list() {
        let products = parse_products("iPhone 15\nPixel 8\n\n  Galaxy S24  \n");
        assert_eq!(products, vec!["iPhone 15", "Pixel 8", "Galaxy S24"]);
    }

    #[test]
    fn test_csv_product_column() {
        let csv = "SKU,Product,Qty\n1,Logitech M185,2\n2,\"Keyboard, wireless\",1\n";
        let products = parse_products(csv);
        assert_eq!(products, vec!["Logitech M185", "Keyboard, wireless"]);
    }

    #[test]
    fn test_csv_product_name_column() {
        let csv = "Product_Name\nAirPods Pro\nKindle\n";
        assert_eq!(parse_products(csv), vec!["AirPods Pro", "Kindle"]);
    }

    #[test]
    fn test_header_case_insensitive() {
        let csv = "id,PRODUCT\n1,Echo Dot\n";
        assert_eq!(parse_products(csv), vec!["Echo Dot"]);
    }

    #[test]
    fn test_short_rows_skipped() {
        let csv = "id,Product\n1,Echo Dot\n2\n";
        assert_eq!(parse_products(csv), vec!["Echo Dot"]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let csv = "\u{feff}Product\nKindle\n";
        assert_eq!(parse_products(csv), vec!["Kindle"]);
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_products("").is_empty());
        assert!(parse_products("Product\n").is_empty());
    }

    #[test]
    fn test_dedup_near_identical() {
        let products = dedup_products(["iPhone 15", "iphone  15", " IPHONE 15 ", "iPhone 15 Pro"]);
        assert_eq!(products, vec!["iPhone 15", "iPhone 15 Pro"]);
    }

    #[test]
    fn test_split_csv_line_escaped_quotes() {
        let fields = split_csv_line(r#"a,"say ""hi""",c"#);
        assert_eq!(fields, vec!["a", "say \"hi\"", "c"]);
    }

    #[test]
    fn test_load_products_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Product\nMouse\nKeyboard").unwrap();

        let products = load_products(file.path()).unwrap();
        assert_eq!(products, vec!["Mouse", "Keyboard"]);
    }

    #[test]
    fn test_load_products_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let err = load_products(file.path()).unwrap_err().to_string();
        assert!(err.contains("No product names"));
    }

    #[test]
    fn test_load_products_missing_file() {
        let err = load_products("/nonexistent/products.csv").unwrap_err().to_string();
        assert!(err.contains("Failed to read product file"));
    }
}
