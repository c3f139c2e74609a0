//! Output formatting for price comparison results (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::offers::{NormalizedOffer, ProductResult};

/// Formats product results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a list of results, one per (product, region) pair.
    pub fn format_results(&self, results: &[ProductResult]) -> String {
        if results.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No results.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_results(results),
            OutputFormat::Table => self.table_results(results),
            OutputFormat::Markdown => self.markdown_results(results),
            OutputFormat::Csv => self.csv_results(results),
        }
    }

    // JSON formatting

    fn json_results(&self, results: &[ProductResult]) -> String {
        serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_results(&self, results: &[ProductResult]) -> String {
        let product_width = 40;
        let region_width = 6;
        let price_width = 12;
        let site_width = 24;
        let offers_width = 6;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<product_width$}  {:<region_width$}  {:>price_width$}  {:<site_width$}  {:>offers_width$}",
            "Product", "Region", "Lowest", "Site", "Offers"
        ));
        lines.push(format!(
            "{:-<product_width$}  {:-<region_width$}  {:-<price_width$}  {:-<site_width$}  {:-<offers_width$}",
            "", "", "", "", ""
        ));

        for result in results {
            let (price_str, site_str) = match &result.lowest {
                Some(lowest) => (lowest.display_price(), truncate(&lowest.site, site_width)),
                None => ("N/A".to_string(), "-".to_string()),
            };

            lines.push(format!(
                "{:<product_width$}  {:<region_width$}  {:>price_width$}  {:<site_width$}  {:>offers_width$}",
                truncate(&result.product, product_width),
                result.region,
                price_str,
                site_str,
                result.count()
            ));
        }

        let priced = results.iter().filter(|r| r.lowest.is_some()).count();
        lines.push(String::new());
        lines.push(format!("Total: {} lookups, {} with prices", results.len(), priced));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_results(&self, results: &[ProductResult]) -> String {
        let mut lines = Vec::new();

        lines.push("| Product | Region | Lowest | Site | Offers |".to_string());
        lines.push("|---------|--------|--------|------|--------|".to_string());

        for result in results {
            let (price_str, site_str) = match &result.lowest {
                Some(lowest) => (lowest.display_price(), markdown_site(lowest)),
                None => ("N/A".to_string(), String::new()),
            };

            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                result.product.replace('|', "\\|"),
                result.region,
                price_str,
                site_str,
                result.count()
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} lookups*", results.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "product,region,site,site_key,price,currency_symbol,is_lowest,link".to_string()
    }

    /// One row per offer; pairs without offers get a row with empty offer
    /// fields so every lookup is represented.
    fn csv_results(&self, results: &[ProductResult]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for result in results {
            let product = Self::csv_escape(&result.product);

            if result.offers.is_empty() {
                lines.push(format!("{},{},,,,,false,", product, result.region));
                continue;
            }

            for offer in &result.offers {
                let is_lowest = result.lowest.as_ref() == Some(offer);

                lines.push(format!(
                    "{},{},{},{},{},{},{},{}",
                    product,
                    result.region,
                    Self::csv_escape(&offer.site),
                    Self::csv_escape(&offer.site_key),
                    offer.price,
                    offer.currency_symbol.as_deref().map(Self::csv_escape).unwrap_or_default(),
                    is_lowest,
                    offer.link.as_deref().map(Self::csv_escape).unwrap_or_default()
                ));
            }
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn markdown_site(offer: &NormalizedOffer) -> String {
    let site = offer.site.replace('|', "\\|");
    match &offer.link {
        Some(link) => format!("[{}]({})", site, link),
        None => site,
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offers::{aggregate, RawOffer};

    fn make_result() -> ProductResult {
        let raw = vec![
            RawOffer::new("eBay - sellerA", "$10.00", "us").with_currency("$"),
            RawOffer::new("Amazon.com", "$8.00", "us")
                .with_currency("$")
                .with_link("https://amazon.example/dp/1"),
            RawOffer::new("Best, Buy", "$9.00", "us").with_currency("$"),
        ];
        aggregate("Logitech M185", "us", &raw)
    }

    fn make_empty_result() -> ProductResult {
        ProductResult::empty("Unobtainium", "in")
    }

    #[test]
    fn test_json_results() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_results(&[make_result(), make_empty_result()]);

        assert!(output.starts_with('['));
        assert!(output.contains("\"product\": \"Logitech M185\""));
        assert!(output.contains("\"site_key\": \"Amazon\""));
        assert!(output.contains("\"lowest\": null"));

        let parsed: Vec<ProductResult> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].lowest_price(), Some(8.0));
    }

    #[test]
    fn test_json_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        assert_eq!(formatter.format_results(&[]), "[]");
    }

    #[test]
    fn test_table_results() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_results(&[make_result(), make_empty_result()]);

        assert!(output.contains("Product"));
        assert!(output.contains("Lowest"));
        assert!(output.contains("Logitech M185"));
        assert!(output.contains("$8.00"));
        assert!(output.contains("Amazon.com"));
        assert!(output.contains("Unobtainium"));
        assert!(output.contains("N/A"));
        assert!(output.contains("Total: 2 lookups, 1 with prices"));
    }

    #[test]
    fn test_table_long_product_truncated() {
        let formatter = Formatter::new(OutputFormat::Table);
        let result = ProductResult::empty(
            "An extremely long product name that will not fit in the product column",
            "us",
        );

        let output = formatter.format_results(&[result]);
        assert!(output.contains("An extremely long product name that w..."));
    }

    #[test]
    fn test_table_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_results(&[]), "No results.");
    }

    #[test]
    fn test_markdown_results() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_results(&[make_result(), make_empty_result()]);

        assert!(output.contains("| Product | Region | Lowest | Site | Offers |"));
        assert!(output.contains(
            "| Logitech M185 | us | $8.00 | [Amazon.com](https://amazon.example/dp/1) | 3 |"
        ));
        assert!(output.contains("| Unobtainium | in | N/A |  | 0 |"));
        assert!(output.contains("*2 lookups*"));
    }

    #[test]
    fn test_csv_results() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_results(&[make_result(), make_empty_result()]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "product,region,site,site_key,price,currency_symbol,is_lowest,link");
        assert_eq!(lines[1], "Logitech M185,us,eBay - sellerA,eBay,10,$,false,");
        assert_eq!(
            lines[2],
            "Logitech M185,us,Amazon.com,Amazon,8,$,true,https://amazon.example/dp/1"
        );
        assert_eq!(lines[3], "Logitech M185,us,\"Best, Buy\",Best,9,$,false,");
        assert_eq!(lines[4], "Unobtainium,in,,,,,false,");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_csv_empty() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(
            formatter.format_results(&[]),
            "product,region,site,site_key,price,currency_symbol,is_lowest,link"
        );
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("simple"), "simple");
        assert_eq!(Formatter::csv_escape("with,comma"), "\"with,comma\"");
        assert_eq!(Formatter::csv_escape("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(Formatter::csv_escape("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("this is too long", 10), "this is...");
    }
}
