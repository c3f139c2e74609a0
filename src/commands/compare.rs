//! Price comparison command implementation.

use crate::config::Config;
use crate::fanout::FanOut;
use crate::format::Formatter;
use crate::input;
use crate::lookup::{OfferLookup, SerpApiClient};
use crate::offers::ProductResult;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Looks every product up in every configured region and reports the
/// lowest offer per pair.
pub struct CompareCommand {
    config: Config,
}

impl CompareCommand {
    /// Creates a new compare command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Compares prices for the products listed in a file.
    pub async fn execute_file(&self, path: &Path) -> Result<String> {
        let products = input::load_products(path)?;
        self.execute(&products).await
    }

    /// Compares prices for the given product names and returns formatted output.
    pub async fn execute(&self, products: &[String]) -> Result<String> {
        let client = SerpApiClient::new(&self.config).context("Failed to create SerpApi client")?;

        self.execute_with_client(&client, products).await
    }

    /// Compares prices with a provided lookup (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl OfferLookup,
        products: &[String],
    ) -> Result<String> {
        let results = self.collect(client, products).await?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_results(&results))
    }

    /// Runs the fan-out and returns results in request order.
    pub async fn collect(
        &self,
        client: &impl OfferLookup,
        products: &[String],
    ) -> Result<Vec<ProductResult>> {
        let products = input::dedup_products(products);
        if products.is_empty() {
            anyhow::bail!("No product names given");
        }

        let regions = self.config.region_codes();
        if regions.is_empty() {
            anyhow::bail!("No regions configured");
        }

        let fanout = FanOut::new(client, self.config.concurrency);
        let results = fanout.run(&products, &regions).await;

        let priced = results.iter().filter(|r| r.lowest.is_some()).count();
        info!("Found prices for {} of {} lookups", priced, results.len());

        Ok(results.into_vec())
    }
}
