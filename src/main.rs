//! price-scout - Lowest-price finder across shopping markets

use anyhow::Result;
use clap::{Parser, Subcommand};
use price_scout::commands::CompareCommand;
use price_scout::config::{parse_engine_list, parse_region_list, Config, OutputFormat};
use price_scout::lookup::{Engine, Region};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "price-scout",
    version,
    about = "Find the lowest price for a list of products across shopping markets",
    long_about = "Looks each product up through SerpApi (Google Shopping, Amazon, Walmart) in every \
                  requested region, collapses offers from the same marketplace and reports the \
                  cheapest one."
)]
struct Cli {
    /// Regions to search, comma-separated (e.g. us,in,uk)
    #[arg(short, long, global = true)]
    region: Option<String>,

    /// Engines to query, comma-separated (google_shopping, amazon, walmart)
    #[arg(short, long, global = true)]
    engine: Option<String>,

    /// SerpApi key
    #[arg(long, global = true, env = "SERPAPI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Maximum lookups in flight at once
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare prices for the products listed in a file
    #[command(alias = "c")]
    Compare {
        /// Plain list (one per line) or CSV with a Product / Product_Name column
        file: PathBuf,
    },

    /// Compare prices for products given on the command line
    #[command(alias = "l")]
    Lookup {
        /// Product names
        #[arg(required = true)]
        products: Vec<String>,
    },

    /// List supported regions
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Config file, then environment, then CLI flags
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(regions) = cli.region.as_deref() {
        config.regions = parse_region_list(regions)?;
    }
    if let Some(engines) = cli.engine.as_deref() {
        config.engines = parse_engine_list(engines)?;
    }
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Compare { file } => {
            let cmd = CompareCommand::new(config);
            let output = cmd.execute_file(&file).await?;
            println!("{}", output);
        }

        Commands::Lookup { products } => {
            let cmd = CompareCommand::new(config);
            let output = cmd.execute(&products).await?;
            println!("{}", output);
        }

        Commands::Regions => {
            println!("Supported regions:\n");
            println!(
                "{:<6} {:<16} {:<16} {:<6} {:<10} {}",
                "Code", "Google domain", "Amazon domain", "Lang", "Currency", "Engines"
            );
            println!("{:-<6} {:-<16} {:-<16} {:-<6} {:-<10} {:-<7}", "", "", "", "", "", "");

            for region in Region::all() {
                let engines: Vec<&str> = Engine::all()
                    .iter()
                    .filter(|e| e.serves(*region))
                    .map(|e| e.api_name())
                    .collect();

                println!(
                    "{:<6} {:<16} {:<16} {:<6} {:<10} {}",
                    region.to_string(),
                    region.google_domain(),
                    region.amazon_domain(),
                    region.language(),
                    region.currency(),
                    engines.join(", ")
                );
            }
        }
    }

    Ok(())
}
