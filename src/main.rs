//! Listing Harvester main entry point
//!
//! This is the command-line interface for the listing scraper.

use clap::Parser;
use listing_harvester::config::{load_config, override_output, Config, EnvSource};
use listing_harvester::crawler::run_scrape;
use listing_harvester::output::{completion_notice, print_summary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Listing Harvester: a paginated real-estate listing scraper
///
/// Reads BASE_URL and SEARCH_URL from the environment (or a .env file), walks
/// every search result page and writes one CSV row per listing.
#[derive(Parser, Debug)]
#[command(name = "listing-harvester")]
#[command(version)]
#[command(about = "A paginated real-estate listing scraper", long_about = None)]
struct Cli {
    /// Path to an optional TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the CSV here instead of the configured path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Resolve and validate the configuration, then exit without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let source = EnvSource::new();
    let mut config = match load_config(cli.config.as_deref(), &source) {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(output) = cli.output {
        if let Err(e) = override_output(&mut config, &output.to_string_lossy()) {
            tracing::error!("Invalid --output: {}", e);
            return Err(e.into());
        }
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(&config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_harvester=info,warn"),
            1 => EnvFilter::new("listing_harvester=debug,info"),
            2 => EnvFilter::new("listing_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Listing Harvester Dry Run ===\n");

    println!("Site:");
    println!("  Base URL:   {}", config.site.base_url);
    println!("  Search URL: {}", config.site.search_url);

    println!("\nCrawler:");
    println!("  Page delay:  {}ms", config.crawler.page_delay_ms);
    println!("  Page param:  {}", config.crawler.page_param);
    println!("  User agent:  {}", config.crawler.user_agent);
    println!("  Timeout:     {}s", config.crawler.timeout_secs);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    let s = &config.selectors;
    println!("\nSelectors:");
    println!("  container: {}", s.container);
    println!("  title:     {}", s.title);
    println!("  price:     {}", s.price);
    println!("  address:   {}", s.address);
    println!("  area:      {}", s.area);
    println!("  layout:    {}", s.layout);
    println!("  age:       {}", s.age);
    println!("  station:   {}", s.station);
    println!("  walk-time: {}", s.walk_time);
    println!("  link:      {} [href]", s.link);
    println!("  next-page: {} containing '{}'", s.next_page, s.next_label);

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape operation
async fn handle_scrape(config: &Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Writing listings to {}", config.output.csv_path);

    match run_scrape(config).await {
        Ok(summary) => {
            if !quiet {
                print_summary(&summary);
            }
            println!("{}", completion_notice(&summary));
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
