//! Sitewalk main entry point
//!
//! This is the command-line interface for the Sitewalk crawler.

use anyhow::Context;
use clap::Parser;
use sitewalk::config::{load_config, validate, Config, InvalidLinkPolicy};
use sitewalk::output::{print_statistics, ChannelSink, PageRecord};
use sitewalk::{crawl, Scraper};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAX_FETCHES: u32 = 50;

/// Sitewalk: a bounded, same-origin site walker
///
/// Fetches pages starting from one URL, follows links that stay on the same
/// host, and stops once the fetch budget is spent. Prints every page it
/// fetched along with its title.
#[derive(Parser, Debug)]
#[command(name = "sitewalk")]
#[command(version)]
#[command(about = "A bounded, same-origin site walker", long_about = None)]
struct Cli {
    /// URL to start from (overrides the config file)
    #[arg(value_name = "START_URL", required_unless_present = "config")]
    start_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to fetch
    #[arg(short = 'n', long, value_name = "N")]
    max_fetches: Option<u32>,

    /// Pause before every request, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Treat URLs that differ only by query string as the same page
    #[arg(long)]
    ignore_query_params: bool,

    /// Skip unparseable links instead of aborting the crawl
    #[arg(long)]
    skip_invalid_links: bool,

    /// CSS selector whose text is printed for every page
    #[arg(long, value_name = "CSS")]
    select: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    tracing::info!(
        "Walking {} (max {} fetches, {}ms between requests)",
        config.crawl.start_url,
        config.crawl.max_fetches,
        config.crawl.request_delay_ms
    );

    let (sink, mut pages) = ChannelSink::new();
    let select = cli.select.clone();

    // The crawl drops its sink when it returns, which ends the printer loop
    let crawl_task = crawl(config, sink);
    let print_task = async {
        while let Some(page) = pages.recv().await {
            print_page(&page, select.as_deref());
        }
    };

    let (result, ()) = tokio::join!(crawl_task, print_task);

    match result {
        Ok(stats) => {
            tracing::info!("Crawl completed");
            println!();
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitewalk=info,warn"),
            1 => EnvFilter::new("sitewalk=debug,info"),
            2 => EnvFilter::new("sitewalk=trace,debug"),
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

/// Merges the config file (if any) with command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match (&cli.config, &cli.start_url) {
        (Some(path), _) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        (None, Some(start_url)) => Config::new(start_url.clone(), DEFAULT_MAX_FETCHES),
        (None, None) => anyhow::bail!("either START_URL or --config is required"),
    };

    if let Some(start_url) = &cli.start_url {
        config.crawl.start_url = start_url.clone();
    }
    if let Some(max_fetches) = cli.max_fetches {
        config.crawl.max_fetches = max_fetches;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawl.request_delay_ms = delay_ms;
    }
    if cli.ignore_query_params {
        config.crawl.ignore_query_params = true;
    }
    if cli.skip_invalid_links {
        config.crawl.on_invalid_link = InvalidLinkPolicy::Skip;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

fn print_page(page: &PageRecord, select: Option<&str>) {
    let scraper = Scraper::new(&page.document);
    let title = scraper.text("title");

    if title.is_empty() {
        println!("{}", page.url);
    } else {
        println!("{}  {}", page.url, title);
    }

    if let Some(selector) = select {
        let text = scraper.text(selector);
        if !text.is_empty() {
            println!("    {}", text);
        }
    }
}
