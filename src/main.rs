//! Site-Cartographer main entry point
//!
//! This is the command-line interface for the Site-Cartographer site mapper.

use anyhow::Context;
use clap::Parser;
use site_cartographer::config::{load_config, validate, Config, DEFAULT_SEED_URL};
use site_cartographer::crawler::crawl;
use site_cartographer::output::{build_renderers, render_all};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Cartographer: maps every page and asset of a single web host
///
/// Starting from a seed URL, follows same-host links and stylesheets and
/// writes a text and Graphviz sitemap of everything it found.
#[derive(Parser, Debug)]
#[command(name = "site-cartographer")]
#[command(version)]
#[command(about = "Maps the pages and assets of a single web host", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Maximum number of concurrent fetches
    #[arg(long, value_name = "N")]
    crawlers: Option<usize>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory to write the sitemaps into
    #[arg(long, value_name = "DIR")]
    output: Option<String>,

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

    let config = load_settings(&cli)?;

    let crawled = crawl(&config)
        .await
        .with_context(|| format!("Crawl of {} could not start", config.crawler.seed_url))?;

    let renderers = build_renderers(&config.output);
    render_all(&renderers, &crawled);

    println!("DONE");
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_cartographer=info,warn"),
            1 => EnvFilter::new("site_cartographer=debug,info"),
            2 => EnvFilter::new("site_cartographer=trace,debug"),
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

/// Loads the configuration file if given, then applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    match &cli.url {
        Some(url) => config.crawler.seed_url = url.clone(),
        None if config.crawler.seed_url == DEFAULT_SEED_URL => {
            println!("No URL given, defaulting to {}", DEFAULT_SEED_URL);
        }
        None => {}
    }
    if let Some(crawlers) = cli.crawlers {
        config.crawler.max_concurrent_fetches = crawlers;
    }
    if let Some(output) = &cli.output {
        config.output.directory = output.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}
