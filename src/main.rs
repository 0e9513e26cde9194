//! Dinescout main entry point
//!
//! This is the command-line interface an editor uses to pull restaurant
//! details from TripAdvisor pages into the dining guide.

use anyhow::Context;
use clap::{Parser, Subcommand};
use dinescout::client::ScrapingClient;
use dinescout::config::{load_settings, ClientSettings, Config, LoadedSettings};
use dinescout::models::{ExtractionRequest, ScrapeOptions};
use dinescout::output::{
    print_api_info, print_health_reports, print_restaurant, print_saved_restaurants,
    print_statistics, write_restaurant_markdown,
};
use dinescout::storage::{open_storage, RestaurantStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Dinescout: restaurant extraction for the dining guide
///
/// Sends a TripAdvisor restaurant page to the scraping API, failing over
/// between endpoints, and lets you review and save the result.
#[derive(Parser, Debug)]
#[command(name = "dinescout")]
#[command(version = "1.0.0")]
#[command(about = "Restaurant extraction client with endpoint failover", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (environment variables override it)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract restaurant data from a TripAdvisor page
    Scrape {
        /// TripAdvisor restaurant URL
        url: String,

        /// Page-load timeout forwarded to the scraping API, in milliseconds
        #[arg(long, value_name = "MS")]
        timeout: Option<u64>,

        /// Retry count forwarded to the scraping API
        #[arg(long, value_name = "N")]
        retries: Option<u32>,

        /// Browser user agent forwarded to the scraping API
        #[arg(long, value_name = "UA")]
        user_agent: Option<String>,

        /// Save the result to the database
        #[arg(long)]
        save: bool,

        /// Export the result as markdown
        #[arg(long, value_name = "FILE")]
        markdown: Option<PathBuf>,

        /// Print endpoint statistics afterwards
        #[arg(long)]
        show_stats: bool,
    },

    /// Probe every endpoint's health
    Health,

    /// Check that at least one endpoint is healthy
    TestApi,

    /// Check the API key configuration
    TestAuth,

    /// Show the resolved client configuration
    Info,

    /// List saved restaurants
    List {
        /// Maximum number of restaurants to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let LoadedSettings {
        config,
        settings,
        config_hash,
    } = load(cli.config.as_deref())?;

    match cli.command {
        Command::Scrape {
            url,
            timeout,
            retries,
            user_agent,
            save,
            markdown,
            show_stats,
        } => {
            let options = ScrapeOptions {
                timeout,
                retries,
                user_agent,
            };
            let request = ExtractionRequest::new(url).with_options(options);
            handle_scrape(&config, settings, &request, save, markdown.as_deref(), show_stats)
                .await?;
        }
        Command::Health => {
            let client = ScrapingClient::new(settings)?;
            print_health_reports(&client.health_check().await);
        }
        Command::TestApi => {
            let client = ScrapingClient::new(settings)?;
            let outcome = client.test_api().await;
            println!("{}", outcome.message);
            if !outcome.success {
                anyhow::bail!("no healthy scraping endpoint");
            }
        }
        Command::TestAuth => {
            let client = ScrapingClient::new(settings)?;
            let outcome = client.test_authentication().await;
            println!("{}", outcome.message());
            if !outcome.is_ready() {
                anyhow::bail!("scraping API is not ready for authenticated requests");
            }
        }
        Command::Info => {
            let client = ScrapingClient::new(settings)?;
            print_api_info(&client.get_api_info());
            if let Some(hash) = config_hash {
                println!("\n  Config hash: {}", hash);
            }
        }
        Command::List { limit } => handle_list(&config, limit)?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("dinescout=info,warn"),
            1 => EnvFilter::new("dinescout=debug,info"),
            2 => EnvFilter::new("dinescout=trace,debug"),
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

/// Loads the config file (if any) and environment overrides
fn load(path: Option<&Path>) -> anyhow::Result<LoadedSettings> {
    if let Some(path) = path {
        tracing::info!("Loading configuration from: {}", path.display());
    }

    let loaded = load_settings(path).context("failed to load configuration")?;

    if let Some(hash) = &loaded.config_hash {
        tracing::info!("Configuration loaded successfully (hash: {})", hash);
    }

    Ok(loaded)
}

async fn handle_scrape(
    config: &Config,
    settings: ClientSettings,
    request: &ExtractionRequest,
    save: bool,
    markdown: Option<&Path>,
    show_stats: bool,
) -> anyhow::Result<()> {
    let client = ScrapingClient::new(settings)?;

    let result = client.scrape_restaurant(request).await;

    // Input errors never reach an endpoint, so there is nothing to report
    let attempted = !matches!(&result, Err(e) if e.is_input_error());
    if show_stats && attempted {
        print_statistics(&client.get_stats());
        println!();
    }

    let data = result?;
    print_restaurant(&data);

    if let Some(path) = markdown {
        write_restaurant_markdown(&data, Some(request.url.as_str()), path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Markdown written to {}", path.display());
    }

    if save {
        let mut storage = open_storage(Path::new(&config.output.database_path))?;
        let id = storage.save_restaurant(&request.url, &data, None)?;
        println!("Saved '{}' (id {})", data.name, id);
    }

    Ok(())
}

fn handle_list(config: &Config, limit: usize) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let total = storage.count_restaurants()?;
    let records = storage.list_restaurants(limit)?;

    if records.is_empty() {
        println!("No restaurants saved yet.");
    } else {
        print_saved_restaurants(&records, total);
    }

    Ok(())
}
