//! Tastemap main entry point
//!
//! This is the command-line interface for the Tastemap restaurant explorer.

use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use tastemap::config::{load_config_with_hash, Config};
use tastemap::shell::{run_shell, AppContext, ReadlineSource};
use tracing_subscriber::EnvFilter;

/// Tastemap: restaurants in America's best places to live
///
/// Tastemap scrapes a ranking of cities, looks up restaurants of a chosen
/// category in a business search API, and shows ratings and prices of what
/// it stored.
#[derive(Parser, Debug)]
#[command(name = "tastemap")]
#[command(version)]
#[command(about = "Restaurant ratings for America's best places to live", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG", default_value = "tastemap.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Fetch the ranking page again instead of using the cached copy
    #[arg(long)]
    refresh: bool,

    /// Validate config and show what would be used without touching the network
    #[arg(long, conflicts_with_all = ["stats", "export_summary"])]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export_summary"])]
    stats: bool,

    /// Generate markdown summary from existing data and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    export_summary: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.export_summary {
        handle_export_summary(&config)?;
    } else {
        handle_shell(config, cli.refresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tastemap=info,warn"),
            1 => EnvFilter::new("tastemap=debug,info"),
            2 => EnvFilter::new("tastemap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so they never interleave with the menus on stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Tastemap Dry Run ===\n");

    println!("User Agent:");
    println!("  Name: {}", config.user_agent.name);
    println!("  Version: {}", config.user_agent.version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nSources:");
    println!("  Rankings: {}", config.source.ranking_url);
    println!("  Search endpoint: {}", config.search.endpoint);
    println!("  Results per search: {}", config.search.limit);
    let key_state = match std::env::var(&config.search.api_key_env) {
        Ok(value) if !value.trim().is_empty() => "set",
        _ => "NOT set",
    };
    println!("  API key variable: {} ({})", config.search.api_key_env, key_state);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Cache: {}", config.output.cache_path);
    println!("  Summary: {}", config.output.summary_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use tastemap::output::{load_statistics, print_statistics};
    use tastemap::storage::SqliteStorage;

    println!("Database: {}\n", config.output.database_path);

    let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --export-summary mode: generates markdown summary
fn handle_export_summary(config: &Config) -> anyhow::Result<()> {
    use tastemap::output::generate_markdown_summary;
    use tastemap::storage::SqliteStorage;

    println!("=== Exporting Tastemap Summary ===\n");
    println!("Database: {}", config.output.database_path);
    println!("Output: {}", config.output.summary_path);
    println!();

    let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
    generate_markdown_summary(&storage, Path::new(&config.output.summary_path))?;

    println!("✓ Summary exported to: {}", config.output.summary_path);

    Ok(())
}

/// Handles the interactive session
async fn handle_shell(config: Config, refresh: bool) -> anyhow::Result<()> {
    let mut ctx = AppContext::open(config)?;

    let cities = match ctx.refresh_cities(refresh).await {
        Ok(cities) => {
            tracing::info!("Loaded {} ranked cities", cities.len());
            cities
        }
        Err(e) => {
            tracing::error!("Failed to load city rankings: {}", e);
            return Err(e.into());
        }
    };

    let mut input = ReadlineSource::new()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_shell(&mut ctx, &cities, &mut input, &mut out).await
}
