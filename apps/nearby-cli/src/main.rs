//! # Nearby CLI
//!
//! Command-line front end for the favorites store and the pricing engine.
//!
//! ## Usage
//!
//! ```bash
//! # Favorite a restaurant
//! nearby favorites add --id r7 --name "Savour Foods" --category Food --price "Rs 450"
//!
//! # List everything, or one category
//! nearby favorites list
//! nearby favorites list --category Food
//!
//! # Heart button
//! nearby favorites toggle --id r7 --name "Savour Foods" --category Food
//!
//! # Normal vs VIP price
//! nearby quote 2500 --discount 0.2 --tier vip
//!
//! # Write a starter nearby.toml, then print the settings in effect
//! nearby config init
//! nearby config show
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()        RUST_LOG or "info,nearby=debug,sqlx=warn"    │
//! │  2. AppConfig::load_or_default()  defaults → nearby.toml → NEARBY_*    │
//! │  3. Database::new()       open SQLite, run migrations                  │
//! │  4. FavoriteStore::load() hydrate from kv_store                        │
//! │  5. run command                                                         │
//! │  6. Database::close()                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `quote` needs no database and skips steps 3, 4 and 6. `config` stops
//! after step 2, and `config show` fails on a broken file instead of
//! falling back to defaults.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use nearby_core::{FavoriteItemInput, PricingTier};
use nearby_db::{Database, DbConfig, FavoriteStore, LoadOutcome};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;

use commands::quote::QuoteRequest;
use config::AppConfig;
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "nearby")]
#[command(author, version, about = "Nearby favorites and pricing tools")]
struct Cli {
    /// Path to nearby.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or inspect nearby.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage saved favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Show normal and VIP prices for a base price
    Quote {
        /// Base price from the catalog
        base_price: f64,

        /// Discount fraction in [0, 1] (defaults to pricing.default_vip_discount)
        #[arg(short, long)]
        discount: Option<f64>,

        /// Tier to highlight (`normal` or `vip`)
        #[arg(short, long, default_value = "normal")]
        tier: PricingTier,

        /// Shortcut for `--tier vip`
        #[arg(long, conflicts_with = "tier")]
        vip: bool,

        /// Reject out-of-range input instead of clamping it
        #[arg(long)]
        strict: bool,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration in effect (file plus NEARBY_* overrides)
    Show,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites, oldest first
    List {
        /// Only this category (exact match)
        #[arg(short, long)]
        category: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one favorite in full
    Show { id: String },
    /// Favorite a catalog entry
    Add(EntryArgs),
    /// Remove a favorite by id
    Remove { id: String },
    /// Add if absent, remove if present
    Toggle(EntryArgs),
    /// Remove every favorite
    Clear,
    /// Categories with their favorite counts
    Categories,
}

/// A catalog entry as given on the command line.
#[derive(Args)]
struct EntryArgs {
    #[arg(long)]
    id: String,

    #[arg(short, long)]
    name: String,

    #[arg(short, long)]
    category: String,

    #[arg(long)]
    subcategory: Option<String>,

    /// Display price, e.g. "Rs 1,500"
    #[arg(long)]
    price: Option<String>,

    #[arg(long)]
    rating: Option<f64>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    phone: Option<String>,
}

impl From<EntryArgs> for FavoriteItemInput {
    fn from(args: EntryArgs) -> Self {
        FavoriteItemInput {
            id: args.id,
            name: args.name,
            category: args.category,
            subcategory: args.subcategory,
            price: args.price,
            rating: args.rating,
            location: args.location,
            phone: args.phone,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Config { action } => run_config(action, cli.config, &mut out),
        Commands::Quote {
            base_price,
            discount,
            tier,
            vip,
            strict,
            json,
        } => {
            let config = AppConfig::load_or_default(cli.config);
            let req = QuoteRequest {
                base_price,
                discount,
                tier: if vip { PricingTier::from_vip_flag(true) } else { tier },
                strict,
                json,
            };
            commands::quote::run(&req, &config, &mut out)
        }
        Commands::Favorites { action } => {
            let config = AppConfig::load_or_default(cli.config);
            let db = open_database(&config).await?;
            let store = FavoriteStore::with_storage_key(
                Arc::new(db.key_value()),
                config.storage.storage_key.clone(),
            );

            match store.load().await {
                LoadOutcome::Recovered => {
                    warn!("Saved favorites could not be read; starting from an empty list")
                }
                outcome => info!(?outcome, "Favorites loaded"),
            }

            let result = run_favorites(action, &store, &mut out).await;
            db.close().await;
            result
        }
    }
}

fn run_config(
    action: ConfigAction,
    config_path: Option<PathBuf>,
    out: &mut dyn std::io::Write,
) -> CliResult<()> {
    match action {
        ConfigAction::Init { force } => commands::config::init(config_path, force, out),
        ConfigAction::Show => commands::config::show(&AppConfig::load(config_path)?, out),
    }
}

async fn run_favorites(
    action: FavoritesAction,
    store: &FavoriteStore,
    out: &mut dyn std::io::Write,
) -> CliResult<()> {
    use commands::favorites;

    match action {
        FavoritesAction::List { category, json } => {
            favorites::list(store, category.as_deref(), json, out)
        }
        FavoritesAction::Show { id } => favorites::show(store, &id, out),
        FavoritesAction::Add(entry) => favorites::add(store, entry.into(), out).await,
        FavoritesAction::Remove { id } => favorites::remove(store, &id, out).await,
        FavoritesAction::Toggle(entry) => favorites::toggle(store, entry.into(), out).await,
        FavoritesAction::Clear => favorites::clear(store, out).await,
        FavoritesAction::Categories => favorites::categories(store, out),
    }
}

/// Opens (creating if needed) the configured database file.
async fn open_database(config: &AppConfig) -> CliResult<Database> {
    let path = config.database_path().ok_or(CliError::NoDataDir)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(Database::new(DbConfig::new(path)).await?)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=nearby_db=trace` - Trace the storage layer only
/// - Default: `info,nearby=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nearby=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
