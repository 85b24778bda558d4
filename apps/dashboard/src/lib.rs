//! # Tienda Dashboard (terminal front-end)
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `ClientConfig` (file → environment → `--api-url`)
//! 3. Build the `Dashboard` session over the HTTP backend
//! 4. Run one subcommand and print the view
//! 5. Exit non-zero when the final message is an error

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{info, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use tienda_sync::{ClientConfig, Dashboard};

pub mod commands;
pub mod render;

#[derive(Debug, Parser)]
#[command(name = "tienda-dashboard")]
#[command(version, about = "Catalog, sales, and statistics dashboard for the Tienda backend", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend API base URL, e.g. http://localhost:8080/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Synchronize and print the catalog and statistics
    Show {
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sell units of a product, then print the refreshed catalog
    Sell {
        /// Product identifier
        product_id: String,

        /// Units to sell
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Explain how automatic reordering works
    ReorderInfo,
}

/// Log directives used when `RUST_LOG` is unset: our crates at debug, HTTP
/// internals at warn.
pub const DEFAULT_LOG_FILTER: &str = "info,tienda=debug,reqwest=warn,hyper=warn";

/// Formatting subscriber gated by `filter` alone.
fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over [`DEFAULT_LOG_FILTER`]. Logs go to stderr so stdout
/// stays clean for `--json`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    subscriber(filter, std::io::stderr).init();
}

/// Resolves configuration for this invocation.
pub fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::load_or_default(cli.config.clone());
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
        config.validate()?;
    }
    Ok(config)
}

/// Runs one command and maps the final view to an exit code.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    let dashboard = Dashboard::connect(&config)?;
    info!(session = %dashboard.session_id(), base_url = %config.base_url(), "Dashboard session started");

    let symbol = config.display.currency_symbol.as_str();
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Show { json } => commands::show(&dashboard, symbol, json, &mut out).await?,
        Command::Sell {
            product_id,
            quantity,
        } => commands::sell(&dashboard, symbol, &product_id, quantity, &mut out).await?,
        Command::ReorderInfo => commands::reorder_info(&dashboard, &mut out)?,
    }

    Ok(exit_code(&dashboard))
}

fn exit_code(dashboard: &Dashboard) -> ExitCode {
    match dashboard.view().message() {
        Some(message) if message.is_error() => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
