//! # Tienda Dashboard Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs ────► parses arguments, sets up logging, runs the command     │
//! │  lib.rs  ────► Cli, config resolution, exit code                       │
//! │  commands ───► show / sell / reorder-info                              │
//! │  render  ────► text table, statistics cards, message line              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;
use tienda_dashboard_lib::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
