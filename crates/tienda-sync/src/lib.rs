//! # tienda-sync: Data Synchronization & Sale Reconciliation
//!
//! This crate keeps the dashboard's view consistent with the backend. It
//! merges concurrent reads into one snapshot, submits sales, and turns
//! every failure into a single user-facing message.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Dashboard Session                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 Dashboard (session.rs)                           │  │
//! │  │  synchronize() • sell() • show_reorder_notice() • view()         │  │
//! │  └───────────────┬──────────────────────────────┬───────────────────┘  │
//! │                  │                              │                      │
//! │                  ▼                              ▼                      │
//! │  ┌────────────────────────────┐   ┌──────────────────────────────┐    │
//! │  │ DataSyncController         │◄──│ SalesTransactionHandler      │    │
//! │  │ join!(catalog, stats)      │   │ validate → POST → resync     │    │
//! │  └──────┬─────────────┬───────┘   └──────────────┬───────────────┘    │
//! │         │             │                          │                    │
//! │         │     writes  ▼                  writes  ▼                    │
//! │         │   ┌──────────────────────────────────────────────┐          │
//! │         │   │ ViewStore: catalog • stats • loading • msg   │          │
//! │         │   └──────────────────────────────────────────────┘          │
//! │         ▼                                                              │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │ CatalogGateway / StatsGateway  (HttpBackend over reqwest)        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Channel
//! Every failure ends up as exactly one `Message{error}` in the view:
//! configuration (404), connectivity, business rule, or validation. Nothing
//! is retried.
//!
//! ## Usage
//! ```rust,no_run
//! use tienda_sync::{ClientConfig, Dashboard};
//! use tienda_core::ProductId;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load_or_default(None);
//! let dashboard = Dashboard::connect(&config)?;
//!
//! let _ = dashboard.synchronize().await;
//! let _ = dashboard.sell(&ProductId::new("7"), 2).await;
//!
//! if let Some(message) = dashboard.view().message() {
//!     println!("{}", message.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod sales;
pub mod session;
pub mod state;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ApiSettings, ClientConfig, DisplaySettings};
pub use controller::DataSyncController;
pub use error::{
    ConfigError, DashboardError, ErrorKind, GatewayError, GatewayResult, Operation, SyncResult,
};
pub use gateway::{CatalogGateway, HttpBackend, SaleResponse, StatsGateway};
pub use sales::{SalesTransactionHandler, REORDER_NOTICE};
pub use session::Dashboard;
pub use state::{Message, MessageKind, ViewState, ViewStore};
