//! # tienda-core: Pure Business Logic for the Tienda Dashboard
//!
//! This crate holds the rules the dashboard derives locally from data the
//! backend owns. Everything here is a pure function of its inputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tienda Dashboard Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard UI (browser / terminal)               │   │
//! │  │      Catalog table ──► Sell action ──► Statistics cards         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              tienda-sync (ViewState, sync, sales)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tienda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │  reorder  │  │ validation│  │   │
//! │  │   │  Product  │  │ finalPrice│  │  restock  │  │  quantity │  │   │
//! │  │   │  Stats    │  │  Money    │  │  flag     │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire and view types (Product, Category, StatisticsSnapshot, ...)
//! - [`money`] - Exact decimal parsing and the integer-cent Money type (no floating point!)
//! - [`pricing`] - Tax-inclusive display price
//! - [`reorder`] - Restock indicator and sellable checks
//! - [`error`] - Domain error types
//! - [`validation`] - Sale input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::{final_price, Category, Decimal, Product, RecordId, TaxRate};
//!
//! let product = Product {
//!     id: RecordId::from(1),
//!     name: "Agua".into(),
//!     stock: 10,
//!     min_stock: 5,
//!     base_price: Decimal::new(10000, 2), // 100.00
//!     category: Some(Category {
//!         id: None,
//!         name: "Bebidas".into(),
//!         tax_rate: TaxRate::parse_fraction("0.19"), // 19%
//!     }),
//! };
//!
//! assert_eq!(final_price(&product).cents(), 11900);
//! ```

pub mod error;
pub mod money;
pub mod pricing;
pub mod reorder;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::final_price;
pub use reorder::{can_sell, check_sellable, needs_restock};
pub use types::*;

pub use rust_decimal::Decimal;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category label shown for products the backend sends without a category.
pub const DEFAULT_CATEGORY_LABEL: &str = "General";

/// Placeholder for monetary statistics before the first sync.
pub const STATS_ZERO_PLACEHOLDER: &str = "0";

/// Placeholder for product-label statistics before the first sync.
pub const STATS_LABEL_PLACEHOLDER: &str = "N/A";
