//! # Error Types
//!
//! Domain-specific error types for tienda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tienda-core errors (this file)                                        │
//! │  ├── CoreError        - Local stock checks for the sell action         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tienda-sync errors (separate crate)                                   │
//! │  ├── GatewayError     - Transport / decode failures                    │
//! │  └── DashboardError   - What the operator sees (one Message)           │
//! │                                                                         │
//! │  Flow: ValidationError → DashboardError::Validation → Message{error}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Stock checks the UI runs before offering the sell action.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product has no stock at all.
    #[error("{product} is out of stock")]
    OutOfStock { product: String },

    /// Requested more than the displayed stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Quantity field: 5
    ///      │
    ///      ▼
    /// Displayed stock: 3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Arroz", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Sell button disabled
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: u32,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, detected before anything reaches the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
