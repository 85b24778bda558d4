//! # Dashboard Error Types
//!
//! Error types for gateways, configuration, and the user-facing taxonomy.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Dashboard Error Categories                        │
//! │                                                                         │
//! │  GatewayError (transport layer, no business meaning)                   │
//! │  ├── Status        non-success HTTP status                              │
//! │  ├── Transport     no response (refused, timeout, DNS)                  │
//! │  ├── Decode        body did not match the expected shape                │
//! │  └── InvalidUrl / ClientBuild                                           │
//! │                      │                                                  │
//! │                      ▼  classified by controller / sales handler        │
//! │  DashboardError (exactly one Message{error} each)                      │
//! │  ├── Configuration  endpoint not found (404)                            │
//! │  ├── Connectivity   unreachable or non-success status                   │
//! │  ├── BusinessRule   backend refused the sale (reason verbatim)          │
//! │  └── Validation     rejected locally, never sent                        │
//! │                                                                         │
//! │  ConfigError (dashboard.toml / environment)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use tienda_core::ValidationError;

/// Result type alias for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Result type alias for synchronization and sale operations.
pub type SyncResult<T> = Result<T, DashboardError>;

// =============================================================================
// Gateway Errors
// =============================================================================

/// Transport-level failure talking to one endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// No response was received.
    #[error("request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    /// A response arrived but could not be decoded.
    #[error("could not decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// The endpoint URL could not be built.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl GatewayError {
    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 404 answer.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Endpoint the failure relates to, if known.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            GatewayError::Status { endpoint, .. }
            | GatewayError::Transport { endpoint, .. }
            | GatewayError::Decode { endpoint, .. } => Some(endpoint),
            GatewayError::InvalidUrl(_) | GatewayError::ClientBuild(_) => None,
        }
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Dashboard Error Taxonomy
// =============================================================================

/// Which user action a connectivity failure interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Sync,
    Sale,
}

/// Every failure the operator can see.
///
/// None of these are retried. Each renders to one replace-on-set error
/// Message via its `Display` text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DashboardError {
    /// A read endpoint does not exist: the backend is down, on another port,
    /// or the base URL is wrong.
    #[error(
        "API unreachable or misconfigured: {endpoint} was not found (HTTP 404). \
         Check that the backend is running and that the API base URL is correct."
    )]
    Configuration { endpoint: String },

    /// No usable response.
    #[error("{}", connectivity_text(.operation, .status, .detail))]
    Connectivity {
        operation: Operation,
        status: Option<u16>,
        detail: String,
    },

    /// The backend refused the sale; `reason` is its message verbatim.
    #[error("Sale rejected: {reason}")]
    BusinessRule { reason: String },

    /// Input rejected before any network call.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

fn connectivity_text(operation: &Operation, status: &Option<u16>, detail: &str) -> String {
    match (operation, status) {
        (Operation::Sale, _) => {
            "Connection error while registering the sale. Verify that the backend is available."
                .to_string()
        }
        (Operation::Sync, Some(status)) => {
            format!("Connection error: the server responded with status {}.", status)
        }
        (Operation::Sync, None) => format!("Connection error: {}", detail),
    }
}

/// Discriminant of [`DashboardError`], attached to error Messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Connectivity,
    BusinessRule,
    Validation,
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::Configuration { .. } => ErrorKind::Configuration,
            DashboardError::Connectivity { .. } => ErrorKind::Connectivity,
            DashboardError::BusinessRule { .. } => ErrorKind::BusinessRule,
            DashboardError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Text shown to the operator.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Connectivity failure of a sale attempt.
    pub fn sale_connectivity(err: &GatewayError) -> Self {
        DashboardError::Connectivity {
            operation: Operation::Sale,
            status: err.status(),
            detail: err.to_string(),
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Failures loading, validating, or saving `dashboard.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    #[error("Failed to save config: {0}")]
    SaveFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}
