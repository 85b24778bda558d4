//! # Backend Gateways
//!
//! Thin request/response wrappers around the backend's REST endpoints.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Backend Contract                                │
//! │                                                                         │
//! │  CatalogGateway                                                        │
//! │  ├── GET  {base}/productos               → [Product]                   │
//! │  └── POST {base}/productos/vender/{id}   {cantidad}                    │
//! │           2xx  → {ventaId, totalIngresos}   SaleResponse::Accepted     │
//! │           4xx/5xx with {message}            SaleResponse::Rejected     │
//! │           anything else                     GatewayError               │
//! │                                                                         │
//! │  StatsGateway                                                          │
//! │  └── GET  {base}/estadisticas            → StatisticsSnapshot          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Gateways never retry and never interpret business meaning beyond telling
//! a rejection body apart from a broken response. Classification into
//! [`DashboardError`](crate::error::DashboardError) happens in the controller
//! and the sales handler.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use tienda_core::{CatalogSnapshot, SaleReceipt, SaleRequest, StatisticsSnapshot};

use crate::config::ApiSettings;
use crate::error::{GatewayError, GatewayResult};

// =============================================================================
// Gateway Traits
// =============================================================================

/// Outcome of a sale submission that produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleResponse {
    /// The backend recorded the sale.
    Accepted(SaleReceipt),

    /// The backend refused the sale with a readable reason.
    Rejected { status: u16, message: String },
}

/// Catalog reads and the sale write.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// `GET /productos`, in backend order.
    async fn fetch_catalog(&self) -> GatewayResult<CatalogSnapshot>;

    /// `POST /productos/vender/{id}`.
    async fn submit_sale(&self, request: &SaleRequest) -> GatewayResult<SaleResponse>;
}

/// Statistics read.
#[async_trait]
pub trait StatsGateway: Send + Sync {
    /// `GET /estadisticas`.
    async fn fetch_statistics(&self) -> GatewayResult<StatisticsSnapshot>;
}

// =============================================================================
// HTTP Backend
// =============================================================================

/// Body of a business-rule rejection.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    message: String,
}

/// reqwest client bound to one backend base URL.
///
/// Implements both gateway traits; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Builds the client once, with the configured timeouts.
    pub fn new(settings: &ApiSettings) -> GatewayResult<Self> {
        let base_url = Url::parse(&settings.base_url)?;
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .connect_timeout(settings.connect_timeout())
            .build()
            .map_err(|e| GatewayError::ClientBuild(e.to_string()))?;

        Self::with_client(client, base_url)
    }

    /// Uses an existing client.
    pub fn with_client(client: Client, base_url: Url) -> GatewayResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        Ok(HttpBackend { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> GatewayResult<T> {
        let url = self.endpoint(segments)?;
        let endpoint = url.path().to_string();

        debug!(endpoint = %endpoint, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %endpoint, status = status.as_u16(), "Read endpoint returned an error status");
            return Err(GatewayError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;
        decode(&endpoint, &body)
    }
}

#[async_trait]
impl CatalogGateway for HttpBackend {
    async fn fetch_catalog(&self) -> GatewayResult<CatalogSnapshot> {
        self.get_json(&["productos"]).await
    }

    async fn submit_sale(&self, request: &SaleRequest) -> GatewayResult<SaleResponse> {
        let url = self.endpoint(&["productos", "vender", request.product_id.as_str()])?;
        let endpoint = url.path().to_string();

        debug!(endpoint = %endpoint, product_id = %request.product_id, quantity = request.quantity, "POST sale");
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&endpoint, e))?;

        if status.is_success() {
            return decode(&endpoint, &body).map(SaleResponse::Accepted);
        }

        match serde_json::from_slice::<RejectionBody>(&body) {
            Ok(rejection) => Ok(SaleResponse::Rejected {
                status: status.as_u16(),
                message: rejection.message,
            }),
            Err(_) => {
                warn!(endpoint = %endpoint, status = status.as_u16(), "Sale failed without a readable reason");
                Err(GatewayError::Status {
                    endpoint,
                    status: status.as_u16(),
                })
            }
        }
    }
}

#[async_trait]
impl StatsGateway for HttpBackend {
    async fn fetch_statistics(&self) -> GatewayResult<StatisticsSnapshot> {
        self.get_json(&["estadisticas"]).await
    }
}

fn transport_error(endpoint: &str, err: reqwest::Error) -> GatewayError {
    let reason = if err.is_timeout() {
        format!("timed out ({})", err)
    } else {
        err.to_string()
    };
    warn!(endpoint = %endpoint, reason = %reason, "Backend request failed");
    GatewayError::Transport {
        endpoint: endpoint.to_string(),
        reason,
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> GatewayResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(endpoint = %endpoint, error = %e, "Response body did not decode");
        GatewayError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    })
}
