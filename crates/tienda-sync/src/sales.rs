//! # Sales Transaction Handler
//!
//! Validates a sale, submits it, and reconciles the view afterwards.
//!
//! ## Sale Flow
//! ```text
//! sell(id, qty)
//!   │
//!   ├── qty < 1 or blank id ──► Message{error}          (no network call)
//!   │
//!   ▼
//! POST /productos/vender/{id} {cantidad}
//!   │
//!   ├── Accepted  ──► Message{success, ventaId, totalIngresos}
//!   │                   └──► synchronize() (keeps this message)
//!   ├── Rejected  ──► Message{error, backend reason verbatim}
//!   └── no usable response ──► Message{error, connection}   (no resync)
//! ```
//!
//! Stock is never decremented locally; the resync is the only way the
//! displayed stock changes.

use std::sync::Arc;
use tracing::{debug, info, warn};

use tienda_core::validation::validate_sale;
use tienda_core::{ProductId, SaleReceipt};

use crate::controller::DataSyncController;
use crate::error::{DashboardError, SyncResult};
use crate::gateway::{CatalogGateway, SaleResponse};
use crate::state::{MessageKind, ViewStore};

/// Text of the reorder notice.
pub const REORDER_NOTICE: &str = "Purchase orders are created automatically by the backend \
     when a product's stock drops to or below its minimum. Products at or below the minimum \
     are flagged for restock.";

pub struct SalesTransactionHandler {
    gateway: Arc<dyn CatalogGateway>,
    sync: Arc<DataSyncController>,
    store: Arc<ViewStore>,
}

impl SalesTransactionHandler {
    pub fn new(
        gateway: Arc<dyn CatalogGateway>,
        sync: Arc<DataSyncController>,
        store: Arc<ViewStore>,
    ) -> Self {
        SalesTransactionHandler {
            gateway,
            sync,
            store,
        }
    }

    /// Sells `quantity` units of `product_id`.
    ///
    /// The outcome is always reflected in the view's message. `Ok` means the
    /// backend recorded the sale, even if the follow-up resync failed (its
    /// error then replaces the success message).
    pub async fn sell(&self, product_id: &ProductId, quantity: i64) -> SyncResult<SaleReceipt> {
        let request = match validate_sale(product_id, quantity) {
            Ok(request) => request,
            Err(e) => {
                warn!(product_id = %product_id, quantity, error = %e, "Sale rejected locally");
                let err = DashboardError::from(e);
                self.store.post_error(&err);
                return Err(err);
            }
        };

        let response = self.gateway.submit_sale(&request).await;

        match response {
            Ok(SaleResponse::Accepted(receipt)) => {
                info!(
                    product_id = %request.product_id,
                    quantity = request.quantity,
                    transaction_id = %receipt.transaction_id,
                    "Sale completed"
                );
                let message_id = self.store.post(
                    MessageKind::Success,
                    format!(
                        "Sale completed. Transaction {}. Total revenue: {}",
                        receipt.transaction_id, receipt.total_revenue
                    ),
                );
                // the sync reports its own failure in the view
                if let Err(e) = self.sync.synchronize_keeping(message_id).await {
                    debug!(
                        transaction_id = %receipt.transaction_id,
                        error = %e,
                        "Post-sale resync failed"
                    );
                }
                Ok(receipt)
            }
            Ok(SaleResponse::Rejected { status, message }) => {
                warn!(product_id = %request.product_id, status, reason = %message, "Sale rejected by backend");
                let err = DashboardError::BusinessRule { reason: message };
                self.store.post_error(&err);
                Err(err)
            }
            Err(e) => {
                warn!(product_id = %request.product_id, error = %e, "Sale request failed");
                let err = DashboardError::sale_connectivity(&e);
                self.store.post_error(&err);
                Err(err)
            }
        }
    }

    /// Explains how reordering works. No network call.
    pub fn show_reorder_notice(&self) {
        self.store.post(MessageKind::Info, REORDER_NOTICE);
    }
}
