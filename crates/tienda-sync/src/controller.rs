//! # Data Sync Controller
//!
//! Fetches catalog and statistics concurrently and installs them as one
//! snapshot.
//!
//! ## Sync Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  synchronize()                                                          │
//! │                                                                         │
//! │   begin_sync() ── ticket N, loading = true                              │
//! │        │                                                                │
//! │        ├──────────────► GET /productos ─────┐                           │
//! │        │                                     ├── join!                  │
//! │        └──────────────► GET /estadisticas ──┘                           │
//! │                                                                         │
//! │   both Ok  ─► install(N) catalog + stats together                       │
//! │   any Err  ─► classify ─► Message{error}, old snapshot kept             │
//! │                                                                         │
//! │   ticket dropped ── loading = false (also on cancellation)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use tracing::{debug, info, warn};

use tienda_core::{CatalogSnapshot, StatisticsSnapshot};

use crate::error::{DashboardError, GatewayError, GatewayResult, Operation, SyncResult};
use crate::gateway::{CatalogGateway, StatsGateway};
use crate::state::ViewStore;

/// Orchestrates one sync cycle at a time per call; calls may overlap.
pub struct DataSyncController {
    catalog: Arc<dyn CatalogGateway>,
    stats: Arc<dyn StatsGateway>,
    store: Arc<ViewStore>,
}

impl DataSyncController {
    pub fn new(
        catalog: Arc<dyn CatalogGateway>,
        stats: Arc<dyn StatsGateway>,
        store: Arc<ViewStore>,
    ) -> Self {
        DataSyncController {
            catalog,
            stats,
            store,
        }
    }

    /// Refreshes catalog and statistics.
    ///
    /// On success the active message is cleared and the fetched pair is
    /// returned (even when a newer sync already installed its own pair).
    /// On failure the previous snapshot stays in place and the error is
    /// shown.
    pub async fn synchronize(&self) -> SyncResult<(Arc<CatalogSnapshot>, StatisticsSnapshot)> {
        self.run(None).await
    }

    /// Resync after a sale; keeps message `keep_message` if still active.
    pub(crate) async fn synchronize_keeping(
        &self,
        keep_message: u64,
    ) -> SyncResult<(Arc<CatalogSnapshot>, StatisticsSnapshot)> {
        self.run(Some(keep_message)).await
    }

    async fn run(
        &self,
        keep_message: Option<u64>,
    ) -> SyncResult<(Arc<CatalogSnapshot>, StatisticsSnapshot)> {
        let ticket = self.store.begin_sync();
        let generation = ticket.generation();
        debug!(generation, "Synchronization started");

        let (catalog, stats) = tokio::join!(
            self.catalog.fetch_catalog(),
            self.stats.fetch_statistics()
        );

        match (catalog, stats) {
            (Ok(catalog), Ok(stats)) => {
                let catalog = Arc::new(catalog);
                if self
                    .store
                    .install(&ticket, Arc::clone(&catalog), stats.clone(), keep_message)
                {
                    info!(generation, products = catalog.len(), "Synchronization complete");
                }
                Ok((catalog, stats))
            }
            (catalog, stats) => {
                let err = classify_failure(&catalog, &stats);
                warn!(generation, error = %err, "Synchronization failed");
                self.store.fail_sync(&ticket, &err);
                Err(err)
            }
        }
    }
}

/// Maps the failed pair of reads onto the error taxonomy.
///
/// A 404 on either read wins; otherwise the catalog failure is reported
/// first.
fn classify_failure(
    catalog: &GatewayResult<CatalogSnapshot>,
    stats: &GatewayResult<StatisticsSnapshot>,
) -> DashboardError {
    let failures: Vec<&GatewayError> = [catalog.as_ref().err(), stats.as_ref().err()]
        .into_iter()
        .flatten()
        .collect();

    if let Some(not_found) = failures.iter().find(|e| e.is_not_found()) {
        return DashboardError::Configuration {
            endpoint: not_found.endpoint().unwrap_or("endpoint").to_string(),
        };
    }

    match failures.first() {
        Some(err) => DashboardError::Connectivity {
            operation: Operation::Sync,
            status: err.status(),
            detail: err.to_string(),
        },
        // unreachable from run(): called only when a read failed
        None => DashboardError::Connectivity {
            operation: Operation::Sync,
            status: None,
            detail: "synchronization failed".to_string(),
        },
    }
}
