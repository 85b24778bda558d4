//! # Dashboard Session
//!
//! Wires the gateways, the view store, the controller, and the sales
//! handler together for one operator session.

use std::sync::Arc;
use tracing::{info, info_span, Instrument, Span};
use uuid::Uuid;

use tienda_core::{CatalogRow, CatalogSnapshot, ProductId, SaleReceipt, StatisticsSnapshot};

use crate::config::ClientConfig;
use crate::controller::DataSyncController;
use crate::error::{GatewayResult, SyncResult};
use crate::gateway::{CatalogGateway, HttpBackend, StatsGateway};
use crate::sales::SalesTransactionHandler;
use crate::state::{ViewState, ViewStore};

/// One dashboard session: exactly one [`ViewState`] and the two components
/// allowed to change it.
pub struct Dashboard {
    session_id: Uuid,
    span: Span,
    default_category: String,
    store: Arc<ViewStore>,
    sync: Arc<DataSyncController>,
    sales: SalesTransactionHandler,
}

impl Dashboard {
    /// Session against the configured HTTP backend.
    pub fn connect(config: &ClientConfig) -> GatewayResult<Self> {
        let backend = Arc::new(HttpBackend::new(&config.api)?);
        info!(base_url = %backend.base_url(), "Dashboard backend configured");
        Ok(Self::with_gateways(
            backend.clone(),
            backend,
            config.default_category(),
        ))
    }

    /// Session over arbitrary gateways.
    pub fn with_gateways(
        catalog: Arc<dyn CatalogGateway>,
        stats: Arc<dyn StatsGateway>,
        default_category: &str,
    ) -> Self {
        let session_id = Uuid::new_v4();
        let span = info_span!("dashboard", session = %session_id);
        let store = Arc::new(ViewStore::new());
        let sync = Arc::new(DataSyncController::new(
            catalog.clone(),
            stats,
            store.clone(),
        ));
        let sales = SalesTransactionHandler::new(catalog, sync.clone(), store.clone());

        Dashboard {
            session_id,
            span,
            default_category: default_category.to_string(),
            store,
            sync,
            sales,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub async fn synchronize(&self) -> SyncResult<(Arc<CatalogSnapshot>, StatisticsSnapshot)> {
        self.sync.synchronize().instrument(self.span.clone()).await
    }

    pub async fn sell(&self, product_id: &ProductId, quantity: i64) -> SyncResult<SaleReceipt> {
        self.sales
            .sell(product_id, quantity)
            .instrument(self.span.clone())
            .await
    }

    pub fn show_reorder_notice(&self) {
        let _entered = self.span.enter();
        self.sales.show_reorder_notice();
    }

    /// Current view.
    pub fn view(&self) -> ViewState {
        self.store.snapshot()
    }

    /// Catalog table rows, using the configured default category label.
    pub fn rows(&self) -> Vec<CatalogRow> {
        self.store.snapshot().rows(&self.default_category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::SaleResponse;
    use crate::state::MessageKind;
    use crate::testing::{product, stats, ScriptedBackend};
    use tienda_core::Money;

    #[tokio::test]
    async fn test_session_round_trip() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_catalog(Ok(vec![product("1", 5, 5), product("2", 0, 3)]));
        backend.push_stats(Ok(stats("0")));
        let dashboard = Dashboard::with_gateways(backend.clone(), backend.clone(), "General");

        dashboard.synchronize().await.unwrap();
        let rows = dashboard.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].final_price, Money::from_cents(11900));
        assert!(rows[0].needs_restock);
        assert!(!rows[1].sellable);

        backend.push_sale(Ok(SaleResponse::Rejected {
            status: 404,
            message: "Producto no encontrado".into(),
        }));
        assert!(dashboard.sell(&ProductId::new("99"), 1).await.is_err());
        assert!(dashboard.view().message().unwrap().is_error());

        dashboard.show_reorder_notice();
        assert_eq!(dashboard.view().message().unwrap().kind, MessageKind::Info);
    }

    #[test]
    fn test_connect_rejects_bad_url() {
        let mut config = ClientConfig::default();
        config.api.base_url = "::nope::".into();
        assert!(Dashboard::connect(&config).is_err());
    }
}
