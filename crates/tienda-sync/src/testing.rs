//! Scripted in-memory gateways for unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tienda_core::{
    CatalogSnapshot, Category, Decimal, Product, RecordId, SaleRequest, StatisticsSnapshot, TaxRate,
};

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{CatalogGateway, SaleResponse, StatsGateway};

type Scripted<T> = Mutex<VecDeque<(GatewayResult<T>, Duration)>>;

/// Replays queued responses in order and counts every call.
///
/// An empty queue answers with a transport error so a test that forgets to
/// script a call fails loudly.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    catalog: Scripted<CatalogSnapshot>,
    stats: Scripted<StatisticsSnapshot>,
    sales: Scripted<SaleResponse>,
    catalog_calls: AtomicUsize,
    stats_calls: AtomicUsize,
    sale_calls: AtomicUsize,
    last_sale: Mutex<Option<SaleRequest>>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_catalog(&self, result: GatewayResult<CatalogSnapshot>) {
        self.push_catalog_delayed(result, Duration::ZERO);
    }

    pub(crate) fn push_catalog_delayed(&self, result: GatewayResult<CatalogSnapshot>, delay: Duration) {
        self.catalog.lock().unwrap().push_back((result, delay));
    }

    pub(crate) fn push_stats(&self, result: GatewayResult<StatisticsSnapshot>) {
        self.stats.lock().unwrap().push_back((result, Duration::ZERO));
    }

    pub(crate) fn push_sale(&self, result: GatewayResult<SaleResponse>) {
        self.sales.lock().unwrap().push_back((result, Duration::ZERO));
    }

    pub(crate) fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn sale_calls(&self) -> usize {
        self.sale_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_sale(&self) -> Option<SaleRequest> {
        self.last_sale.lock().unwrap().clone()
    }
}

async fn next<T>(queue: &Scripted<T>, counter: &AtomicUsize, endpoint: &str) -> GatewayResult<T> {
    counter.fetch_add(1, Ordering::SeqCst);
    let scripted = queue.lock().unwrap().pop_front();
    match scripted {
        Some((result, delay)) => {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        }
        None => Err(GatewayError::Transport {
            endpoint: endpoint.to_string(),
            reason: "no scripted response".to_string(),
        }),
    }
}

#[async_trait]
impl CatalogGateway for ScriptedBackend {
    async fn fetch_catalog(&self) -> GatewayResult<CatalogSnapshot> {
        next(&self.catalog, &self.catalog_calls, "/api/productos").await
    }

    async fn submit_sale(&self, request: &SaleRequest) -> GatewayResult<SaleResponse> {
        *self.last_sale.lock().unwrap() = Some(request.clone());
        next(&self.sales, &self.sale_calls, "/api/productos/vender").await
    }
}

#[async_trait]
impl StatsGateway for ScriptedBackend {
    async fn fetch_statistics(&self) -> GatewayResult<StatisticsSnapshot> {
        next(&self.stats, &self.stats_calls, "/api/estadisticas").await
    }
}

pub(crate) fn product(id: &str, stock: u32, min_stock: u32) -> Product {
    Product {
        id: RecordId::new(id),
        name: format!("Producto {}", id),
        stock,
        min_stock,
        base_price: Decimal::new(100, 0),
        category: Some(Category {
            id: None,
            name: "Bebidas".to_string(),
            tax_rate: TaxRate::parse_fraction("0.19"),
        }),
    }
}

pub(crate) fn stats(revenue: &str) -> StatisticsSnapshot {
    StatisticsSnapshot {
        total_revenue: revenue.to_string(),
        ..StatisticsSnapshot::default()
    }
}
