//! End-to-end tests of the HTTP gateways against a stub backend.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use tienda_core::{Money, ProductId};
use tienda_sync::{ClientConfig, Dashboard, DashboardError, ErrorKind, MessageKind};

// =============================================================================
// Stub backend
// =============================================================================

struct StubProduct {
    id: i64,
    name: &'static str,
    stock: u32,
    min_stock: u32,
    price_cents: i64,
}

struct StubState {
    products: Vec<StubProduct>,
    revenue_cents: i64,
    sales: u32,
    catalog_status: StatusCode,
    stats_status: StatusCode,
    catalog_requests: usize,
    stats_requests: usize,
}

#[derive(Clone)]
struct Stub(Arc<Mutex<StubState>>);

impl Stub {
    fn new() -> Self {
        Stub(Arc::new(Mutex::new(StubState {
            products: vec![
                StubProduct {
                    id: 1,
                    name: "Agua 500ml",
                    stock: 10,
                    min_stock: 5,
                    price_cents: 10000,
                },
                StubProduct {
                    id: 2,
                    name: "Sal 1kg",
                    stock: 3,
                    min_stock: 5,
                    price_cents: 5000,
                },
            ],
            revenue_cents: 0,
            sales: 0,
            catalog_status: StatusCode::OK,
            stats_status: StatusCode::OK,
            catalog_requests: 0,
            stats_requests: 0,
        })))
    }

    fn with<R>(&self, f: impl FnOnce(&mut StubState) -> R) -> R {
        f(&mut self.0.lock().unwrap())
    }
}

fn money_text(cents: i64) -> String {
    Money::from_cents(cents).to_decimal_string()
}

async fn list_products(State(stub): State<Stub>) -> Response {
    stub.with(|s| {
        s.catalog_requests += 1;
        if s.catalog_status != StatusCode::OK {
            return (s.catalog_status, Json(json!({ "message": "unavailable" }))).into_response();
        }
        let body: Vec<Value> = s
            .products
            .iter()
            .map(|p| {
                // product 2 has no category
                let category = if p.id == 1 {
                    json!({ "id": 1, "nombre": "Bebidas", "ivaPorcentaje": 0.19 })
                } else {
                    Value::Null
                };
                json!({
                    "id": p.id,
                    "nombre": p.name,
                    "cantidadStock": p.stock,
                    "stockMinimoPedido": p.min_stock,
                    "precioBase": money_text(p.price_cents),
                    "tipoProducto": category,
                })
            })
            .collect();
        Json(body).into_response()
    })
}

async fn statistics(State(stub): State<Stub>) -> Response {
    stub.with(|s| {
        s.stats_requests += 1;
        if s.stats_status != StatusCode::OK {
            return (s.stats_status, "boom").into_response();
        }
        let average = if s.sales == 0 {
            0
        } else {
            s.revenue_cents / s.sales as i64
        };
        Json(json!({
            "ingresosTotales": money_text(s.revenue_cents),
            "promedioVentas": money_text(average),
            "productoMasVendido": "Agua 500ml",
            "productoMenosVendidos": "Sal 1kg",
        }))
        .into_response()
    })
}

async fn sell(
    State(stub): State<Stub>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if id == "boom" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response();
    }
    let quantity = body["cantidad"].as_u64().unwrap_or(0) as u32;

    stub.with(|s| {
        let Some(product) = s.products.iter_mut().find(|p| p.id.to_string() == id) else {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Producto no encontrado" })),
            )
                .into_response();
        };
        if quantity > product.stock {
            let message = format!("Stock insuficiente. Disponibles: {}", product.stock);
            return (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response();
        }

        product.stock -= quantity;
        let gross = product.price_cents * quantity as i64;
        s.revenue_cents += gross;
        s.sales += 1;
        Json(json!({
            "ventaId": format!("V{}", s.sales),
            "totalIngresos": money_text(s.revenue_cents),
        }))
        .into_response()
    })
}

struct TestServer {
    base_url: String,
    stub: Stub,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let stub = Stub::new();
        let app = Router::new()
            .route("/api/productos", get(list_products))
            .route("/api/estadisticas", get(statistics))
            .route("/api/productos/vender/{id}", post(sell))
            .with_state(stub.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            stub,
            handle,
        }
    }

    fn dashboard(&self) -> Dashboard {
        dashboard_for(&format!("{}/api", self.base_url))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn dashboard_for(base_url: &str) -> Dashboard {
    let mut config = ClientConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.request_timeout_secs = 5;
    config.api.connect_timeout_secs = 2;
    Dashboard::connect(&config).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_sync_decodes_backend_payloads() {
    let server = TestServer::spawn().await;
    let dashboard = server.dashboard();

    let (catalog, stats) = dashboard.synchronize().await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(stats.best_seller, "Agua 500ml");

    let rows = dashboard.rows();
    assert_eq!(rows[0].id.as_str(), "1");
    assert_eq!(rows[0].category, "Bebidas");
    assert_eq!(rows[0].final_price, Money::from_cents(11900));
    assert!(!rows[0].needs_restock);
    assert_eq!(rows[1].category, "General");
    assert_eq!(rows[1].final_price, Money::from_cents(5000));
    assert!(rows[1].needs_restock);

    let view = dashboard.view();
    assert!(!view.is_loading());
    assert!(view.message().is_none());
    assert_eq!(view.generation(), 1);
}

#[tokio::test]
async fn test_sell_then_resync_shows_backend_stock() {
    let server = TestServer::spawn().await;
    let dashboard = server.dashboard();
    dashboard.synchronize().await.unwrap();

    let receipt = dashboard.sell(&ProductId::new("1"), 2).await.unwrap();
    assert_eq!(receipt.transaction_id.as_str(), "V1");
    assert_eq!(receipt.total_revenue, "200.00");

    let view = dashboard.view();
    let message = view.message().unwrap();
    assert_eq!(message.kind, MessageKind::Success);
    assert!(message.text.contains("V1"));
    assert!(message.text.contains("200.00"));
    assert_eq!(view.catalog()[0].stock, 8);
    assert_eq!(view.stats().total_revenue, "200.00");

    assert_eq!(server.stub.with(|s| s.catalog_requests), 2);
    assert_eq!(server.stub.with(|s| s.stats_requests), 2);
}

#[tokio::test]
async fn test_insufficient_stock_reason_is_passed_through() {
    let server = TestServer::spawn().await;
    let dashboard = server.dashboard();
    dashboard.synchronize().await.unwrap();

    let err = dashboard.sell(&ProductId::new("2"), 7).await.unwrap_err();
    assert_eq!(
        err,
        DashboardError::BusinessRule {
            reason: "Stock insuficiente. Disponibles: 3".into()
        }
    );

    let view = dashboard.view();
    assert!(view
        .message()
        .unwrap()
        .text
        .contains("Stock insuficiente. Disponibles: 3"));
    assert_eq!(view.catalog()[1].stock, 3);
    assert_eq!(server.stub.with(|s| s.catalog_requests), 1);
}

#[tokio::test]
async fn test_unknown_product_is_business_rejection() {
    let server = TestServer::spawn().await;
    let dashboard = server.dashboard();

    let err = dashboard.sell(&ProductId::new("404"), 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BusinessRule);
    assert!(err.user_message().contains("Producto no encontrado"));
}

#[tokio::test]
async fn test_sale_without_reason_is_connectivity_error() {
    let server = TestServer::spawn().await;
    let dashboard = server.dashboard();

    let err = dashboard.sell(&ProductId::new("boom"), 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connectivity);
    assert_eq!(server.stub.with(|s| s.catalog_requests), 0);
}

#[tokio::test]
async fn test_not_found_and_server_error_are_distinct() {
    let server = TestServer::spawn().await;
    let dashboard = server.dashboard();

    server.stub.with(|s| s.catalog_status = StatusCode::NOT_FOUND);
    let not_found = dashboard.synchronize().await.unwrap_err();
    assert_eq!(not_found.kind(), ErrorKind::Configuration);
    assert!(!dashboard.view().is_loading());

    server.stub.with(|s| {
        s.catalog_status = StatusCode::OK;
        s.stats_status = StatusCode::INTERNAL_SERVER_ERROR;
    });
    let server_error = dashboard.synchronize().await.unwrap_err();
    assert_eq!(server_error.kind(), ErrorKind::Connectivity);
    assert!(server_error.user_message().contains("500"));
    assert_ne!(not_found.user_message(), server_error.user_message());

    let view = dashboard.view();
    assert!(!view.is_loading());
    assert!(view.catalog().is_empty());
}

#[tokio::test]
async fn test_wrong_base_path_reports_configuration() {
    let server = TestServer::spawn().await;
    // missing the /api prefix: the stub answers 404 for every read
    let dashboard = dashboard_for(&server.base_url);

    let err = dashboard.synchronize().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dashboard = dashboard_for(&format!("http://{}/api", addr));

    let err = dashboard.synchronize().await.unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Connectivity { status: None, .. }
    ));

    let err = dashboard.sell(&ProductId::new("1"), 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connectivity);
    assert!(dashboard
        .view()
        .message()
        .unwrap()
        .text
        .contains("Verify that the backend is available"));
}
