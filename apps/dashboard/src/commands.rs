//! # Dashboard Commands
//!
//! One function per subcommand. Each runs a single action against the
//! session and writes the resulting view to `out`.
//!
//! Failures are already in the view's message, so these only return `Err`
//! when writing the output fails.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use tienda_core::{CatalogRow, ProductId, StatisticsSnapshot};
use tienda_sync::{Dashboard, Message};

use crate::render;

/// Machine-readable form of the view for `show --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewJson<'a> {
    rows: Vec<CatalogRow>,
    stats: &'a StatisticsSnapshot,
    message: Option<&'a Message>,
    generation: u64,
}

/// `show`: synchronize and print the catalog and statistics.
pub async fn show<W: Write>(
    dashboard: &Dashboard,
    symbol: &str,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let _ = dashboard.synchronize().await;

    if json {
        let view = dashboard.view();
        let payload = ViewJson {
            rows: dashboard.rows(),
            stats: view.stats(),
            message: view.message(),
            generation: view.generation(),
        };
        serde_json::to_writer_pretty(&mut *out, &payload)?;
        writeln!(out)?;
        return Ok(());
    }

    print_view(dashboard, symbol, out)
}

/// `sell`: sell, then print the message and the refreshed catalog.
pub async fn sell<W: Write>(
    dashboard: &Dashboard,
    symbol: &str,
    product_id: &str,
    quantity: i64,
    out: &mut W,
) -> anyhow::Result<()> {
    let product_id = ProductId::new(product_id);
    let outcome = dashboard.sell(&product_id, quantity).await;
    debug!(product_id = %product_id, quantity, ok = outcome.is_ok(), "Sell command finished");

    print_view(dashboard, symbol, out)
}

/// `reorder-info`: print the reorder notice.
pub fn reorder_info<W: Write>(dashboard: &Dashboard, out: &mut W) -> anyhow::Result<()> {
    dashboard.show_reorder_notice();
    if let Some(message) = dashboard.view().message() {
        out.write_all(render::message(message).as_bytes())?;
    }
    Ok(())
}

fn print_view<W: Write>(dashboard: &Dashboard, symbol: &str, out: &mut W) -> anyhow::Result<()> {
    let view = dashboard.view();

    if let Some(message) = view.message() {
        out.write_all(render::message(message).as_bytes())?;
        writeln!(out)?;
    }
    out.write_all(render::catalog_table(&dashboard.rows(), symbol).as_bytes())?;
    writeln!(out)?;
    out.write_all(render::statistics(view.stats(), symbol).as_bytes())?;
    Ok(())
}
