//! Plain-text rendering of the dashboard view.

use std::fmt::Write as _;

use tienda_core::{CatalogRow, Money, StatisticsSnapshot};
use tienda_sync::{Message, MessageKind};

const HEADERS: [&str; 8] = ["ID", "Product", "Category", "Stock", "Min", "Base", "Final", "Status"];

/// Formats an amount with the configured currency symbol.
pub fn price(amount: Money, symbol: &str) -> String {
    format!("{}{}", symbol, amount.to_decimal_string())
}

fn status(row: &CatalogRow) -> &'static str {
    match (row.sellable, row.needs_restock) {
        (false, _) => "OUT OF STOCK",
        (true, true) => "RESTOCK",
        (true, false) => "OK",
    }
}

/// Catalog table in backend order.
pub fn catalog_table(rows: &[CatalogRow], symbol: &str) -> String {
    if rows.is_empty() {
        return "No products.\n".to_string();
    }

    let cells: Vec<[String; 8]> = rows
        .iter()
        .map(|row| {
            [
                row.id.to_string(),
                row.name.clone(),
                row.category.clone(),
                row.stock.to_string(),
                row.min_stock.to_string(),
                price(row.base_price, symbol),
                price(row.final_price, symbol),
                status(row).to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

/// Statistics cards. Values are printed as the backend sent them.
pub fn statistics(stats: &StatisticsSnapshot, symbol: &str) -> String {
    format!(
        "Total revenue: {symbol}{}\nAverage sale:  {symbol}{}\nBest seller:   {}\nWorst seller:  {}\n",
        stats.total_revenue,
        stats.average_sale,
        stats.best_seller,
        stats.worst_seller,
        symbol = symbol,
    )
}

pub fn message(message: &Message) -> String {
    let tag = match message.kind {
        MessageKind::Error => "error",
        MessageKind::Success => "ok",
        MessageKind::Info => "info",
    };
    format!("[{}] {}\n", tag, message.text)
}
