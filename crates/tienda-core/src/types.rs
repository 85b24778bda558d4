//! # Domain Types
//!
//! Types exchanged with the backend and handed to the dashboard UI.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │    Category     │   │ StatisticsSnapshot  │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (opaque)    │──►│  name           │   │  total_revenue      │   │
//! │  │  name           │   │  tax_rate       │   │  average_sale       │   │
//! │  │  stock / min    │   └─────────────────┘   │  best/worst seller  │   │
//! │  │  base_price     │                         └─────────────────────┘   │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  SaleRequest    │   │  SaleReceipt    │   │    CatalogRow       │   │
//! │  │  product_id     │   │  transaction_id │   │  (view model, TS)   │   │
//! │  │  quantity > 0   │   │  total_revenue  │   │  final_price, flags │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! The backend speaks Spanish camelCase (`cantidadStock`, `precioBase`, ...).
//! Every struct maps those names onto English fields with `#[serde(rename)]`.
//! Decimal fields (`precioBase`, `ivaPorcentaje`) are decoded into exact
//! [`Decimal`] values, so no floating point value survives past this module
//! and nothing is rounded before the final price is computed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{parse_decimal, Money};
use crate::{pricing, reorder, STATS_LABEL_PLACEHOLDER, STATS_ZERO_PLACEHOLDER};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as the exact fraction the backend sends (`0.19` for 19%).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Wraps a fraction; negative rates yield `None`.
    pub fn from_fraction(fraction: Decimal) -> Option<Self> {
        (fraction >= Decimal::ZERO).then_some(TaxRate(fraction))
    }

    /// Parses a fraction ("0.19") into a tax rate without rounding it.
    ///
    /// Negative or malformed input yields `None`.
    ///
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tienda_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::parse_fraction("0.19").unwrap().fraction(), Decimal::new(19, 2));
    /// assert!(TaxRate::parse_fraction("-0.1").is_none());
    /// ```
    pub fn parse_fraction(text: &str) -> Option<Self> {
        parse_decimal(text).and_then(TaxRate::from_fraction)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Opaque backend identifier.
///
/// The backend uses numeric database keys today; the dashboard never does
/// arithmetic on them, so both JSON numbers and strings are accepted and kept
/// as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[ts(export)]
pub struct RecordId(String);

/// Identifier of a product in the catalog.
pub type ProductId = RecordId;

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::new(id)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = wire::Scalar::deserialize(deserializer)?;
        raw.into_text()
            .map(RecordId)
            .ok_or_else(|| serde::de::Error::custom("identifier must not be null"))
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category ("tipo de producto") with its tax rate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Backend identifier (absent in some payloads).
    #[serde(default)]
    pub id: Option<RecordId>,

    /// Display name.
    #[serde(rename = "nombre", default)]
    pub name: String,

    /// Tax rate; `None` when the backend sends no rate (treated as zero).
    #[serde(
        rename = "ivaPorcentaje",
        default,
        deserialize_with = "wire::optional_tax_rate"
    )]
    pub tax_rate: Option<TaxRate>,
}

// =============================================================================
// Product
// =============================================================================

/// A product as returned by `GET /productos`.
///
/// The dashboard holds an immutable copy per sync cycle and never edits
/// stock locally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    /// Opaque unique identifier.
    pub id: ProductId,

    /// Display name.
    #[serde(rename = "nombre", default)]
    pub name: String,

    /// Current stock as last confirmed by the backend.
    #[serde(rename = "cantidadStock", default)]
    pub stock: u32,

    /// Minimum-stock threshold that triggers backend reordering.
    #[serde(rename = "stockMinimoPedido", default)]
    pub min_stock: u32,

    /// Base price before tax, exactly as the backend sent it.
    #[serde(rename = "precioBase", default, deserialize_with = "wire::price")]
    pub base_price: Decimal,

    /// Category, when assigned.
    #[serde(rename = "tipoProducto", default)]
    pub category: Option<Category>,
}

impl Product {
    /// Tax rate for this product; zero without a category or rate.
    pub fn tax_rate(&self) -> TaxRate {
        self.category
            .as_ref()
            .and_then(|c| c.tax_rate)
            .unwrap_or_default()
    }

    /// Category label, falling back to `default_label`.
    pub fn category_label<'a>(&'a self, default_label: &'a str) -> &'a str {
        match &self.category {
            Some(c) if !c.name.trim().is_empty() => &c.name,
            _ => default_label,
        }
    }
}

/// Ordered catalog exactly as the backend returned it.
pub type CatalogSnapshot = Vec<Product>;

// =============================================================================
// Statistics
// =============================================================================

/// Aggregate business statistics from `GET /estadisticas`.
///
/// All values are opaque display text computed by the backend; numbers are
/// rendered as received. Missing fields fall back to the placeholders the
/// dashboard shows before its first sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatisticsSnapshot {
    #[serde(
        rename = "ingresosTotales",
        default = "zero_placeholder",
        deserialize_with = "wire::text_or_zero"
    )]
    pub total_revenue: String,

    #[serde(
        rename = "promedioVentas",
        default = "zero_placeholder",
        deserialize_with = "wire::text_or_zero"
    )]
    pub average_sale: String,

    #[serde(
        rename = "productoMasVendido",
        default = "label_placeholder",
        deserialize_with = "wire::text_or_label"
    )]
    pub best_seller: String,

    #[serde(
        rename = "productoMenosVendidos",
        default = "label_placeholder",
        deserialize_with = "wire::text_or_label"
    )]
    pub worst_seller: String,
}

fn zero_placeholder() -> String {
    STATS_ZERO_PLACEHOLDER.to_string()
}

fn label_placeholder() -> String {
    STATS_LABEL_PLACEHOLDER.to_string()
}

impl Default for StatisticsSnapshot {
    fn default() -> Self {
        StatisticsSnapshot {
            total_revenue: zero_placeholder(),
            average_sale: zero_placeholder(),
            best_seller: label_placeholder(),
            worst_seller: label_placeholder(),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A validated request to sell `quantity` units of one product.
///
/// Only `cantidad` goes in the body; the product id is a path segment of
/// `POST /productos/vender/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRequest {
    #[serde(skip)]
    pub product_id: ProductId,

    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// Backend confirmation of a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaleReceipt {
    /// Transaction id (`ventaId`, or `id` when the raw sale record is returned).
    #[serde(rename = "ventaId", alias = "id")]
    pub transaction_id: RecordId,

    /// Resulting total revenue, as display text.
    #[serde(
        rename = "totalIngresos",
        default = "zero_placeholder",
        deserialize_with = "wire::text_or_zero"
    )]
    pub total_revenue: String,
}

// =============================================================================
// Catalog Row (view model)
// =============================================================================

/// One display row of the catalog table, derived from a [`Product`].
///
/// Everything here is computed locally and is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRow {
    pub id: RecordId,
    pub name: String,
    pub stock: u32,
    pub min_stock: u32,
    pub category: String,
    pub base_price: Money,
    pub final_price: Money,
    /// Stock at or below the minimum threshold.
    pub needs_restock: bool,
    /// At least one unit can be sold.
    pub sellable: bool,
}

impl CatalogRow {
    pub fn from_product(product: &Product, default_category: &str) -> Self {
        CatalogRow {
            id: product.id.clone(),
            name: product.name.clone(),
            stock: product.stock,
            min_stock: product.min_stock,
            category: product.category_label(default_category).to_string(),
            base_price: Money::from_decimal(product.base_price),
            final_price: pricing::final_price(product),
            needs_restock: reorder::needs_restock(product),
            sellable: reorder::can_sell(product, 1),
        }
    }
}

// =============================================================================
// Wire Helpers
// =============================================================================

mod wire {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    use rust_decimal::Decimal;

    use super::TaxRate;
    use crate::money::parse_decimal;
    use crate::{STATS_LABEL_PLACEHOLDER, STATS_ZERO_PLACEHOLDER};

    /// A JSON scalar the backend may send as a number or a string.
    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum Scalar {
        Text(String),
        Number(serde_json::Number),
        Bool(bool),
        Null,
    }

    impl Scalar {
        pub(super) fn into_text(self) -> Option<String> {
            match self {
                Scalar::Text(s) => Some(s),
                Scalar::Number(n) => Some(n.to_string()),
                Scalar::Bool(b) => Some(b.to_string()),
                Scalar::Null => None,
            }
        }
    }

    pub(super) fn price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Scalar::deserialize(deserializer)?.into_text() else {
            return Ok(Decimal::ZERO);
        };
        let price = parse_decimal(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid decimal amount '{}'", text)))?;
        if price < Decimal::ZERO {
            return Err(D::Error::custom(format!(
                "amount must be non-negative, got '{}'",
                text
            )));
        }
        Ok(price)
    }

    pub(super) fn optional_tax_rate<'de, D>(deserializer: D) -> Result<Option<TaxRate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Scalar::deserialize(deserializer)?.into_text() {
            None => Ok(None),
            Some(text) => TaxRate::parse_fraction(&text).map(Some).ok_or_else(|| {
                D::Error::custom(format!("invalid non-negative tax rate '{}'", text))
            }),
        }
    }

    pub(super) fn text_or_zero<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Scalar::deserialize(deserializer)?
            .into_text()
            .unwrap_or_else(|| STATS_ZERO_PLACEHOLDER.to_string()))
    }

    pub(super) fn text_or_label<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Scalar::deserialize(deserializer)?
            .into_text()
            .unwrap_or_else(|| STATS_LABEL_PLACEHOLDER.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
