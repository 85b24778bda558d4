//! # Pricing
//!
//! Tax-inclusive display price for a product.
//!
//! ```text
//! base_price ──┐   (exact)
//!              ├──► base × (1 + rate) ──► round half up to cents, once ──► final price
//! category ────┘   (rate = 0 without a category or rate)
//! ```

use rust_decimal::Decimal;

use crate::money::Money;
use crate::types::Product;

/// Computes the tax-inclusive price shown next to the base price.
///
/// The product is multiplied out on the exact decoded values; the only
/// rounding is the final one to the cent, half up. A product without a
/// category, or whose category has no rate, is priced at its base price.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use tienda_core::{final_price, Product, RecordId};
///
/// let product = Product {
///     id: RecordId::from(1),
///     name: "Bolsa".into(),
///     stock: 10,
///     min_stock: 2,
///     base_price: Decimal::new(5000, 2),
///     category: None,
/// };
/// assert_eq!(final_price(&product).cents(), 5000);
/// ```
pub fn final_price(product: &Product) -> Money {
    let gross = Decimal::ONE
        .checked_add(product.tax_rate().fraction())
        .and_then(|factor| product.base_price.checked_mul(factor))
        .unwrap_or(Decimal::MAX);
    Money::from_decimal(gross)
}
