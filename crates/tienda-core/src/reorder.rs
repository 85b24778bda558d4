//! # Reorder Signal
//!
//! Display-only stock indicators. Actual purchase orders are created by the
//! backend after each sale; nothing here triggers an action.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Product;

/// True when stock is at or below the product's minimum threshold.
#[inline]
pub fn needs_restock(product: &Product) -> bool {
    product.stock <= product.min_stock
}

/// True when `quantity` units could be sold from the displayed stock.
///
/// This is the bound the UI uses to enable the sell action; the backend
/// remains the authority.
pub fn can_sell(product: &Product, quantity: i64) -> bool {
    check_sellable(product, quantity).is_ok()
}

/// Like [`can_sell`], but says why a sale cannot go ahead.
pub fn check_sellable(product: &Product, quantity: i64) -> CoreResult<()> {
    if product.stock == 0 {
        return Err(CoreError::OutOfStock {
            product: product.name.clone(),
        });
    }
    if quantity <= 0 {
        return Err(CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }));
    }
    if quantity > product.stock as i64 {
        return Err(CoreError::InsufficientStock {
            product: product.name.clone(),
            available: product.stock,
            requested: quantity,
        });
    }
    Ok(())
}
