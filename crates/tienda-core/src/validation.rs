//! # Validation Module
//!
//! Local checks on a proposed sale. A request that fails here never reaches
//! the network.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard UI                                                 │
//! │  └── Sell action disabled when quantity > stock or stock == 0          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── quantity must be a positive integer, product id present           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── stock availability, product existence (business rules)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{ProductId, SaleRequest};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest quantity the backend accepts; `cantidad` is a 32-bit signed int there.
pub const MAX_SALE_QUANTITY: u32 = i32::MAX as u32;

/// Validates a sale quantity and narrows it to the wire type.
///
/// ```rust
/// use tienda_core::validation::validate_quantity;
///
/// assert_eq!(validate_quantity(2).unwrap(), 2);
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-3).is_err());
/// assert!(validate_quantity(i32::MAX as i64 + 1).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<u32> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(quantity)
        .ok()
        .filter(|q| *q <= MAX_SALE_QUANTITY)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_SALE_QUANTITY as i64,
        })
}

/// Validates a product identifier.
pub fn validate_product_id(id: &ProductId) -> ValidationResult<()> {
    if id.is_blank() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }
    Ok(())
}

/// Builds a [`SaleRequest`] from raw operator input.
pub fn validate_sale(product_id: &ProductId, quantity: i64) -> ValidationResult<SaleRequest> {
    validate_product_id(product_id)?;
    let quantity = validate_quantity(quantity)?;
    Ok(SaleRequest {
        product_id: product_id.clone(),
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordId;

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(1).unwrap(), 1);
        assert_eq!(validate_quantity(999).unwrap(), 999);

        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_quantity(-3).is_err());
        assert!(matches!(
            validate_quantity(i64::MAX),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_quantity_fits_backend_int() {
        assert_eq!(validate_quantity(i32::MAX as i64).unwrap(), i32::MAX as u32);

        let err = validate_quantity(i32::MAX as i64 + 1).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: i32::MAX as i64,
            }
        );
        assert!(validate_quantity(u32::MAX as i64).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id(&RecordId::from(7)).is_ok());
        assert!(validate_product_id(&RecordId::new("   ")).is_err());
    }

    #[test]
    fn test_validate_sale() {
        let request = validate_sale(&RecordId::from(7), 2).unwrap();
        assert_eq!(request.product_id.as_str(), "7");
        assert_eq!(request.quantity, 2);

        assert!(validate_sale(&RecordId::from(7), 0).is_err());
        assert!(validate_sale(&RecordId::new(""), 2).is_err());
    }
}
