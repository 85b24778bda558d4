//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    (1.005 * 100).toFixed(0) = "100"   ❌ WRONG!                         │
//! │                                                                         │
//! │  OUR SOLUTION: Exact decimals in, integer cents out                     │
//! │    "1.005" is decoded as an exact Decimal, rounded once → 101 cents     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend sends prices and tax rates as decimal numbers. They are decoded
//! exactly with [`parse_decimal`] and only become cents through
//! [`Money::from_decimal`], after all arithmetic on them is done.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.base_price (Decimal) ──► pricing::final_price ──► CatalogRow.final_price
///                                                                  │
///                                                                  └──► "$119.00" in UI
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an exact amount to the cent, half away from zero.
    ///
    /// This is the only place a decimal amount loses precision. Amounts
    /// outside the `i64` cent range saturate.
    ///
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tienda_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(Decimal::new(1005, 3)).cents(), 101);
    /// assert_eq!(Money::from_decimal(Decimal::new(1506, 3)).cents(), 151);
    /// ```
    pub fn from_decimal(amount: Decimal) -> Self {
        let cents = amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.to_i64());
        match cents {
            Some(cents) => Money(cents),
            None if amount.is_sign_negative() => Money(i64::MIN),
            None => Money(i64::MAX),
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Formats the amount as a plain decimal ("119.00") without a symbol.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Decimal Parsing
// =============================================================================

/// Parses backend decimal text into an exact [`Decimal`].
///
/// Accepts plain decimals (`"12"`, `"12.5"`, `"-0.19"`) and the exponent form
/// JSON numbers are printed in once they get small enough (`"5e-5"`). Nothing
/// is rounded: text with more precision than a `Decimal` holds is rejected,
/// and so are separators and anything else that is not a number.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use tienda_core::money::parse_decimal;
///
/// assert_eq!(parse_decimal("0.19"), Some(Decimal::new(19, 2)));
/// assert_eq!(parse_decimal("5e-5"), Some(Decimal::new(5, 5)));
/// assert_eq!(parse_decimal("1,5"), None);
/// ```
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty()
        || !text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
    {
        return None;
    }

    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str_exact(text).ok()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a dollar sign ("$119.00").
///
/// The dashboard renders its own configured symbol via
/// [`Money::to_decimal_string`]; this impl is for logs and debugging.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(11900).to_decimal_string(), "119.00");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
    }

    #[test]
    fn test_from_decimal_rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(Decimal::new(100, 0)).cents(), 10000);
        assert_eq!(Money::from_decimal(Decimal::new(2344, 3)).cents(), 234);
        assert_eq!(Money::from_decimal(Decimal::new(2345, 3)).cents(), 235);
        assert_eq!(Money::from_decimal(Decimal::new(100005, 5)).cents(), 100);
        assert_eq!(Money::from_decimal(Decimal::new(-2345, 3)).cents(), -235);
    }

    #[test]
    fn test_from_decimal_saturates() {
        assert_eq!(Money::from_decimal(Decimal::MAX).cents(), i64::MAX);
        assert_eq!(Money::from_decimal(Decimal::MIN).cents(), i64::MIN);
    }

    #[test]
    fn test_parse_decimal_is_exact() {
        assert_eq!(parse_decimal("100"), Some(Decimal::new(100, 0)));
        assert_eq!(parse_decimal("100.0"), Some(Decimal::new(100, 0)));
        assert_eq!(parse_decimal("1.004"), Some(Decimal::new(1004, 3)));
        assert_eq!(parse_decimal("0.00005"), Some(Decimal::new(5, 5)));
        assert_eq!(parse_decimal(" 19.99 "), Some(Decimal::new(1999, 2)));
        assert_eq!(parse_decimal("-5.5"), Some(Decimal::new(-55, 1)));
    }

    #[test]
    fn test_parse_decimal_accepts_exponent_form() {
        assert_eq!(parse_decimal("5e-5"), Some(Decimal::new(5, 5)));
        assert_eq!(parse_decimal("1.5E2"), Some(Decimal::new(150, 0)));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(parse_decimal("").is_none());
        assert!(parse_decimal("-").is_none());
        assert!(parse_decimal(".").is_none());
        assert!(parse_decimal("1,5").is_none());
        assert!(parse_decimal("1_000").is_none());
        assert!(parse_decimal("12.3.4").is_none());
        assert!(parse_decimal("abc").is_none());
        assert!(parse_decimal("99999999999999999999999999999999").is_none());
    }
}
