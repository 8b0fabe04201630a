//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: fixed-scale Decimal                                      │
//! │    Every Money value is held at exactly 2 decimal places,               │
//! │    rounded half-up, and is never negative. Every arithmetic             │
//! │    operation reapplies both invariants before returning.                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use artisan_core::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::new(dec!(10.99)).unwrap();
//! let total = price.multiply(dec!(3)).unwrap();
//! assert_eq!(total.value(), dec!(32.97));
//!
//! // Subtraction below zero is rejected, not clamped:
//! assert!(Money::zero().subtract(price).is_err());
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::MONEY_SCALE;

// =============================================================================
// Money Type
// =============================================================================

/// A non-negative monetary value held at 2 decimal places.
///
/// ## Design Decisions
/// - **Decimal (not float)**: exact arithmetic for anything a customer pays
/// - **Half-up rounding**: applied on construction and after every operation
/// - **Non-negative**: operations that would go below zero fail with
///   [`ValidationError::NegativeResult`] instead of clamping silently
///
/// Formatting for receipts or UI is a presentation concern outside the core;
/// the [`fmt::Display`] impl is for debugging.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value, rounding to 2 decimal places half-up.
    ///
    /// ## Example
    /// ```rust
    /// use artisan_core::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Money::new(dec!(10.995)).unwrap();
    /// assert_eq!(price.value(), dec!(11.00));
    ///
    /// assert!(Money::new(dec!(-1)).is_err());
    /// ```
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::MustBeNonNegative {
                field: "amount".to_string(),
            });
        }
        Ok(Money(round_currency(value)))
    }

    /// Zero money value.
    #[inline]
    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount (scale 2).
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds two Money values.
    ///
    /// Cannot fail: the sum of two non-negative scale-2 values stays
    /// non-negative, and the rounding invariant is reapplied anyway.
    #[must_use]
    pub fn add(&self, other: Money) -> Money {
        Money(round_currency(self.0 + other.0))
    }

    /// Subtracts another Money value.
    ///
    /// Fails with [`ValidationError::NegativeResult`] if the result would be
    /// negative. The operands are unchanged on failure.
    pub fn subtract(&self, other: Money) -> Result<Money, ValidationError> {
        let result = self.0 - other.0;
        if result.is_sign_negative() && !result.is_zero() {
            return Err(ValidationError::NegativeResult {
                operation: "subtract".to_string(),
            });
        }
        Ok(Money(round_currency(result)))
    }

    /// Multiplies by a decimal factor (quantity, margin factor, ...).
    ///
    /// ## Example
    /// ```rust
    /// use artisan_core::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let unit_cost = Money::new(dec!(26.55)).unwrap();
    /// let line = unit_cost.multiply(dec!(200)).unwrap();
    /// assert_eq!(line.value(), dec!(5310.00));
    /// ```
    pub fn multiply(&self, factor: Decimal) -> Result<Money, ValidationError> {
        if factor.is_sign_negative() && !factor.is_zero() {
            return Err(ValidationError::MustBeNonNegative {
                field: "factor".to_string(),
            });
        }
        Ok(Money(round_currency(self.0 * factor)))
    }
}

/// Rounds to the currency scale, half-up.
///
/// Values in this module are non-negative, so midpoint-away-from-zero is
/// exactly half-up.
fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Receipt/UI formatting belongs to the presentation
/// tier, which also handles localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
