//! # Units & Quantities
//!
//! Unit-tagged decimal amounts and conversion between compatible units.
//!
//! ## Conversion Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Unit Classes                                       │
//! │                                                                         │
//! │  Weight:   Kilogram ──×1000──► Gram (base)                              │
//! │  Volume:   Liter    ──×1000──► Milliliter (base)                        │
//! │  Count:    Unit     ──► converts only to itself                         │
//! │                                                                         │
//! │  Cross-class conversion (e.g. grams → liters) always fails with         │
//! │  IncompatibleUnits. Conversion goes through the class base and the      │
//! │  result is rounded to 6 decimal places, half-up.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::QUANTITY_SCALE;

// =============================================================================
// Unit of Measurement
// =============================================================================

/// A unit of measurement for stock and recipe quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Gram,
    Kilogram,
    /// A countable piece (eggs, boxes, labels). Converts only to itself.
    Unit,
    Liter,
    Milliliter,
}

/// The measurement class a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitClass {
    Weight,
    Volume,
    Count,
}

impl Unit {
    /// Returns the measurement class of this unit.
    #[inline]
    pub fn class(&self) -> UnitClass {
        match self {
            Unit::Gram | Unit::Kilogram => UnitClass::Weight,
            Unit::Liter | Unit::Milliliter => UnitClass::Volume,
            Unit::Unit => UnitClass::Count,
        }
    }

    /// Checks whether a quantity in this unit can be converted to `other`.
    ///
    /// True iff the units are the same or share a class. Callers use this to
    /// pre-check before converting.
    #[inline]
    pub fn is_compatible_with(&self, other: Unit) -> bool {
        *self == other || self.class() == other.class()
    }

    /// Factor into the class base unit (grams for weight, milliliters for
    /// volume). The count class has no meaningful base beyond itself.
    fn base_factor(&self) -> Decimal {
        match self {
            Unit::Gram | Unit::Milliliter | Unit::Unit => Decimal::ONE,
            Unit::Kilogram | Unit::Liter => Decimal::ONE_THOUSAND,
        }
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// A strictly positive decimal amount tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    value: Decimal,
    unit: Unit,
}

impl Quantity {
    /// Creates a quantity. Fails with [`ValidationError::MustBePositive`]
    /// if the value is zero or negative.
    ///
    /// ## Example
    /// ```rust
    /// use artisan_core::{Quantity, Unit};
    /// use rust_decimal_macros::dec;
    ///
    /// let flour = Quantity::new(dec!(500), Unit::Gram).unwrap();
    /// assert_eq!(flour.value(), dec!(500));
    ///
    /// assert!(Quantity::new(dec!(0), Unit::Gram).is_err());
    /// ```
    pub fn new(value: Decimal, unit: Unit) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
        Ok(Quantity { value, unit })
    }

    /// The numeric amount.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// The unit the amount is expressed in.
    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Converts this quantity into `target`.
    ///
    /// ## Rules
    /// 1. Same unit: the quantity is returned unchanged (identity).
    /// 2. Different class, or either side is [`Unit::Unit`]: fails with
    ///    [`CoreError::IncompatibleUnits`].
    /// 3. Otherwise converts through the class base (grams / milliliters)
    ///    with a fixed factor of 1000, rounding the result to 6 decimal
    ///    places half-up.
    ///
    /// ## Example
    /// ```rust
    /// use artisan_core::{Quantity, Unit};
    /// use rust_decimal_macros::dec;
    ///
    /// let grams = Quantity::new(dec!(500), Unit::Gram).unwrap();
    /// let kilos = grams.convert_to(Unit::Kilogram).unwrap();
    /// assert_eq!(kilos.value(), dec!(0.500000));
    /// ```
    pub fn convert_to(self, target: Unit) -> CoreResult<Quantity> {
        if self.unit == target {
            return Ok(self);
        }
        if self.unit.class() != target.class() || self.unit.class() == UnitClass::Count {
            return Err(CoreError::IncompatibleUnits {
                from: self.unit,
                to: target,
            });
        }

        let in_base = self.value * self.unit.base_factor();
        let converted = (in_base / target.base_factor())
            .round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::MidpointAwayFromZero);

        Ok(Quantity {
            value: converted,
            unit: target,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
