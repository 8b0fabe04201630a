//! # Error Types
//!
//! Domain-specific error types for artisan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  artisan-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Application-service errors (external tier)                            │
//! │  └── translate CoreError into caller-facing responses                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → service tier → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts, units)
//! 3. Errors are enum variants, never String
//! 4. Fail fast and propagate; the core never retries or swallows an error

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::product::ProductKind;
use crate::unit::Unit;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages by the
/// application-service tier.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be resolved through the injected lookup.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Purchase or sale item cannot be found on its parent record.
    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    /// Operation is invalid for the product's kind.
    ///
    /// ## When This Occurs
    /// - Stock mutation attempted on a final product
    /// - Recipe or margin assignment attempted on a raw material
    /// - A raw material offered for sale
    #[error("Product {product} is {actual:?}, operation requires {expected:?}")]
    TypeMismatch {
        product: Uuid,
        expected: ProductKind,
        actual: ProductKind,
    },

    /// Insufficient stock to complete the adjustment.
    ///
    /// Stock is left unchanged when this error is returned.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: Uuid,
        available: Decimal,
        requested: Decimal,
    },

    /// The two units belong to different measurement classes.
    ///
    /// Weight units convert among themselves, volume units likewise, and
    /// `Unit::Unit` (countable pieces) converts only to itself.
    #[error("Cannot convert between {from:?} and {to:?}")]
    IncompatibleUnits { from: Unit, to: Unit },

    /// The product has no price entry in its history.
    #[error("No price recorded for product {0}")]
    MissingPrice(Uuid),

    /// The raw material is already listed in the recipe.
    #[error("Ingredient {0} is already in the recipe")]
    DuplicateIngredient(Uuid),

    /// The raw material is not listed in the recipe.
    #[error("Ingredient {0} is not in the recipe")]
    IngredientNotFound(Uuid),

    /// Sale pricing requires a recipe and the product has none.
    #[error("Product {0} has no recipe defined")]
    RecipeNotDefined(Uuid),

    /// Sale pricing requires a profit margin and the product has none.
    #[error("Product {0} has no profit margin defined")]
    MarginNotDefined(Uuid),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when an argument doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// An arithmetic operation would break the non-negativity invariant.
    #[error("{operation} would produce a negative amount")]
    NegativeResult { operation: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
