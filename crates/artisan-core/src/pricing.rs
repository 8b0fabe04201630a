//! # Margin-Based Sale Pricing
//!
//! Derives a final product's sale price from its recipe cost and its profit
//! margin: `sale price = recipe cost × (1 + margin)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::lookup::ProductLookup;
use crate::money::Money;
use crate::product::{Product, ProductKind};

// =============================================================================
// Profit Margin
// =============================================================================

/// A non-negative profit margin expressed as a decimal fraction
/// (`0.20` = 20%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitMargin(Decimal);

impl ProfitMargin {
    /// Creates a margin. Negative fractions are rejected.
    pub fn new(fraction: Decimal) -> Result<Self, ValidationError> {
        if fraction.is_sign_negative() && !fraction.is_zero() {
            return Err(ValidationError::MustBeNonNegative {
                field: "margin".to_string(),
            });
        }
        Ok(ProfitMargin(fraction))
    }

    /// The margin fraction.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The multiplier applied to cost: `1 + margin`.
    #[inline]
    pub fn factor(&self) -> Decimal {
        Decimal::ONE + self.0
    }
}

// =============================================================================
// Sale Price Derivation
// =============================================================================

/// Computes the sale price of a final product.
///
/// ## Requirements
/// - the product must be a [`ProductKind::FinalProduct`]
///   ([`CoreError::TypeMismatch`] otherwise)
/// - a recipe must be defined ([`CoreError::RecipeNotDefined`])
/// - a profit margin must be defined ([`CoreError::MarginNotDefined`])
///
/// The recipe cost is aggregated through the injected `lookup` (see
/// [`crate::recipe::Recipe::total_cost`], including its documented
/// unit-blindness) and multiplied by `1 + margin`.
///
/// ## Example
/// ```rust
/// use artisan_core::{
///     compute_sale_price, InMemoryProducts, Money, Product, ProductLookup, ProfitMargin,
///     Quantity, Recipe, Unit,
/// };
/// use rust_decimal_macros::dec;
///
/// let mut store = InMemoryProducts::new();
/// let mut butter = Product::raw_material("Butter", dec!(10)).unwrap();
/// butter.add_price(Money::new(dec!(2.00)).unwrap());
/// let butter_id = store.insert(butter);
///
/// let mut recipe = Recipe::new(Quantity::new(dec!(1), Unit::Unit).unwrap());
/// recipe
///     .add_ingredient(
///         store.find_by_id(butter_id).unwrap(),
///         Quantity::new(dec!(5), Unit::Unit).unwrap(),
///     )
///     .unwrap();
///
/// let mut croissant = Product::final_product("Croissant").unwrap();
/// croissant.define_recipe(recipe).unwrap();
/// croissant
///     .define_profit_margin(Some(ProfitMargin::new(dec!(0.50)).unwrap()))
///     .unwrap();
///
/// // cost 10.00, margin 50% → 15.00
/// let price = compute_sale_price(&croissant, &store).unwrap();
/// assert_eq!(price.value(), dec!(15.00));
/// ```
pub fn compute_sale_price(product: &Product, lookup: &impl ProductLookup) -> CoreResult<Money> {
    product.require_kind(ProductKind::FinalProduct)?;

    let recipe = product
        .recipe()
        .ok_or(CoreError::RecipeNotDefined(product.id()))?;
    let margin = product
        .margin()
        .ok_or(CoreError::MarginNotDefined(product.id()))?;

    let cost = recipe.total_cost(lookup)?;
    Ok(cost.multiply(margin.factor())?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::InMemoryProducts;
    use crate::recipe::Recipe;
    use crate::unit::{Quantity, Unit};
    use rust_decimal_macros::dec;

    fn batch_of_one() -> Quantity {
        Quantity::new(dec!(1), Unit::Unit).unwrap()
    }

    #[test]
    fn test_margin_rejects_negative() {
        assert!(ProfitMargin::new(dec!(-0.1)).is_err());
        assert_eq!(ProfitMargin::new(dec!(0)).unwrap().factor(), dec!(1));
        assert_eq!(ProfitMargin::new(dec!(0.35)).unwrap().factor(), dec!(1.35));
    }

    #[test]
    fn test_sale_price_requires_final_product() {
        let store = InMemoryProducts::new();
        let butter = Product::raw_material("Butter", dec!(1)).unwrap();
        assert!(matches!(
            compute_sale_price(&butter, &store).unwrap_err(),
            CoreError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_sale_price_requires_recipe_and_margin() {
        let store = InMemoryProducts::new();

        // No recipe: error, never a silent zero
        let mut croissant = Product::final_product("Croissant").unwrap();
        assert!(matches!(
            compute_sale_price(&croissant, &store).unwrap_err(),
            CoreError::RecipeNotDefined(_)
        ));

        // Recipe but no margin
        croissant.define_recipe(Recipe::new(batch_of_one())).unwrap();
        assert!(matches!(
            compute_sale_price(&croissant, &store).unwrap_err(),
            CoreError::MarginNotDefined(_)
        ));
    }

    #[test]
    fn test_sale_price_applies_margin_to_recipe_cost() {
        let mut store = InMemoryProducts::new();

        let mut butter = Product::raw_material("Butter", dec!(10)).unwrap();
        butter.add_price(Money::new(dec!(4.00)).unwrap());
        let butter_id = store.insert(butter);

        let mut recipe = Recipe::new(batch_of_one());
        recipe
            .add_ingredient(
                store.find_by_id(butter_id).unwrap(),
                Quantity::new(dec!(3), Unit::Unit).unwrap(),
            )
            .unwrap();

        let mut croissant = Product::final_product("Croissant").unwrap();
        croissant.define_recipe(recipe).unwrap();
        croissant
            .define_profit_margin(Some(ProfitMargin::new(dec!(0.20)).unwrap()))
            .unwrap();

        // cost 12.00 × 1.20 = 14.40
        let price = compute_sale_price(&croissant, &store).unwrap();
        assert_eq!(price.value(), dec!(14.40));
    }

    #[test]
    fn test_zero_margin_sells_at_cost() {
        let mut store = InMemoryProducts::new();

        let mut butter = Product::raw_material("Butter", dec!(10)).unwrap();
        butter.add_price(Money::new(dec!(4.00)).unwrap());
        let butter_id = store.insert(butter);

        let mut recipe = Recipe::new(batch_of_one());
        recipe
            .add_ingredient(
                store.find_by_id(butter_id).unwrap(),
                Quantity::new(dec!(2), Unit::Unit).unwrap(),
            )
            .unwrap();

        let mut croissant = Product::final_product("Croissant").unwrap();
        croissant.define_recipe(recipe).unwrap();
        croissant
            .define_profit_margin(Some(ProfitMargin::new(dec!(0)).unwrap()))
            .unwrap();

        assert_eq!(
            compute_sale_price(&croissant, &store).unwrap().value(),
            dec!(8.00)
        );
    }
}
