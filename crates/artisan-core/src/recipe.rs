//! # Recipe (Bill of Materials)
//!
//! An ordered list of raw-material quantities needed to produce one batch
//! (the yield quantity) of a final product, plus cost aggregation over an
//! injected price lookup.
//!
//! ## Costing Gap (deliberate)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total_cost() multiplies each ingredient's CURRENT PRICE by the         │
//! │  ingredient's raw quantity VALUE. No unit conversion happens between    │
//! │  the ingredient's recorded unit and the unit the price was quoted per.  │
//! │                                                                         │
//! │    price 26.55 per KILOGRAM, ingredient 200 GRAMS                       │
//! │    → contributes 200 × 26.55 = 5310.00   (not 0.2 × 26.55 = 5.31)       │
//! │                                                                         │
//! │  This literal arithmetic is the contract, not an oversight. The         │
//! │  conversion-aware path is the separate, opt-in total_cost_converted()   │
//! │  driven by Product::priced_per.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::lookup::ProductLookup;
use crate::money::Money;
use crate::product::{Product, ProductKind};
use crate::unit::Quantity;

// =============================================================================
// Recipe Ingredient
// =============================================================================

/// One raw-material line of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    raw_material_id: Uuid,
    quantity: Quantity,
}

impl RecipeIngredient {
    #[inline]
    pub fn raw_material_id(&self) -> Uuid {
        self.raw_material_id
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

// =============================================================================
// Recipe
// =============================================================================

/// Bill of materials for a final product.
///
/// Ingredient raw-material ids are unique within a recipe; the list keeps
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    id: Uuid,
    ingredients: Vec<RecipeIngredient>,
    yield_quantity: Quantity,
}

impl Recipe {
    /// Creates an empty recipe producing `yield_quantity` per batch.
    pub fn new(yield_quantity: Quantity) -> Self {
        Recipe {
            id: Uuid::new_v4(),
            ingredients: Vec::new(),
            yield_quantity,
        }
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn yield_quantity(&self) -> Quantity {
        self.yield_quantity
    }

    /// Ingredients in insertion order.
    pub fn ingredients(&self) -> &[RecipeIngredient] {
        &self.ingredients
    }

    /// Adds a raw material to the recipe.
    ///
    /// Fails with [`CoreError::TypeMismatch`] if the product is not a raw
    /// material and [`CoreError::DuplicateIngredient`] if it is already
    /// listed.
    pub fn add_ingredient(&mut self, raw_material: &Product, quantity: Quantity) -> CoreResult<()> {
        raw_material.require_kind(ProductKind::RawMaterial)?;

        if self
            .ingredients
            .iter()
            .any(|i| i.raw_material_id == raw_material.id())
        {
            return Err(CoreError::DuplicateIngredient(raw_material.id()));
        }

        self.ingredients.push(RecipeIngredient {
            raw_material_id: raw_material.id(),
            quantity,
        });
        Ok(())
    }

    /// Removes an ingredient by raw-material id, returning the removed line.
    pub fn remove_ingredient(&mut self, raw_material_id: Uuid) -> CoreResult<RecipeIngredient> {
        match self
            .ingredients
            .iter()
            .position(|i| i.raw_material_id == raw_material_id)
        {
            Some(index) => Ok(self.ingredients.remove(index)),
            None => Err(CoreError::IngredientNotFound(raw_material_id)),
        }
    }

    /// Aggregates the recipe cost over the injected lookup.
    ///
    /// For each ingredient: resolve the raw material
    /// ([`CoreError::ProductNotFound`] on a miss), take its current price
    /// ([`CoreError::MissingPrice`] when the history is empty), multiply by
    /// the ingredient's quantity value, accumulate. An empty ingredient list
    /// costs exactly [`Money::zero`].
    ///
    /// The quantity value is used literally, without converting between the
    /// ingredient's unit and whatever unit the price was quoted per. See the
    /// module docs; use [`Recipe::total_cost_converted`] to opt in to
    /// conversion.
    pub fn total_cost(&self, lookup: &impl ProductLookup) -> CoreResult<Money> {
        let mut total = Money::zero();
        for ingredient in &self.ingredients {
            let raw_material = lookup
                .find_by_id(ingredient.raw_material_id)
                .ok_or(CoreError::ProductNotFound(ingredient.raw_material_id))?;
            let price = raw_material
                .current_price()
                .ok_or(CoreError::MissingPrice(raw_material.id()))?;

            let line = price.value().multiply(ingredient.quantity.value())?;
            total = total.add(line);
        }
        Ok(total)
    }

    /// Conversion-aware cost aggregation (opt-in).
    ///
    /// Behaves like [`Recipe::total_cost`] except that, when a raw material
    /// declares the unit its prices are quoted per
    /// ([`Product::priced_per`]), the ingredient quantity is converted into
    /// that unit before multiplying. Raw materials without a declaration
    /// fall back to the literal arithmetic; incompatible units fail with
    /// [`CoreError::IncompatibleUnits`].
    pub fn total_cost_converted(&self, lookup: &impl ProductLookup) -> CoreResult<Money> {
        let mut total = Money::zero();
        for ingredient in &self.ingredients {
            let raw_material = lookup
                .find_by_id(ingredient.raw_material_id)
                .ok_or(CoreError::ProductNotFound(ingredient.raw_material_id))?;
            let price = raw_material
                .current_price()
                .ok_or(CoreError::MissingPrice(raw_material.id()))?;

            let quantity_value = match raw_material.priced_per() {
                Some(unit) => ingredient.quantity.convert_to(unit)?.value(),
                None => ingredient.quantity.value(),
            };

            let line = price.value().multiply(quantity_value)?;
            total = total.add(line);
        }
        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::InMemoryProducts;
    use crate::unit::Unit;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn money(v: Decimal) -> Money {
        Money::new(v).unwrap()
    }

    fn grams(v: Decimal) -> Quantity {
        Quantity::new(v, Unit::Gram).unwrap()
    }

    fn batch_of_one() -> Quantity {
        Quantity::new(dec!(1), Unit::Unit).unwrap()
    }

    #[test]
    fn test_only_raw_materials_can_be_ingredients() {
        let mut recipe = Recipe::new(batch_of_one());
        let croissant = Product::final_product("Croissant").unwrap();

        let err = recipe
            .add_ingredient(&croissant, grams(dec!(100)))
            .unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch { .. }));
        assert!(recipe.ingredients().is_empty());
    }

    #[test]
    fn test_duplicate_ingredient_rejected() {
        let mut recipe = Recipe::new(batch_of_one());
        let butter = Product::raw_material("Butter", dec!(10)).unwrap();

        recipe.add_ingredient(&butter, grams(dec!(100))).unwrap();
        let err = recipe
            .add_ingredient(&butter, grams(dec!(50)))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateIngredient(id) if id == butter.id()));
        assert_eq!(recipe.ingredients().len(), 1);
    }

    #[test]
    fn test_remove_ingredient() {
        let mut recipe = Recipe::new(batch_of_one());
        let butter = Product::raw_material("Butter", dec!(10)).unwrap();
        recipe.add_ingredient(&butter, grams(dec!(100))).unwrap();

        let removed = recipe.remove_ingredient(butter.id()).unwrap();
        assert_eq!(removed.raw_material_id(), butter.id());
        assert!(recipe.ingredients().is_empty());

        assert!(matches!(
            recipe.remove_ingredient(butter.id()),
            Err(CoreError::IngredientNotFound(_))
        ));
    }

    #[test]
    fn test_empty_recipe_costs_exactly_zero() {
        let recipe = Recipe::new(batch_of_one());
        let store = InMemoryProducts::new();
        assert_eq!(recipe.total_cost(&store).unwrap(), Money::zero());
    }

    /// The engine multiplies price by the raw quantity value with no unit
    /// conversion. Prices quoted per kilogram against gram quantities are
    /// taken literally. This asserts the as-implemented behavior, not the
    /// corrected one.
    #[test]
    fn test_total_cost_is_unit_blind() {
        let mut store = InMemoryProducts::new();

        let mut butter = Product::raw_material("Butter", dec!(10)).unwrap();
        butter.add_price(money(dec!(26.55))); // quoted per kg
        let butter_id = store.insert(butter);

        let mut sugar = Product::raw_material("Sugar", dec!(10)).unwrap();
        sugar.add_price(money(dec!(5.00))); // quoted per kg
        let sugar_id = store.insert(sugar);

        let mut recipe = Recipe::new(batch_of_one());
        recipe
            .add_ingredient(store.find_by_id(butter_id).unwrap(), grams(dec!(200)))
            .unwrap();
        recipe
            .add_ingredient(store.find_by_id(sugar_id).unwrap(), grams(dec!(150)))
            .unwrap();

        // 200 × 26.55 + 150 × 5.00 = 5310.00 + 750.00
        let cost = recipe.total_cost(&store).unwrap();
        assert_eq!(cost.value(), dec!(6060.00));
    }

    #[test]
    fn test_total_cost_converted_respects_priced_per() {
        let mut store = InMemoryProducts::new();

        let mut butter = Product::raw_material("Butter", dec!(10)).unwrap();
        butter.add_price(money(dec!(26.55)));
        butter.set_priced_per(Some(Unit::Kilogram)).unwrap();
        let butter_id = store.insert(butter);

        let mut sugar = Product::raw_material("Sugar", dec!(10)).unwrap();
        sugar.add_price(money(dec!(5.00)));
        sugar.set_priced_per(Some(Unit::Kilogram)).unwrap();
        let sugar_id = store.insert(sugar);

        let mut recipe = Recipe::new(batch_of_one());
        recipe
            .add_ingredient(store.find_by_id(butter_id).unwrap(), grams(dec!(200)))
            .unwrap();
        recipe
            .add_ingredient(store.find_by_id(sugar_id).unwrap(), grams(dec!(150)))
            .unwrap();

        // 0.2 × 26.55 + 0.15 × 5.00 = 5.31 + 0.75
        let cost = recipe.total_cost_converted(&store).unwrap();
        assert_eq!(cost.value(), dec!(6.06));
    }

    #[test]
    fn test_total_cost_converted_without_declaration_falls_back_to_literal() {
        let mut store = InMemoryProducts::new();

        let mut butter = Product::raw_material("Butter", dec!(10)).unwrap();
        butter.add_price(money(dec!(26.55)));
        let butter_id = store.insert(butter);

        let mut recipe = Recipe::new(batch_of_one());
        recipe
            .add_ingredient(store.find_by_id(butter_id).unwrap(), grams(dec!(200)))
            .unwrap();

        assert_eq!(
            recipe.total_cost_converted(&store).unwrap().value(),
            dec!(5310.00)
        );
    }

    #[test]
    fn test_total_cost_converted_incompatible_units_fail() {
        let mut store = InMemoryProducts::new();

        let mut milk = Product::raw_material("Milk", dec!(10)).unwrap();
        milk.add_price(money(dec!(4.20)));
        milk.set_priced_per(Some(Unit::Liter)).unwrap();
        let milk_id = store.insert(milk);

        let mut recipe = Recipe::new(batch_of_one());
        recipe
            .add_ingredient(store.find_by_id(milk_id).unwrap(), grams(dec!(200)))
            .unwrap();

        assert!(matches!(
            recipe.total_cost_converted(&store).unwrap_err(),
            CoreError::IncompatibleUnits { .. }
        ));
    }

    #[test]
    fn test_missing_product_and_missing_price() {
        let mut store = InMemoryProducts::new();

        let butter = Product::raw_material("Butter", dec!(10)).unwrap();
        let mut recipe = Recipe::new(batch_of_one());
        recipe.add_ingredient(&butter, grams(dec!(100))).unwrap();

        // Butter never inserted into the store
        assert!(matches!(
            recipe.total_cost(&store).unwrap_err(),
            CoreError::ProductNotFound(_)
        ));

        // Inserted but without any price entry
        store.insert(butter);
        assert!(matches!(
            recipe.total_cost(&store).unwrap_err(),
            CoreError::MissingPrice(_)
        ));
    }
}
