//! # Purchase Stock Engine
//!
//! Purchases bring raw materials into stock; every item mutation carries a
//! matching stock adjustment, and removal/deletion compensates it.
//!
//! ## Stock Effects
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_item(qty)        → raw material stock += qty                       │
//! │  remove_item(item)    → raw material stock -= item.qty                  │
//! │  delete(purchase)     → stock -= qty for EVERY item, in list order,     │
//! │                         then the record is dropped                      │
//! │                                                                         │
//! │  NOT ATOMIC: each adjustment is a separate call into the product's      │
//! │  guarded stock operation. A failure partway through delete() leaves     │
//! │  earlier items reverted and later ones not. The caller's transaction    │
//! │  boundary is what makes the composite all-or-nothing.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::lookup::ProductStore;
use crate::money::Money;
use crate::unit::Quantity;

// =============================================================================
// Purchase Item
// =============================================================================

/// One raw-material line of a purchase.
///
/// The subtotal is computed once at construction
/// (`quantity.value × unit_cost`) and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseItem {
    id: Uuid,
    raw_material_id: Uuid,
    quantity: Quantity,
    unit_cost: Money,
    subtotal: Money,
}

impl PurchaseItem {
    fn new(raw_material_id: Uuid, quantity: Quantity, unit_cost: Money) -> CoreResult<Self> {
        let subtotal = unit_cost.multiply(quantity.value())?;
        Ok(PurchaseItem {
            id: Uuid::new_v4(),
            raw_material_id,
            quantity,
            unit_cost,
            subtotal,
        })
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn raw_material_id(&self) -> Uuid {
        self.raw_material_id
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[inline]
    pub fn unit_cost(&self) -> Money {
        self.unit_cost
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A supplier purchase and its item list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    id: Uuid,
    supplier_id: Uuid,
    date: DateTime<Utc>,
    items: Vec<PurchaseItem>,
}

impl Purchase {
    pub fn new(supplier_id: Uuid, date: DateTime<Utc>) -> Self {
        Purchase {
            id: Uuid::new_v4(),
            supplier_id,
            date,
            items: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn supplier_id(&self) -> Uuid {
        self.supplier_id
    }

    #[inline]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[PurchaseItem] {
        &self.items
    }

    /// Sum of item subtotals.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, item| acc.add(item.subtotal))
    }

    /// Adds an item and increases the raw material's stock by its quantity.
    ///
    /// The stock adjustment goes through the product's guarded operation, so
    /// referencing a final product fails with [`CoreError::TypeMismatch`]
    /// and nothing is appended.
    pub fn add_item(
        &mut self,
        store: &mut impl ProductStore,
        raw_material_id: Uuid,
        quantity: Quantity,
        unit_cost: Money,
    ) -> CoreResult<Uuid> {
        let item = PurchaseItem::new(raw_material_id, quantity, unit_cost)?;

        let product = store
            .find_by_id_mut(raw_material_id)
            .ok_or(CoreError::ProductNotFound(raw_material_id))?;
        product.increase_stock(quantity.value())?;

        debug!(
            purchase = %self.id,
            item = %item.id,
            raw_material = %raw_material_id,
            quantity = %quantity.value(),
            "purchase item added"
        );

        let item_id = item.id;
        self.items.push(item);
        Ok(item_id)
    }

    /// Removes an item and compensates by decreasing the raw material's
    /// stock by the removed quantity.
    ///
    /// If the compensating decrease fails (the stock was already consumed
    /// elsewhere), the item stays on the purchase and the error propagates.
    pub fn remove_item(
        &mut self,
        store: &mut impl ProductStore,
        item_id: Uuid,
    ) -> CoreResult<PurchaseItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(CoreError::ItemNotFound(item_id))?;

        let item = self.items[index];
        let product = store
            .find_by_id_mut(item.raw_material_id)
            .ok_or(CoreError::ProductNotFound(item.raw_material_id))?;
        product.decrease_stock(item.quantity.value())?;

        debug!(
            purchase = %self.id,
            item = %item_id,
            raw_material = %item.raw_material_id,
            quantity = %item.quantity.value(),
            "purchase item removed, stock compensated"
        );

        Ok(self.items.remove(index))
    }

    /// Deletes the purchase, reverting every item's stock effect in list
    /// order before the record is dropped.
    ///
    /// Not all-or-nothing: a failure partway leaves earlier items already
    /// reverted. The error propagates so the caller's transaction boundary
    /// can roll the composite back.
    pub fn delete(self, store: &mut impl ProductStore) -> CoreResult<()> {
        for (position, item) in self.items.iter().enumerate() {
            let product = store
                .find_by_id_mut(item.raw_material_id)
                .ok_or(CoreError::ProductNotFound(item.raw_material_id))?;

            if let Err(err) = product.decrease_stock(item.quantity.value()) {
                warn!(
                    purchase = %self.id,
                    item = %item.id,
                    reverted_items = position,
                    "purchase delete failed partway, earlier reversals already applied"
                );
                return Err(err);
            }
        }

        debug!(purchase = %self.id, items = self.items.len(), "purchase deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{InMemoryProducts, ProductLookup};
    use crate::product::Product;
    use crate::unit::Unit;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn money(v: Decimal) -> Money {
        Money::new(v).unwrap()
    }

    fn kilos(v: Decimal) -> Quantity {
        Quantity::new(v, Unit::Kilogram).unwrap()
    }

    fn store_with(name: &str, stock: Decimal) -> (InMemoryProducts, Uuid) {
        let mut store = InMemoryProducts::new();
        let id = store.insert(Product::raw_material(name, stock).unwrap());
        (store, id)
    }

    #[test]
    fn test_add_item_computes_subtotal_once_and_increases_stock() {
        let (mut store, flour_id) = store_with("Flour", dec!(10));
        let mut purchase = Purchase::new(Uuid::new_v4(), Utc::now());

        let item_id = purchase
            .add_item(&mut store, flour_id, kilos(dec!(25)), money(dec!(3.20)))
            .unwrap();

        let item = &purchase.items()[0];
        assert_eq!(item.id(), item_id);
        assert_eq!(item.subtotal().value(), dec!(80.00));
        assert_eq!(purchase.total().value(), dec!(80.00));
        assert_eq!(store.find_by_id(flour_id).unwrap().stock(), dec!(35));
    }

    #[test]
    fn test_add_item_rejects_final_products() {
        let mut store = InMemoryProducts::new();
        let croissant_id = store.insert(Product::final_product("Croissant").unwrap());
        let mut purchase = Purchase::new(Uuid::new_v4(), Utc::now());

        let err = purchase
            .add_item(&mut store, croissant_id, kilos(dec!(1)), money(dec!(1)))
            .unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch { .. }));
        assert!(purchase.items().is_empty());
    }

    #[test]
    fn test_add_item_unknown_product() {
        let mut store = InMemoryProducts::new();
        let mut purchase = Purchase::new(Uuid::new_v4(), Utc::now());

        assert!(matches!(
            purchase
                .add_item(&mut store, Uuid::new_v4(), kilos(dec!(1)), money(dec!(1)))
                .unwrap_err(),
            CoreError::ProductNotFound(_)
        ));
    }

    #[test]
    fn test_add_then_remove_restores_stock() {
        let (mut store, flour_id) = store_with("Flour", dec!(10));
        let mut purchase = Purchase::new(Uuid::new_v4(), Utc::now());

        let item_id = purchase
            .add_item(&mut store, flour_id, kilos(dec!(25)), money(dec!(3.20)))
            .unwrap();
        assert_eq!(store.find_by_id(flour_id).unwrap().stock(), dec!(35));

        let removed = purchase.remove_item(&mut store, item_id).unwrap();
        assert_eq!(removed.quantity().value(), dec!(25));
        assert!(purchase.items().is_empty());
        assert_eq!(store.find_by_id(flour_id).unwrap().stock(), dec!(10));
    }

    #[test]
    fn test_remove_unknown_item() {
        let (mut store, _) = store_with("Flour", dec!(10));
        let mut purchase = Purchase::new(Uuid::new_v4(), Utc::now());

        assert!(matches!(
            purchase.remove_item(&mut store, Uuid::new_v4()).unwrap_err(),
            CoreError::ItemNotFound(_)
        ));
    }

    #[test]
    fn test_remove_item_keeps_item_when_compensation_fails() {
        let (mut store, flour_id) = store_with("Flour", dec!(0));
        let mut purchase = Purchase::new(Uuid::new_v4(), Utc::now());

        let item_id = purchase
            .add_item(&mut store, flour_id, kilos(dec!(5)), money(dec!(3.20)))
            .unwrap();

        // Stock consumed elsewhere between add and remove
        store
            .find_by_id_mut(flour_id)
            .unwrap()
            .decrease_stock(dec!(4))
            .unwrap();

        let err = purchase.remove_item(&mut store, item_id).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(purchase.items().len(), 1);
        assert_eq!(store.find_by_id(flour_id).unwrap().stock(), dec!(1));
    }

    #[test]
    fn test_delete_reverts_all_items_in_order() {
        let mut store = InMemoryProducts::new();
        let flour_id = store.insert(Product::raw_material("Flour", dec!(0)).unwrap());
        let sugar_id = store.insert(Product::raw_material("Sugar", dec!(0)).unwrap());

        let mut purchase = Purchase::new(Uuid::new_v4(), Utc::now());
        purchase
            .add_item(&mut store, flour_id, kilos(dec!(25)), money(dec!(3.20)))
            .unwrap();
        purchase
            .add_item(&mut store, sugar_id, kilos(dec!(10)), money(dec!(4.10)))
            .unwrap();

        purchase.delete(&mut store).unwrap();

        assert_eq!(store.find_by_id(flour_id).unwrap().stock(), Decimal::ZERO);
        assert_eq!(store.find_by_id(sugar_id).unwrap().stock(), Decimal::ZERO);
    }

    /// The delete path is deliberately not all-or-nothing: when a later
    /// item's reversal fails, earlier reversals stay applied.
    #[test]
    fn test_delete_partial_failure_leaves_mid_state() {
        let mut store = InMemoryProducts::new();
        let flour_id = store.insert(Product::raw_material("Flour", dec!(0)).unwrap());
        let sugar_id = store.insert(Product::raw_material("Sugar", dec!(0)).unwrap());

        let mut purchase = Purchase::new(Uuid::new_v4(), Utc::now());
        purchase
            .add_item(&mut store, flour_id, kilos(dec!(25)), money(dec!(3.20)))
            .unwrap();
        purchase
            .add_item(&mut store, sugar_id, kilos(dec!(10)), money(dec!(4.10)))
            .unwrap();

        // Sugar stock consumed elsewhere: its reversal will fail
        store
            .find_by_id_mut(sugar_id)
            .unwrap()
            .decrease_stock(dec!(8))
            .unwrap();

        let err = purchase.delete(&mut store).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));

        // Flour (first in list order) was reverted, sugar was not
        assert_eq!(store.find_by_id(flour_id).unwrap().stock(), Decimal::ZERO);
        assert_eq!(store.find_by_id(sugar_id).unwrap().stock(), dec!(2));
    }
}
