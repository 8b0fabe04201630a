//! # Sale Engine
//!
//! Sales of final products: price freezing at insertion time and running
//! total maintenance.
//!
//! ## Price Freezing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_item() copies the product's CURRENT price into the item.           │
//! │  Later price changes never touch existing sale items.                   │
//! │                                                                         │
//! │    product price: 12.00 ──► SaleItem.unit_price = 12.00 (frozen)        │
//! │    product price: 14.00 ──► existing item still 12.00                   │
//! │                                                                         │
//! │  The running total is recomputed from item subtotals after every        │
//! │  add and remove.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Bookkeeping (caller-owned)
//! Final products carry no stock in this crate: they are made to order, the
//! Product aggregate pins their stock at zero, and the guarded stock
//! operations reject them. Any sale-side stock figure therefore lives in the
//! caller layer, which checks and adjusts it around item add/remove. This
//! engine only freezes prices and maintains totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::{Product, ProductKind};
use crate::unit::Quantity;

// =============================================================================
// Sale Item
// =============================================================================

/// One final-product line of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    id: Uuid,
    product_id: Uuid,
    quantity: Quantity,
    /// Unit price frozen from the product's current price at insertion.
    unit_price: Money,
    subtotal: Money,
}

impl SaleItem {
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A client sale, its item list, and the running total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    id: Uuid,
    client_id: Uuid,
    date: DateTime<Utc>,
    items: Vec<SaleItem>,
    total: Money,
}

impl Sale {
    pub fn new(client_id: Uuid, date: DateTime<Utc>) -> Self {
        Sale {
            id: Uuid::new_v4(),
            client_id,
            date,
            items: Vec::new(),
            total: Money::zero(),
        }
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    #[inline]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    /// The running total, kept in sync by add/remove.
    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    /// Adds a final product to the sale, freezing its current price.
    ///
    /// Fails with [`CoreError::TypeMismatch`] for raw materials and
    /// [`CoreError::MissingPrice`] when the product has no price history.
    pub fn add_item(&mut self, product: &Product, quantity: Quantity) -> CoreResult<Uuid> {
        product.require_kind(ProductKind::FinalProduct)?;

        let unit_price = product
            .current_price()
            .ok_or(CoreError::MissingPrice(product.id()))?
            .value();
        let subtotal = unit_price.multiply(quantity.value())?;

        let item = SaleItem {
            id: Uuid::new_v4(),
            product_id: product.id(),
            quantity,
            unit_price,
            subtotal,
        };

        debug!(
            sale = %self.id,
            item = %item.id,
            product = %product.id(),
            unit_price = %unit_price,
            "sale item added, price frozen"
        );

        let item_id = item.id;
        self.items.push(item);
        self.recompute_total();
        Ok(item_id)
    }

    /// Removes an item and recomputes the running total.
    pub fn remove_item(&mut self, item_id: Uuid) -> CoreResult<SaleItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(CoreError::ItemNotFound(item_id))?;

        let removed = self.items.remove(index);
        self.recompute_total();

        debug!(sale = %self.id, item = %item_id, total = %self.total, "sale item removed");
        Ok(removed)
    }

    /// Sums all item subtotals. Called after every add/remove rather than
    /// adjusting incrementally, so the total can never drift from the items.
    fn recompute_total(&mut self) {
        self.total = self
            .items
            .iter()
            .fold(Money::zero(), |acc, item| acc.add(item.subtotal));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
