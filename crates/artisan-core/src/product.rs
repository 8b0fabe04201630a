//! # Product Aggregate
//!
//! The aggregate root of the engine. A product is either a stock-bearing
//! raw material or a recipe-and-margin-bearing final product; the kind is
//! fixed at creation and every capability is guarded by it.
//!
//! ## Capability Matrix
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation             RawMaterial        FinalProduct                  │
//! │  ─────────────────     ────────────       ─────────────                 │
//! │  increase_stock        ✅                 ❌ TypeMismatch               │
//! │  decrease_stock        ✅                 ❌ TypeMismatch               │
//! │  define_recipe         ❌ TypeMismatch    ✅                            │
//! │  define_profit_margin  ❌ (Some only)     ✅                            │
//! │  set_priced_per        ✅                 ❌ TypeMismatch               │
//! │  add_price             ✅                 ✅                            │
//! │                                                                         │
//! │  stock is mutated ONLY through the two guarded methods and never        │
//! │  goes below zero. FinalProduct stock is structurally always zero.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::price::{PriceEntry, PriceHistory};
use crate::pricing::ProfitMargin;
use crate::recipe::Recipe;
use crate::unit::Unit;

// =============================================================================
// Product Kind
// =============================================================================

/// What a product is, fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// A stock-tracked ingredient product.
    RawMaterial,
    /// A zero-stock, recipe-backed, sellable product.
    FinalProduct,
}

// =============================================================================
// Product
// =============================================================================

/// A raw material or final product.
///
/// State is private; mutation happens through validated methods that either
/// update the aggregate or raise a typed error. There is no identity-object
/// or lazy-loading machinery, a `Product` is plain owned data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: Uuid,
    name: String,
    kind: ProductKind,
    /// Current stock level. Bare decimal rather than a `Quantity`: stock
    /// must admit zero and carries no unit of its own.
    stock: Decimal,
    recipe: Option<Recipe>,
    margin: Option<ProfitMargin>,
    /// Unit the recorded prices are quoted per. Optional, raw materials
    /// only; consumed exclusively by the opt-in conversion-aware costing.
    priced_per: Option<Unit>,
    prices: PriceHistory,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a raw material with the given initial stock.
    ///
    /// ## Example
    /// ```rust
    /// use artisan_core::Product;
    /// use rust_decimal_macros::dec;
    ///
    /// let flour = Product::raw_material("Wheat flour", dec!(25)).unwrap();
    /// assert_eq!(flour.stock(), dec!(25));
    /// ```
    pub fn raw_material(name: &str, initial_stock: Decimal) -> CoreResult<Self> {
        if initial_stock.is_sign_negative() && !initial_stock.is_zero() {
            return Err(ValidationError::MustBeNonNegative {
                field: "initial_stock".to_string(),
            }
            .into());
        }
        Self::create(name, ProductKind::RawMaterial, initial_stock)
    }

    /// Creates a final product. Final products never hold stock, so it
    /// starts (and stays) at zero.
    pub fn final_product(name: &str) -> CoreResult<Self> {
        Self::create(name, ProductKind::FinalProduct, Decimal::ZERO)
    }

    fn create(name: &str, kind: ProductKind, stock: Decimal) -> CoreResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            }
            .into());
        }
        let now = Utc::now();
        Ok(Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            stock,
            recipe: None,
            margin: None,
            priced_per: None,
            prices: PriceHistory::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    #[inline]
    pub fn stock(&self) -> Decimal {
        self.stock
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn margin(&self) -> Option<ProfitMargin> {
        self.margin
    }

    pub fn priced_per(&self) -> Option<Unit> {
        self.priced_per
    }

    pub fn price_history(&self) -> &PriceHistory {
        &self.prices
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // -------------------------------------------------------------------------
    // Stock mutation (raw materials only)
    // -------------------------------------------------------------------------

    /// Increases stock by a positive amount.
    pub fn increase_stock(&mut self, amount: Decimal) -> CoreResult<()> {
        self.require_kind(ProductKind::RawMaterial)?;
        Self::require_positive_amount(amount)?;

        self.stock += amount;
        self.touch();
        debug!(product = %self.id, amount = %amount, stock = %self.stock, "stock increased");
        Ok(())
    }

    /// Decreases stock by a positive amount.
    ///
    /// Fails with [`CoreError::InsufficientStock`] when the requested amount
    /// exceeds the available stock; stock is left unchanged in that case.
    pub fn decrease_stock(&mut self, amount: Decimal) -> CoreResult<()> {
        self.require_kind(ProductKind::RawMaterial)?;
        Self::require_positive_amount(amount)?;

        if self.stock < amount {
            return Err(CoreError::InsufficientStock {
                product: self.id,
                available: self.stock,
                requested: amount,
            });
        }

        self.stock -= amount;
        self.touch();
        debug!(product = %self.id, amount = %amount, stock = %self.stock, "stock decreased");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Recipe & margin (final products only)
    // -------------------------------------------------------------------------

    /// Assigns the recipe. Re-definition replaces the previous recipe; the
    /// prior one is discarded, there is no versioning.
    pub fn define_recipe(&mut self, recipe: Recipe) -> CoreResult<()> {
        self.require_kind(ProductKind::FinalProduct)?;
        self.recipe = Some(recipe);
        self.touch();
        Ok(())
    }

    /// Assigns (or clears, with `None`) the profit margin.
    ///
    /// Raw materials may only ever carry `None`.
    pub fn define_profit_margin(&mut self, margin: Option<ProfitMargin>) -> CoreResult<()> {
        if self.kind == ProductKind::RawMaterial && margin.is_some() {
            return Err(CoreError::TypeMismatch {
                product: self.id,
                expected: ProductKind::FinalProduct,
                actual: self.kind,
            });
        }
        self.margin = margin;
        self.touch();
        Ok(())
    }

    /// Declares the unit the recorded prices are quoted per (raw materials
    /// only). `None` clears the declaration. Only the conversion-aware
    /// costing variant reads this; the default costing ignores it.
    pub fn set_priced_per(&mut self, unit: Option<Unit>) -> CoreResult<()> {
        if unit.is_some() {
            self.require_kind(ProductKind::RawMaterial)?;
        }
        self.priced_per = unit;
        self.touch();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Prices
    // -------------------------------------------------------------------------

    /// Appends a price entry effective now.
    pub fn add_price(&mut self, value: Money) {
        self.add_price_at(value, Utc::now());
    }

    /// Appends a price entry effective at the given instant. Backdating is
    /// allowed; the history is append-only either way.
    pub fn add_price_at(&mut self, value: Money, effective_at: DateTime<Utc>) {
        self.prices.append(PriceEntry::new(value, effective_at));
        self.touch();
    }

    /// The price entry with the maximum effective timestamp, if any.
    /// Equal timestamps resolve to the last-appended entry.
    pub fn current_price(&self) -> Option<&PriceEntry> {
        self.prices.current()
    }

    // -------------------------------------------------------------------------
    // Guards
    // -------------------------------------------------------------------------

    pub(crate) fn require_kind(&self, expected: ProductKind) -> CoreResult<()> {
        if self.kind != expected {
            return Err(CoreError::TypeMismatch {
                product: self.id,
                expected,
                actual: self.kind,
            });
        }
        Ok(())
    }

    fn require_positive_amount(amount: Decimal) -> CoreResult<()> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
