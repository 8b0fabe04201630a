//! # artisan-core: Pure Business Logic for Artisan POS
//!
//! This crate is the **heart** of Artisan POS. It contains the costing and
//! inventory consistency engine for a small manufacturing/retail operation:
//! temporal price history, unit-aware quantity arithmetic, recipe cost
//! aggregation, margin-based sale pricing, and the stock-adjustment
//! semantics of purchases and sales.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Artisan POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Application-Service Tier (external)                │   │
//! │  │   validates input shape • owns the transaction boundary         │   │
//! │  │   translates typed errors into caller-facing responses          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ artisan-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   unit    │  │  product  │  │  recipe   │  │   │
//! │  │   │   Money   │  │ Quantity  │  │  Product  │  │  Recipe   │  │   │
//! │  │   │  2dp ½up  │  │ convert   │  │  guards   │  │  costing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   price   │  │  pricing  │  │ purchase  │  │   sale    │  │   │
//! │  │   │  history  │  │  margins  │  │  stock +  │  │  frozen   │  │   │
//! │  │   │ temporal  │  │ sale calc │  │  compens. │  │  prices   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE AGGREGATES          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ProductLookup / ProductStore           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Persistence layer (external)                       │   │
//! │  │   implements the lookup traits over its own storage             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Fixed-scale decimal money (2 places, half-up, never negative)
//! - [`unit`] - Units, quantities, and conversion between compatible units
//! - [`price`] - Append-only temporal price history
//! - [`product`] - The Product aggregate root with kind-based capability guards
//! - [`recipe`] - Bill of materials and cost aggregation
//! - [`pricing`] - Profit margins and sale price derivation
//! - [`purchase`] - Purchase items and their stock effects
//! - [`sale`] - Sale items with frozen prices and running totals
//! - [`lookup`] - The injected collaborator traits + in-memory implementation
//! - [`error`] - Typed domain errors
//!
//! ## Design Principles
//!
//! 1. **Pure Aggregates**: plain owned data, validated constructors, guarded
//!    mutation methods; no identity-object or lazy-loading machinery
//! 2. **No I/O**: the only way out of the core is the injected
//!    [`ProductLookup`]/[`ProductStore`] collaborator
//! 3. **Decimal Money**: all monetary and stock values are `rust_decimal`
//!    decimals, never floats
//! 4. **Explicit Errors**: all failures are typed, fail-fast, and propagate
//!    to the immediate caller; the core never retries or swallows
//!
//! ## Concurrency
//!
//! Every operation is synchronous and single-threaded from the core's point
//! of view. The core performs no locking: two concurrent stock mutations on
//! the same product can race and lose an update. Callers targeting
//! concurrent environments must serialize writes per product id (a per-id
//! mutex or single-writer actor) or add optimistic versioning at their
//! persistence layer. Multi-item operations are likewise not atomic here;
//! the caller's transaction boundary makes them all-or-nothing.
//!
//! ## Example Usage
//!
//! ```rust
//! use artisan_core::{
//!     compute_sale_price, InMemoryProducts, Money, Product, ProductLookup, ProfitMargin,
//!     Quantity, Recipe, Unit,
//! };
//! use rust_decimal_macros::dec;
//!
//! let mut store = InMemoryProducts::new();
//!
//! let mut butter = Product::raw_material("Butter", dec!(10)).unwrap();
//! butter.add_price(Money::new(dec!(2.50)).unwrap());
//! let butter_id = store.insert(butter);
//!
//! let mut recipe = Recipe::new(Quantity::new(dec!(12), Unit::Unit).unwrap());
//! recipe
//!     .add_ingredient(
//!         store.find_by_id(butter_id).unwrap(),
//!         Quantity::new(dec!(4), Unit::Unit).unwrap(),
//!     )
//!     .unwrap();
//!
//! let mut croissant = Product::final_product("Croissant").unwrap();
//! croissant.define_recipe(recipe).unwrap();
//! croissant
//!     .define_profit_margin(Some(ProfitMargin::new(dec!(0.40)).unwrap()))
//!     .unwrap();
//!
//! // cost 10.00 × 1.40 = 14.00
//! let price = compute_sale_price(&croissant, &store).unwrap();
//! assert_eq!(price.value(), dec!(14.00));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lookup;
pub mod money;
pub mod price;
pub mod pricing;
pub mod product;
pub mod purchase;
pub mod recipe;
pub mod sale;
pub mod unit;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use artisan_core::Money` instead of
// `use artisan_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use lookup::{InMemoryProducts, ProductLookup, ProductStore};
pub use money::Money;
pub use price::{PriceEntry, PriceHistory};
pub use pricing::{compute_sale_price, ProfitMargin};
pub use product::{Product, ProductKind};
pub use purchase::{Purchase, PurchaseItem};
pub use recipe::{Recipe, RecipeIngredient};
pub use sale::{Sale, SaleItem};
pub use unit::{Quantity, Unit, UnitClass};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Decimal places every Money value is held at (rounded half-up).
pub const MONEY_SCALE: u32 = 2;

/// Decimal places a unit conversion result is rounded to (half-up).
pub const QUANTITY_SCALE: u32 = 6;
