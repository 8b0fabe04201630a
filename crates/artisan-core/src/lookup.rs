//! # Product Lookup
//!
//! The one collaborator abstraction the core depends on.
//!
//! Recipe costing and the purchase/sale engines never reach into a database
//! themselves; they receive a lookup (or store, for stock mutation) at the
//! call site. The embedding application implements these traits over its
//! persistence layer; tests and small deployments use [`InMemoryProducts`].

use std::collections::HashMap;

use uuid::Uuid;

use crate::product::Product;

// =============================================================================
// Traits
// =============================================================================

/// Read-only resolution of products by id.
pub trait ProductLookup {
    fn find_by_id(&self, id: Uuid) -> Option<&Product>;
}

/// Mutable resolution, required by the stock engines.
pub trait ProductStore: ProductLookup {
    fn find_by_id_mut(&mut self, id: Uuid) -> Option<&mut Product>;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// HashMap-backed product collection.
///
/// This is the fake the engine is tested against and a perfectly serviceable
/// store for embedders that keep their catalog in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProducts {
    products: HashMap<Uuid, Product>,
}

impl InMemoryProducts {
    pub fn new() -> Self {
        InMemoryProducts {
            products: HashMap::new(),
        }
    }

    /// Inserts a product and returns its id. An existing product with the
    /// same id is replaced.
    pub fn insert(&mut self, product: Product) -> Uuid {
        let id = product.id();
        self.products.insert(id, product);
        id
    }

    /// Removes a product, returning it if present.
    pub fn remove(&mut self, id: Uuid) -> Option<Product> {
        self.products.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductLookup for InMemoryProducts {
    fn find_by_id(&self, id: Uuid) -> Option<&Product> {
        self.products.get(&id)
    }
}

impl ProductStore for InMemoryProducts {
    fn find_by_id_mut(&mut self, id: Uuid) -> Option<&mut Product> {
        self.products.get_mut(&id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
