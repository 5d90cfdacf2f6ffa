//! Structured model identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a demand model: a product, optionally scoped to one store.
///
/// A structured pair rather than a concatenated string, so raw identifiers
/// containing any separator character can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelKey {
    /// Product identifier.
    pub product_id: String,
    /// Store identifier; `None` means the product across all stores.
    pub store_id: Option<String>,
}

impl ModelKey {
    /// Create a key for a product, optionally scoped to a store.
    pub fn new(product_id: impl Into<String>, store_id: Option<String>) -> Self {
        Self {
            product_id: product_id.into(),
            store_id,
        }
    }

    /// Create a key for a product across all stores.
    pub fn for_product(product_id: impl Into<String>) -> Self {
        Self::new(product_id, None)
    }

    /// Create a key for a product at a specific store.
    pub fn for_store(product_id: impl Into<String>, store_id: impl Into<String>) -> Self {
        Self::new(product_id, Some(store_id.into()))
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.store_id {
            Some(store) => write!(f, "{} @ {}", self.product_id, store),
            None => write!(f, "{} (all stores)", self.product_id),
        }
    }
}
