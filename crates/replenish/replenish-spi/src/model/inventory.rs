//! Inventory snapshot input.

use serde::{Deserialize, Serialize};

use demand_spi::ModelKey;

/// A caller-supplied stock position for one (product, store).
///
/// The decision core consumes these; it does not own or refresh them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Product identifier.
    pub product_id: String,
    /// Store identifier; `None` means the product across all stores.
    pub store_id: Option<String>,
    /// Units currently on hand.
    pub current_inventory: u32,
    /// Cost per unit.
    pub unit_cost: f64,
}

impl InventorySnapshot {
    /// Create a snapshot.
    pub fn new(
        product_id: impl Into<String>,
        store_id: Option<String>,
        current_inventory: u32,
        unit_cost: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            store_id,
            current_inventory,
            unit_cost,
        }
    }

    /// The forecast lookup key for this snapshot.
    pub fn key(&self) -> ModelKey {
        ModelKey::new(self.product_id.clone(), self.store_id.clone())
    }
}
