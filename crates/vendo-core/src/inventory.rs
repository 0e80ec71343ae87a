//! # Inventory Module
//!
//! Slot accounting for one machine: how many units of each product remain.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inventory Contract                                 │
//! │                                                                         │
//! │  has(name)        → true iff quantity >= 1 (false for unknown)         │
//! │  quantity(name)   → units remaining (0 for unknown)                    │
//! │  restock(p, qty)  → add units, registering the slot on first use       │
//! │  decrement(name)  → take exactly one unit, or OutOfStock               │
//! │                                                                         │
//! │  Purely a resource ledger: no transition side effects, no I/O.         │
//! │  Quantity is u32 - stock below zero is unrepresentable.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keyed by product *name* (string), not by `Product`, so availability
//! questions about unknown products have an answer instead of a type error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::InventoryError;
use crate::money::Money;
use crate::product::Product;

// =============================================================================
// Slot
// =============================================================================

/// One inventory slot: a product and its remaining quantity.
///
/// The product value is frozen into the slot at restock time, the same way
/// a till freezes prices into a receipt: a later restock with a repriced
/// product replaces the frozen copy, but an in-flight transaction keeps the
/// product value it selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    product: Product,
    quantity: u32,
}

impl Slot {
    /// The product stocked in this slot.
    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Units remaining.
    #[inline]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price of the stocked product.
    #[inline]
    pub const fn price(&self) -> Money {
        self.product.price()
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// The slot map for one machine.
///
/// ## Invariants
/// - Quantity never goes below zero (u32 + checked decrement)
/// - A decrement only succeeds when the pre-decrement quantity is >= 1
///
/// ## Lifecycle
/// Populated by administrative restocks; consumed one unit at a time by the
/// engine's dispense commit. Not shared directly - the engine owns it, and
/// the controller layer serializes access to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    slots: HashMap<String, Slot>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Inventory {
            slots: HashMap::new(),
        }
    }

    /// True iff at least one unit of the named product is available.
    ///
    /// Unknown products are simply unavailable, not an error.
    pub fn has(&self, name: &str) -> bool {
        self.quantity(name) >= 1
    }

    /// Units remaining for the named product. 0 for unknown products.
    pub fn quantity(&self, name: &str) -> u32 {
        self.slots.get(name).map_or(0, Slot::quantity)
    }

    /// The product stocked under the given name, if any.
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.slots.get(name).map(Slot::product)
    }

    /// Adds `quantity` units of `product`, registering the slot on first use.
    ///
    /// Administrative operation, not part of the transaction protocol. No
    /// upper bound is enforced; the counter saturates rather than wraps on
    /// absurd input. The slot's frozen product value is replaced, so a
    /// restock is also how a price change reaches the machine.
    pub fn restock(&mut self, product: Product, quantity: u32) {
        self.slots
            .entry(product.name().to_string())
            .and_modify(|slot| {
                slot.quantity = slot.quantity.saturating_add(quantity);
                slot.product = product.clone();
            })
            .or_insert(Slot { product, quantity });
    }

    /// Takes exactly one unit of the named product.
    ///
    /// ## Errors
    /// `InventoryError::OutOfStock` when the slot is empty or the product
    /// was never stocked. The slot map is unchanged on failure.
    pub fn decrement(&mut self, name: &str) -> Result<(), InventoryError> {
        match self.slots.get_mut(name) {
            Some(slot) if slot.quantity >= 1 => {
                slot.quantity -= 1;
                Ok(())
            }
            _ => Err(InventoryError::OutOfStock {
                name: name.to_string(),
            }),
        }
    }

    /// Removes up to `quantity` units (pulled stock, expired goods).
    ///
    /// Returns the number of units actually removed - never more than the
    /// slot held, so the count cannot go below zero. Unknown products
    /// remove nothing.
    pub fn remove(&mut self, name: &str, quantity: u32) -> u32 {
        match self.slots.get_mut(name) {
            Some(slot) => {
                let removed = slot.quantity.min(quantity);
                slot.quantity -= removed;
                removed
            }
            None => 0,
        }
    }

    /// Iterates over all slots (registered products and their quantities).
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    /// Number of registered slots (including empty ones).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no slot has ever been registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, cents: i64) -> Product {
        Product::new(name, Money::from_cents(cents)).unwrap()
    }

    #[test]
    fn test_unknown_product_is_unavailable() {
        let inventory = Inventory::new();
        assert!(!inventory.has("Cola"));
        assert_eq!(inventory.quantity("Cola"), 0);
        assert!(inventory.product("Cola").is_none());
    }

    #[test]
    fn test_restock_registers_and_accumulates() {
        let mut inventory = Inventory::new();
        inventory.restock(product("Cola", 150), 10);

        assert!(inventory.has("Cola"));
        assert_eq!(inventory.quantity("Cola"), 10);

        inventory.restock(product("Cola", 150), 5);
        assert_eq!(inventory.quantity("Cola"), 15);
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_restock_replaces_frozen_product() {
        let mut inventory = Inventory::new();
        inventory.restock(product("Cola", 150), 10);
        inventory.restock(product("Cola", 175), 0);

        // Price change travels with the restock.
        assert_eq!(inventory.product("Cola").unwrap().price().cents(), 175);
        assert_eq!(inventory.quantity("Cola"), 10);
    }

    #[test]
    fn test_decrement_takes_one_unit() {
        let mut inventory = Inventory::new();
        inventory.restock(product("Chips", 100), 2);

        inventory.decrement("Chips").unwrap();
        assert_eq!(inventory.quantity("Chips"), 1);

        inventory.decrement("Chips").unwrap();
        assert_eq!(inventory.quantity("Chips"), 0);
        assert!(!inventory.has("Chips"));
    }

    #[test]
    fn test_decrement_empty_slot_fails() {
        let mut inventory = Inventory::new();
        inventory.restock(product("Chips", 100), 1);
        inventory.decrement("Chips").unwrap();

        let err = inventory.decrement("Chips").unwrap_err();
        assert_eq!(
            err,
            InventoryError::OutOfStock {
                name: "Chips".to_string()
            }
        );
        // Failure leaves the count untouched.
        assert_eq!(inventory.quantity("Chips"), 0);
    }

    #[test]
    fn test_decrement_unknown_product_fails() {
        let mut inventory = Inventory::new();
        assert!(inventory.decrement("Ghost").is_err());
    }

    /// Restock(5) then 5 successful decrements; the 6th fails and the
    /// count never goes below zero.
    #[test]
    fn test_quantity_never_negative() {
        let mut inventory = Inventory::new();
        inventory.restock(product("Chips", 100), 5);

        for _ in 0..5 {
            inventory.decrement("Chips").unwrap();
        }
        assert!(inventory.decrement("Chips").is_err());
        assert_eq!(inventory.quantity("Chips"), 0);
    }

    #[test]
    fn test_remove_clamps_at_zero() {
        let mut inventory = Inventory::new();
        inventory.restock(product("Candy", 75), 3);

        assert_eq!(inventory.remove("Candy", 2), 2);
        assert_eq!(inventory.quantity("Candy"), 1);

        // Asking for more than the slot holds removes only what is there.
        assert_eq!(inventory.remove("Candy", 10), 1);
        assert_eq!(inventory.quantity("Candy"), 0);

        assert_eq!(inventory.remove("Ghost", 1), 0);
    }

    #[test]
    fn test_zero_quantity_restock_registers_slot() {
        let mut inventory = Inventory::new();
        inventory.restock(product("Candy", 75), 0);

        assert!(!inventory.has("Candy"));
        assert_eq!(inventory.len(), 1);
        assert!(inventory.product("Candy").is_some());
    }
}
