//! # Product Module
//!
//! Validated, immutable products.
//!
//! A product's identity is its name (unique key within one machine) plus a
//! unit price. There is nothing to update after construction: a price change
//! in the field is a restock with a new `Product` value, which replaces the
//! frozen copy held by the inventory slot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_PRODUCT_NAME_LEN;

// =============================================================================
// Product
// =============================================================================

/// A product the machine can sell.
///
/// ## Invariants
/// - `name` is non-empty, trimmed, at most [`MAX_PRODUCT_NAME_LEN`] chars
/// - `price` is non-negative
///
/// Both are enforced by [`Product::new`]; the fields stay private so a
/// `Product` value that exists is a `Product` value that validated.
///
/// ## Example
/// ```rust
/// use vendo_core::{Money, Product};
///
/// let cola = Product::new("Cola", Money::from_cents(150)).unwrap();
/// assert_eq!(cola.name(), "Cola");
/// assert_eq!(cola.price().cents(), 150);
///
/// assert!(Product::new("", Money::from_cents(150)).is_err());
/// assert!(Product::new("Cola", Money::from_cents(-1)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name and unique key within one machine.
    name: String,

    /// Unit price in cents.
    price: Money,
}

impl Product {
    /// Creates a validated product.
    ///
    /// ## Rules
    /// - Name must not be empty (after trimming)
    /// - Name must be at most [`MAX_PRODUCT_NAME_LEN`] characters
    /// - Price must not be negative (zero is allowed: promotional vends)
    pub fn new(name: impl Into<String>, price: Money) -> Result<Self, ValidationError> {
        let name = name.into();
        let name = name.trim().to_string();

        if name.is_empty() {
            return Err(ValidationError::Required { field: "name" });
        }

        if name.chars().count() > MAX_PRODUCT_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_PRODUCT_NAME_LEN,
            });
        }

        if price.is_negative() {
            return Err(ValidationError::NegativeAmount {
                field: "price",
                cents: price.cents(),
            });
        }

        Ok(Product { name, price })
    }

    /// The product name (unique key within one machine).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unit price.
    #[inline]
    pub const fn price(&self) -> Money {
        self.price
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
