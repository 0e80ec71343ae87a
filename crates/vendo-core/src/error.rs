//! # Error Types
//!
//! Domain-specific error types for vendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vendo-core errors (this file)                                         │
//! │  ├── ValidationError  - Bad product data or bad operator input         │
//! │  ├── InventoryError   - Slot accounting faults (OutOfStock)            │
//! │  └── CoreError        - Umbrella for the app boundary                  │
//! │                                                                         │
//! │  NOTE: expected transaction conditions (insufficient funds, invalid    │
//! │  event for the current state, ...) are NOT errors. They are returned   │
//! │  as outcome variants - see the `outcome` module.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when product data or operator input doesn't meet requirements.
/// Used for early validation before any machine state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A monetary amount that must not be negative was negative.
    #[error("{field} must not be negative, got {cents} cents")]
    NegativeAmount { field: &'static str, cents: i64 },
}

// =============================================================================
// Inventory Error
// =============================================================================

/// Slot accounting faults.
///
/// The only fault the inventory can produce is an attempt to take a unit
/// that isn't there. The quantity type is unsigned, so "negative stock"
/// cannot be represented at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The slot is empty or the product was never stocked.
    ///
    /// ## When This Occurs
    /// - Dispensing after stock was depleted between selection and vend
    /// - Decrementing a product that was never restocked
    #[error("out of stock: {name}")]
    OutOfStock { name: String },
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for callers that sit above the core (the simulator, a
/// service boundary). Transaction outcomes never pass through here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Inventory fault (wraps InventoryError).
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
