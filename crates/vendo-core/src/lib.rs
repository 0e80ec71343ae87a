//! # vendo-core: Pure Business Logic for the Vendo Controller
//!
//! This crate is the **heart** of a Vendo vending machine. It contains the
//! complete transaction engine as pure data mutation with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vendo Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Event Sources (keypad, coin slot, CLI)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vendo-machine                                │   │
//! │  │    serializes events, logs outcomes after the lock drops        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vendo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  tender   │  │ inventory │  │  engine   │  │   │
//! │  │   │   Money   │  │ Coin/Note │  │   Slots   │  │  Phase    │  │   │
//! │  │   │           │  │           │  │           │  │  matrix   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO LOGGING • PURE TRANSITIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`tender`] - Closed coin/note denominations
//! - [`product`] - Validated immutable products
//! - [`inventory`] - Slot accounting (quantity never below zero)
//! - [`ledger`] - Money-collected running total
//! - [`engine`] - The transaction state machine
//! - [`outcome`] - Discriminated results for every machine event
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Total transitions**: every (state, event) pair has a defined outcome
//! 2. **No I/O**: network, file system, and hardware access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64) to avoid float errors
//! 4. **Outcomes over errors**: expected business conditions are returned
//!    values, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vendo_core::{Coin, Money, Product, Tender, VendingCore};
//! use vendo_core::outcome::DispenseOutcome;
//!
//! let mut core = VendingCore::new();
//! let cola = Product::new("Cola", Money::from_cents(150)).unwrap();
//! core.restock(cola, 10);
//!
//! core.select("Cola");
//! core.insert_tender(Tender::Coin(Coin::One)); // 100 cents, still short
//! core.insert_tender(Tender::Coin(Coin::One)); // 200 cents, payment complete
//!
//! match core.dispense() {
//!     DispenseOutcome::Dispensed { change, .. } => assert_eq!(change.cents(), 50),
//!     other => panic!("expected a vend, got {other:?}"),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod outcome;
pub mod product;
pub mod tender;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vendo_core::Money` instead of
// `use vendo_core::money::Money`

pub use engine::{MachineState, Transaction, VendingCore};
pub use error::{CoreError, InventoryError, ValidationError};
pub use inventory::{Inventory, Slot};
pub use ledger::Ledger;
pub use money::Money;
pub use product::Product;
pub use tender::{Coin, Note, Tender};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name.
///
/// ## Business Reason
/// Product names end up on a two-line hardware display; anything longer
/// than this is a data entry mistake, not a product.
pub const MAX_PRODUCT_NAME_LEN: usize = 40;
