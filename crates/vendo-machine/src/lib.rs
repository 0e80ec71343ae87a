//! # vendo-machine: Shared Controller for the Vendo Engine
//!
//! One `VendingMachine` per physical unit. The machine is a cloneable handle
//! over the pure [`vendo_core`] engine, adding exactly two things:
//!
//! 1. **Serialization** - events may arrive from concurrent sources (keypad,
//!    coin acceptor, retried hardware signals); every transition runs inside
//!    a single mutex held for the duration of one event.
//! 2. **Observability** - structured `tracing` events describing each
//!    outcome, emitted strictly after the lock is released.
//!
//! ## Module Organization
//! ```text
//! vendo_machine/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── machine.rs      ◄─── VendingMachine handle + critical section
//! └── snapshot.rs     ◄─── Serializable read-models for display collaborators
//! ```
//!
//! ## Not a Singleton
//! A deployment runs one machine per physical unit, but the type is an
//! explicitly constructed, explicitly owned value passed to its callers.
//! Tests build as many independent machines as they need.

pub mod machine;
pub mod snapshot;

pub use machine::VendingMachine;
pub use snapshot::{LedgerSnapshot, MachineSnapshot, SlotSnapshot};

// Re-export the core vocabulary so event sources depend on one crate.
pub use vendo_core::{
    outcome, Coin, CoreError, Inventory, InventoryError, Ledger, MachineState, Money, Note,
    Product, Tender, Transaction, ValidationError, VendingCore,
};
