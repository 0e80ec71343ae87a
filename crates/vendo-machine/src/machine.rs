//! # Vending Machine Controller
//!
//! The shared, thread-safe face of one physical machine.
//!
//! ## Thread Safety
//! The engine is wrapped in `Arc<Mutex<T>>` because:
//! 1. Events arrive from independent input channels (keypad, coin acceptor,
//!    bill acceptor, door switch) and may race
//! 2. A transition reads state, decides, and mutates state/inventory/ledger -
//!    that whole read-decide-mutate is ONE critical section
//! 3. Duplicate hardware signals (a bouncing dispense button) must not
//!    double-commit a sale
//!
//! ## Event Processing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Event, One Critical Section                      │
//! │                                                                         │
//! │  Input Channel            VendingMachine            VendingCore         │
//! │  ─────────────            ──────────────            ───────────         │
//! │                                                                         │
//! │  coin inserted ──────────► lock ─────────────────► insert_tender()     │
//! │                              │                           │              │
//! │                              │        outcome ◄──────────┘              │
//! │                            unlock                                       │
//! │                              │                                          │
//! │                            tracing (outside the lock)                   │
//! │                              │                                          │
//! │  ◄─────────────────────── outcome                                       │
//! │                                                                         │
//! │  NOTE: nothing inside the lock blocks, suspends, or performs I/O.       │
//! │        Queries go through the same lock - no torn reads.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use vendo_core::outcome::{CancelOutcome, DispenseOutcome, SelectOutcome, TenderOutcome};
use vendo_core::{Inventory, MachineState, Money, Product, Tender, VendingCore};

use crate::snapshot::{LedgerSnapshot, MachineSnapshot, SlotSnapshot};

// =============================================================================
// Vending Machine
// =============================================================================

/// Cloneable handle to one physical machine's controller.
///
/// ## Ownership
/// Explicitly constructed and passed to its callers (dependency injection).
/// Clones share the same underlying machine; independent machines come from
/// independent `new()` calls. There is no global instance.
///
/// ## Why Not RwLock?
/// Every transaction event mutates, and queries are quick. A RwLock would
/// add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct VendingMachine {
    core: Arc<Mutex<VendingCore>>,
}

impl VendingMachine {
    /// Creates a machine with empty inventory and ledger.
    pub fn new() -> Self {
        VendingMachine {
            core: Arc::new(Mutex::new(VendingCore::new())),
        }
    }

    /// Creates a machine over a pre-populated inventory.
    pub fn with_inventory(inventory: Inventory) -> Self {
        VendingMachine {
            core: Arc::new(Mutex::new(VendingCore::with_inventory(inventory))),
        }
    }

    /// Executes a function with read access to the engine.
    ///
    /// A poisoned mutex is recovered rather than propagated: no transition
    /// arm mutates partially before a possible panic, so the guarded data
    /// is consistent even if a panicking thread held the lock.
    fn with_core<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&VendingCore) -> R,
    {
        let core = self.core.lock().unwrap_or_else(|poison| poison.into_inner());
        f(&core)
    }

    /// Executes a function with write access to the engine.
    fn with_core_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut VendingCore) -> R,
    {
        let mut core = self.core.lock().unwrap_or_else(|poison| poison.into_inner());
        f(&mut core)
    }

    // -------------------------------------------------------------------------
    // Transaction events
    // -------------------------------------------------------------------------

    /// Event: the customer selects a product by name.
    pub fn select(&self, name: &str) -> SelectOutcome {
        let outcome = self.with_core_mut(|core| core.select(name));

        match &outcome {
            SelectOutcome::Accepted { product } => {
                info!(product = %product.name(), price = %product.price(), "product selected");
            }
            SelectOutcome::ProductUnavailable { name } => {
                warn!(product = %name, "product unavailable");
            }
            SelectOutcome::AlreadySelected { selected } => {
                warn!(selected = %selected.name(), "selection ignored, transaction in progress");
            }
        }
        outcome
    }

    /// Event: the customer inserts a coin or note.
    pub fn insert_tender(&self, tender: Tender) -> TenderOutcome {
        let outcome = self.with_core_mut(|core| core.insert_tender(tender));

        match &outcome {
            TenderOutcome::PaymentComplete { paid, price } => {
                info!(%paid, %price, "payment complete, ready to dispense");
            }
            TenderOutcome::InsufficientFunds { paid, short } => {
                info!(%paid, %short, "tender accepted, payment still short");
            }
            TenderOutcome::NoSelection { returned } => {
                warn!(%returned, "tender returned, no product selected");
            }
            TenderOutcome::RefusedWhileDispensing { returned } => {
                warn!(%returned, "tender returned, payment already complete");
            }
        }
        outcome
    }

    /// Event: the dispense signal fires.
    pub fn dispense(&self) -> DispenseOutcome {
        let outcome = self.with_core_mut(VendingCore::dispense);

        match &outcome {
            DispenseOutcome::Dispensed {
                product,
                change,
                transaction_id,
            } => {
                info!(
                    product = %product.name(),
                    %change,
                    transaction = %transaction_id,
                    "dispensed"
                );
            }
            DispenseOutcome::PaymentIncomplete { paid, short } => {
                warn!(%paid, %short, "dispense refused, payment incomplete");
            }
            DispenseOutcome::NoSelection => {
                warn!("dispense refused, no product selected");
            }
            DispenseOutcome::Failed { product, refund } => {
                warn!(product = %product.name(), %refund, "dispense failed, refund due");
            }
        }
        outcome
    }

    /// Event: the customer cancels the transaction.
    pub fn cancel(&self) -> CancelOutcome {
        let outcome = self.with_core_mut(VendingCore::cancel);

        match &outcome {
            CancelOutcome::Cancelled { refund } => {
                info!(%refund, "transaction cancelled, refund due");
            }
            CancelOutcome::NothingToCancel => {
                debug!("cancel ignored, no transaction in progress");
            }
            CancelOutcome::RefusedWhileDispensing => {
                warn!("cancel refused, payment already complete");
            }
        }
        outcome
    }

    // -------------------------------------------------------------------------
    // Administrative operations
    // -------------------------------------------------------------------------

    /// Adds stock, registering the slot on first use.
    pub fn restock(&self, product: Product, quantity: u32) {
        let name = product.name().to_string();
        let total = self.with_core_mut(|core| {
            core.restock(product, quantity);
            core.inventory().quantity(&name)
        });
        info!(product = %name, added = quantity, total, "restocked");
    }

    /// Removes up to `quantity` units from a slot; returns the count
    /// actually removed.
    pub fn unload(&self, name: &str, quantity: u32) -> u32 {
        let removed = self.with_core_mut(|core| core.unload(name, quantity));
        info!(product = %name, removed, "unloaded");
        removed
    }

    /// Empties the cash box: reads and zeroes the ledger, returning the
    /// collected total. Read and reset are one critical section, so two
    /// concurrent collection rounds cannot both walk away with the money.
    pub fn collect(&self) -> Money {
        let amount = self.with_core_mut(VendingCore::collect);
        info!(%amount, "cash box collected");
        amount
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// The current state tag.
    pub fn current_state(&self) -> MachineState {
        self.with_core(VendingCore::state)
    }

    /// Tender accumulated in the current transaction (zero when idle).
    pub fn current_payment(&self) -> Money {
        self.with_core(VendingCore::payment)
    }

    /// Every registered slot, sorted by name.
    pub fn inventory_snapshot(&self) -> Vec<SlotSnapshot> {
        self.snapshot().slots
    }

    /// The whole machine at one instant.
    pub fn snapshot(&self) -> MachineSnapshot {
        self.with_core(|core| MachineSnapshot::from(&*core))
    }

    /// The money-collected ledger at one instant.
    pub fn ledger_snapshot(&self) -> LedgerSnapshot {
        self.with_core(|core| LedgerSnapshot::from(core.ledger()))
    }
}

impl Default for VendingMachine {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
