//! # Transaction Engine
//!
//! The vending state machine: three states, four events, every combination
//! defined.
//!
//! ## State × Event Matrix
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 │ Select(p)      │ InsertTender(t) │ Dispense │ Cancel  │
//! │ ────────────────┼────────────────┼─────────────────┼──────────┼──────── │
//! │ Idle            │ has(p)? begin  │ return tender   │ no-op    │ no-op   │
//! │                 │ : unavailable  │                 │          │         │
//! │ AwaitingPayment │ no-op          │ paid += value;  │ short    │ refund; │
//! │                 │                │ paid >= price?  │ report   │ → Idle  │
//! │                 │                │ → ReadyToDisp.  │          │         │
//! │ ReadyToDispense │ no-op          │ return tender   │ COMMIT   │ refused │
//! │                 │                │                 │ → Idle   │         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The matrix is one exhaustive `match` per event - no catch-all arms, so a
//! new state cannot be added without the compiler pointing at every place
//! its behavior must be decided.
//!
//! ## The Guard That Carries the Invariant
//! Payment sufficiency is checked after every tender insertion and nowhere
//! else. `ReadyToDispense` is therefore only reachable with
//! `paid >= price`, and the dispense-time change (`paid - price`) is
//! non-negative by construction rather than by runtime check.
//!
//! ## The Commit Point
//! The successful-dispense arm is the single irreversible step: the
//! inventory decrement is verified first, and only its success credits the
//! ledger. A failed decrement aborts the transaction with the full payment
//! owed back - the ledger is untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;
use uuid::Uuid;

use crate::inventory::Inventory;
use crate::ledger::Ledger;
use crate::money::Money;
use crate::outcome::{CancelOutcome, DispenseOutcome, SelectOutcome, TenderOutcome};
use crate::product::Product;
use crate::tender::Tender;

// =============================================================================
// Machine State Tag
// =============================================================================

/// The public state tag, for queries and reporting.
///
/// The engine's internal phase carries the in-flight transaction data; this
/// tag is what display collaborators see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineState {
    /// No transaction in progress.
    Idle,
    /// A product is selected; tender is being accumulated.
    AwaitingPayment,
    /// Payment covers the price; waiting for the dispense signal.
    ReadyToDispense,
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MachineState::Idle => "idle",
            MachineState::AwaitingPayment => "awaiting_payment",
            MachineState::ReadyToDispense => "ready_to_dispense",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// One in-flight purchase cycle.
///
/// Exists only while the machine is outside `Idle`; destroyed on vend
/// completion, cancellation, or dispense failure. The selected product is a
/// frozen copy - a concurrent restock repricing the slot does not change
/// what this customer was quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: Uuid,
    product: Product,
    paid: Money,
    started_at: DateTime<Utc>,
}

impl Transaction {
    fn begin(product: Product) -> Self {
        Transaction {
            id: Uuid::new_v4(),
            product,
            paid: Money::zero(),
            started_at: Utc::now(),
        }
    }

    /// Unique id of this purchase cycle (for receipts and logs).
    #[inline]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The product quoted to the customer.
    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Tender accumulated so far.
    #[inline]
    pub const fn paid(&self) -> Money {
        self.paid
    }

    /// When the product was selected.
    #[inline]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

// =============================================================================
// Phase
// =============================================================================

/// Internal state union. The transaction travels with the phase, so
/// "selection present only outside Idle" holds by construction - there is
/// no `Option<Product>` that could desynchronize from the state tag.
#[derive(Debug, Clone)]
enum Phase {
    Idle,
    AwaitingPayment(Transaction),
    ReadyToDispense(Transaction),
}

// =============================================================================
// Vending Core
// =============================================================================

/// The complete transaction engine for one machine: phase, inventory, and
/// ledger as a single unit of mutable state.
///
/// ## Ownership
/// Explicitly constructed and explicitly owned - the controller layer wraps
/// one `VendingCore` per physical unit behind a mutex. Tests construct as
/// many independent engines as they like; nothing here is global.
///
/// ## Atomicity
/// Every operation is one `&mut self` call that either completes its
/// mutation or leaves the engine untouched. The dispense commit mutates
/// inventory and ledger inside the same call, decrement first, credit only
/// on its success.
#[derive(Debug)]
pub struct VendingCore {
    phase: Phase,
    inventory: Inventory,
    ledger: Ledger,
}

impl Default for VendingCore {
    fn default() -> Self {
        VendingCore::new()
    }
}

impl VendingCore {
    /// Creates an engine with empty inventory, empty ledger, idle state.
    pub fn new() -> Self {
        VendingCore {
            phase: Phase::Idle,
            inventory: Inventory::new(),
            ledger: Ledger::new(),
        }
    }

    /// Creates an engine over a pre-populated inventory.
    pub fn with_inventory(inventory: Inventory) -> Self {
        VendingCore {
            phase: Phase::Idle,
            inventory,
            ledger: Ledger::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Transaction events
    // -------------------------------------------------------------------------

    /// Event: the customer selects a product by name.
    pub fn select(&mut self, name: &str) -> SelectOutcome {
        match &self.phase {
            Phase::Idle => {
                // has() requires quantity >= 1; a registered but empty slot
                // is as unavailable as an unknown name.
                if !self.inventory.has(name) {
                    return SelectOutcome::ProductUnavailable {
                        name: name.to_string(),
                    };
                }
                match self.inventory.product(name) {
                    Some(product) => {
                        let product = product.clone();
                        self.phase = Phase::AwaitingPayment(Transaction::begin(product.clone()));
                        SelectOutcome::Accepted { product }
                    }
                    // has() returned true, so the slot exists; keep the
                    // transition total anyway.
                    None => SelectOutcome::ProductUnavailable {
                        name: name.to_string(),
                    },
                }
            }
            Phase::AwaitingPayment(txn) | Phase::ReadyToDispense(txn) => {
                SelectOutcome::AlreadySelected {
                    selected: txn.product().clone(),
                }
            }
        }
    }

    /// Event: the customer inserts a coin or note.
    ///
    /// The sufficiency guard runs here, after every insertion - the only
    /// doorway into `ReadyToDispense`.
    pub fn insert_tender(&mut self, tender: Tender) -> TenderOutcome {
        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => TenderOutcome::NoSelection { returned: tender },
            Phase::AwaitingPayment(mut txn) => {
                txn.paid += tender.value();
                let paid = txn.paid;
                let price = txn.product.price();

                if paid >= price {
                    self.phase = Phase::ReadyToDispense(txn);
                    TenderOutcome::PaymentComplete { paid, price }
                } else {
                    self.phase = Phase::AwaitingPayment(txn);
                    TenderOutcome::InsufficientFunds {
                        paid,
                        short: price.saturating_sub(paid),
                    }
                }
            }
            Phase::ReadyToDispense(txn) => {
                self.phase = Phase::ReadyToDispense(txn);
                TenderOutcome::RefusedWhileDispensing { returned: tender }
            }
        }
    }

    /// Event: the dispense signal fires.
    ///
    /// This is the commit point. On success the unit is taken, the ledger is
    /// credited with exactly the price, and the remainder of the payment is
    /// returned as change. On an out-of-stock race the transaction aborts
    /// with the full payment owed back and the ledger untouched.
    pub fn dispense(&mut self) -> DispenseOutcome {
        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => DispenseOutcome::NoSelection,
            Phase::AwaitingPayment(txn) => {
                let paid = txn.paid;
                let short = txn.product.price().saturating_sub(paid);
                self.phase = Phase::AwaitingPayment(txn);
                DispenseOutcome::PaymentIncomplete { paid, short }
            }
            Phase::ReadyToDispense(txn) => {
                match self.inventory.decrement(txn.product.name()) {
                    Ok(()) => {
                        let price = txn.product.price();
                        // paid >= price: guaranteed by the insert_tender guard.
                        let change = txn.paid - price;
                        self.ledger.credit(price);
                        DispenseOutcome::Dispensed {
                            product: txn.product,
                            change,
                            transaction_id: txn.id,
                        }
                    }
                    Err(_) => DispenseOutcome::Failed {
                        refund: txn.paid,
                        product: txn.product,
                    },
                }
            }
        }
    }

    /// Event: the customer cancels the transaction.
    ///
    /// Permitted only while awaiting payment; once payment is approved the
    /// commit point is singular and a cancel is refused.
    pub fn cancel(&mut self) -> CancelOutcome {
        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => CancelOutcome::NothingToCancel,
            Phase::AwaitingPayment(txn) => CancelOutcome::Cancelled { refund: txn.paid },
            Phase::ReadyToDispense(txn) => {
                self.phase = Phase::ReadyToDispense(txn);
                CancelOutcome::RefusedWhileDispensing
            }
        }
    }

    // -------------------------------------------------------------------------
    // Administrative operations
    // -------------------------------------------------------------------------

    /// Adds stock, registering the slot on first use. Always succeeds.
    pub fn restock(&mut self, product: Product, quantity: u32) {
        self.inventory.restock(product, quantity);
    }

    /// Removes up to `quantity` units from a slot (pulled stock, expired
    /// goods). Returns the number of units actually removed.
    pub fn unload(&mut self, name: &str, quantity: u32) -> u32 {
        self.inventory.remove(name, quantity)
    }

    /// Reads and zeroes the money-collected ledger; returns the pre-reset
    /// total. One `&mut self` call, so the read and the reset cannot be
    /// split by another operation.
    pub fn collect(&mut self) -> Money {
        self.ledger.collect()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// The current state tag.
    pub fn state(&self) -> MachineState {
        match &self.phase {
            Phase::Idle => MachineState::Idle,
            Phase::AwaitingPayment(_) => MachineState::AwaitingPayment,
            Phase::ReadyToDispense(_) => MachineState::ReadyToDispense,
        }
    }

    /// Tender accumulated in the current transaction (zero when idle).
    pub fn payment(&self) -> Money {
        match &self.phase {
            Phase::Idle => Money::zero(),
            Phase::AwaitingPayment(txn) | Phase::ReadyToDispense(txn) => txn.paid(),
        }
    }

    /// The in-flight transaction, if any.
    pub fn transaction(&self) -> Option<&Transaction> {
        match &self.phase {
            Phase::Idle => None,
            Phase::AwaitingPayment(txn) | Phase::ReadyToDispense(txn) => Some(txn),
        }
    }

    /// The currently selected product, if any.
    pub fn selection(&self) -> Option<&Product> {
        self.transaction().map(Transaction::product)
    }

    /// Read access to the slot map.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Read access to the ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tender::{Coin, Note};

    fn product(name: &str, cents: i64) -> Product {
        Product::new(name, Money::from_cents(cents)).unwrap()
    }

    /// Engine stocked like the original demo machine.
    fn stocked_core() -> VendingCore {
        let mut core = VendingCore::new();
        core.restock(product("Cola", 150), 10);
        core.restock(product("Chips", 100), 5);
        core.restock(product("Candy", 75), 20);
        core
    }

    // -------------------------------------------------------------------------
    // Happy path
    // -------------------------------------------------------------------------

    /// Select Cola (150, stock 10), pay 100 + 100, dispense: change 50,
    /// stock 9, ledger 150, back to idle.
    #[test]
    fn test_full_purchase_cycle() {
        let mut core = stocked_core();

        let outcome = core.select("Cola");
        assert!(matches!(outcome, SelectOutcome::Accepted { .. }));
        assert_eq!(core.state(), MachineState::AwaitingPayment);
        assert!(core.payment().is_zero());

        let outcome = core.insert_tender(Tender::Coin(Coin::One));
        assert_eq!(
            outcome,
            TenderOutcome::InsufficientFunds {
                paid: Money::from_cents(100),
                short: Money::from_cents(50),
            }
        );
        assert_eq!(core.state(), MachineState::AwaitingPayment);

        let outcome = core.insert_tender(Tender::Coin(Coin::One));
        assert_eq!(
            outcome,
            TenderOutcome::PaymentComplete {
                paid: Money::from_cents(200),
                price: Money::from_cents(150),
            }
        );
        assert_eq!(core.state(), MachineState::ReadyToDispense);

        match core.dispense() {
            DispenseOutcome::Dispensed {
                product, change, ..
            } => {
                assert_eq!(product.name(), "Cola");
                assert_eq!(change.cents(), 50);
            }
            other => panic!("expected a vend, got {other:?}"),
        }

        assert_eq!(core.state(), MachineState::Idle);
        assert!(core.payment().is_zero());
        assert_eq!(core.inventory().quantity("Cola"), 9);
        assert_eq!(core.ledger().collected().cents(), 150);
    }

    #[test]
    fn test_exact_payment_gives_zero_change() {
        let mut core = stocked_core();
        core.select("Chips"); // 100
        core.insert_tender(Tender::Coin(Coin::One));

        match core.dispense() {
            DispenseOutcome::Dispensed { change, .. } => assert!(change.is_zero()),
            other => panic!("expected a vend, got {other:?}"),
        }
    }

    #[test]
    fn test_note_overpayment() {
        let mut core = stocked_core();
        core.select("Candy"); // 75
        let outcome = core.insert_tender(Tender::Note(Note::Ten)); // 1000
        assert!(matches!(outcome, TenderOutcome::PaymentComplete { .. }));

        match core.dispense() {
            DispenseOutcome::Dispensed { change, .. } => assert_eq!(change.cents(), 925),
            other => panic!("expected a vend, got {other:?}"),
        }
        assert_eq!(core.ledger().collected().cents(), 75);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    #[test]
    fn test_select_unknown_product_stays_idle() {
        let mut core = stocked_core();
        let outcome = core.select("Sushi");
        assert_eq!(
            outcome,
            SelectOutcome::ProductUnavailable {
                name: "Sushi".to_string()
            }
        );
        assert_eq!(core.state(), MachineState::Idle);
    }

    #[test]
    fn test_select_empty_slot_stays_idle() {
        let mut core = VendingCore::new();
        core.restock(product("Cola", 150), 0);

        let outcome = core.select("Cola");
        assert!(matches!(outcome, SelectOutcome::ProductUnavailable { .. }));
        assert_eq!(core.state(), MachineState::Idle);
    }

    #[test]
    fn test_reselect_is_a_noop() {
        let mut core = stocked_core();
        core.select("Cola");

        let outcome = core.select("Chips");
        match outcome {
            SelectOutcome::AlreadySelected { selected } => assert_eq!(selected.name(), "Cola"),
            other => panic!("expected AlreadySelected, got {other:?}"),
        }
        assert_eq!(core.selection().unwrap().name(), "Cola");
        assert_eq!(core.state(), MachineState::AwaitingPayment);
    }

    #[test]
    fn test_selection_freezes_quoted_price() {
        let mut core = stocked_core();
        core.select("Cola"); // quoted at 150
        core.restock(product("Cola", 500), 0); // repriced mid-transaction

        core.insert_tender(Tender::Coin(Coin::Two)); // 200 covers the quote
        assert_eq!(core.state(), MachineState::ReadyToDispense);

        match core.dispense() {
            DispenseOutcome::Dispensed { change, .. } => assert_eq!(change.cents(), 50),
            other => panic!("expected a vend, got {other:?}"),
        }
        // Ledger is credited at the quoted price, not the new one.
        assert_eq!(core.ledger().collected().cents(), 150);
    }

    // -------------------------------------------------------------------------
    // Tender handling off the happy path
    // -------------------------------------------------------------------------

    #[test]
    fn test_tender_while_idle_is_returned() {
        let mut core = stocked_core();
        let outcome = core.insert_tender(Tender::Coin(Coin::Five));
        assert_eq!(
            outcome,
            TenderOutcome::NoSelection {
                returned: Tender::Coin(Coin::Five)
            }
        );
        assert_eq!(core.state(), MachineState::Idle);
        assert!(core.payment().is_zero());
    }

    #[test]
    fn test_tender_while_ready_is_returned() {
        let mut core = stocked_core();
        core.select("Chips");
        core.insert_tender(Tender::Coin(Coin::Two)); // 200 >= 100

        let outcome = core.insert_tender(Tender::Coin(Coin::One));
        assert_eq!(
            outcome,
            TenderOutcome::RefusedWhileDispensing {
                returned: Tender::Coin(Coin::One)
            }
        );
        // Accumulated payment is unchanged by the refused coin.
        assert_eq!(core.payment().cents(), 200);
        assert_eq!(core.state(), MachineState::ReadyToDispense);
    }

    #[test]
    fn test_guard_runs_after_every_insertion() {
        let mut core = stocked_core();
        core.select("Cola"); // 150

        for (paid, state) in [
            (100, MachineState::AwaitingPayment),
            (200, MachineState::ReadyToDispense),
        ] {
            core.insert_tender(Tender::Coin(Coin::One));
            assert_eq!(core.payment().cents(), paid);
            assert_eq!(core.state(), state);
        }
    }

    // -------------------------------------------------------------------------
    // Dispense off the happy path
    // -------------------------------------------------------------------------

    #[test]
    fn test_dispense_while_idle_is_a_noop() {
        let mut core = stocked_core();
        assert_eq!(core.dispense(), DispenseOutcome::NoSelection);
        assert_eq!(core.state(), MachineState::Idle);
    }

    #[test]
    fn test_dispense_before_payment_complete() {
        let mut core = stocked_core();
        core.select("Cola");
        core.insert_tender(Tender::Coin(Coin::One)); // 100 of 150

        let outcome = core.dispense();
        assert_eq!(
            outcome,
            DispenseOutcome::PaymentIncomplete {
                paid: Money::from_cents(100),
                short: Money::from_cents(50),
            }
        );
        // Nothing moved: state, stock and ledger are all untouched.
        assert_eq!(core.state(), MachineState::AwaitingPayment);
        assert_eq!(core.inventory().quantity("Cola"), 10);
        assert!(core.ledger().collected().is_zero());
    }

    /// Stock razed between selection and dispense: the vend aborts, the
    /// full payment is owed back, the ledger is untouched.
    #[test]
    fn test_dispense_failure_on_depleted_stock() {
        let mut core = VendingCore::new();
        core.restock(product("Cola", 150), 1);

        core.select("Cola");
        core.insert_tender(Tender::Coin(Coin::Two)); // paid 200
        assert_eq!(core.state(), MachineState::ReadyToDispense);

        // Another path takes the last unit out from under the transaction.
        assert_eq!(core.unload("Cola", 1), 1);

        match core.dispense() {
            DispenseOutcome::Failed { product, refund } => {
                assert_eq!(product.name(), "Cola");
                assert_eq!(refund.cents(), 200);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(core.state(), MachineState::Idle);
        assert!(core.payment().is_zero());
        // The failed commit credited nothing.
        assert!(core.ledger().collected().is_zero());
        assert_eq!(core.ledger().sales_completed(), 0);
    }

    /// Restock 5, then repeated full purchases: five succeed, the sixth
    /// fails, quantity never goes below zero.
    #[test]
    fn test_stock_exhaustion_over_repeated_purchases() {
        let mut core = VendingCore::new();
        core.restock(product("Chips", 100), 5);

        for _ in 0..5 {
            assert!(matches!(core.select("Chips"), SelectOutcome::Accepted { .. }));
            core.insert_tender(Tender::Coin(Coin::One));
            assert!(matches!(core.dispense(), DispenseOutcome::Dispensed { .. }));
        }
        assert_eq!(core.inventory().quantity("Chips"), 0);

        // Sixth attempt: the empty slot now rejects selection outright.
        assert!(matches!(
            core.select("Chips"),
            SelectOutcome::ProductUnavailable { .. }
        ));
        assert_eq!(core.ledger().collected().cents(), 500);
        assert_eq!(core.ledger().sales_completed(), 5);
    }

    // -------------------------------------------------------------------------
    // Cancellation
    // -------------------------------------------------------------------------

    #[test]
    fn test_cancel_refunds_accumulated_payment() {
        let mut core = stocked_core();
        core.select("Cola");
        core.insert_tender(Tender::Coin(Coin::One)); // 100

        let outcome = core.cancel();
        assert_eq!(
            outcome,
            CancelOutcome::Cancelled {
                refund: Money::from_cents(100)
            }
        );
        assert_eq!(core.state(), MachineState::Idle);
        assert!(core.payment().is_zero());
        assert!(core.selection().is_none());
        // Cancel never touches stock or ledger.
        assert_eq!(core.inventory().quantity("Cola"), 10);
        assert!(core.ledger().collected().is_zero());
    }

    #[test]
    fn test_cancel_with_nothing_paid_refunds_zero() {
        let mut core = stocked_core();
        core.select("Cola");

        assert_eq!(
            core.cancel(),
            CancelOutcome::Cancelled {
                refund: Money::zero()
            }
        );
        assert_eq!(core.state(), MachineState::Idle);
    }

    #[test]
    fn test_cancel_while_idle() {
        let mut core = stocked_core();
        assert_eq!(core.cancel(), CancelOutcome::NothingToCancel);
        assert_eq!(core.state(), MachineState::Idle);
    }

    #[test]
    fn test_cancel_while_ready_is_refused() {
        let mut core = stocked_core();
        core.select("Cola");
        core.insert_tender(Tender::Coin(Coin::Two));

        assert_eq!(core.cancel(), CancelOutcome::RefusedWhileDispensing);
        // The approved sale is still live and can be dispensed.
        assert_eq!(core.state(), MachineState::ReadyToDispense);
        assert!(matches!(core.dispense(), DispenseOutcome::Dispensed { .. }));
    }

    // -------------------------------------------------------------------------
    // Administrative operations
    // -------------------------------------------------------------------------

    #[test]
    fn test_collect_reads_and_zeroes() {
        let mut core = stocked_core();
        core.select("Candy");
        core.insert_tender(Tender::Coin(Coin::One));
        core.dispense();

        assert_eq!(core.collect().cents(), 75);
        assert_eq!(core.collect().cents(), 0);
    }

    #[test]
    fn test_restock_during_transaction_is_visible_at_dispense() {
        let mut core = VendingCore::new();
        core.restock(product("Cola", 150), 1);

        core.select("Cola");
        core.unload("Cola", 1);
        core.restock(product("Cola", 150), 3);
        core.insert_tender(Tender::Coin(Coin::Two));

        assert!(matches!(core.dispense(), DispenseOutcome::Dispensed { .. }));
        assert_eq!(core.inventory().quantity("Cola"), 2);
    }

    // -------------------------------------------------------------------------
    // Invariants and lifecycle
    // -------------------------------------------------------------------------

    /// payment >= 0 and every quantity >= 0 across a whole battery of
    /// events, including rejected ones.
    #[test]
    fn test_payment_and_stock_never_negative() {
        let mut core = stocked_core();

        let assert_invariants = |core: &VendingCore| {
            assert!(!core.payment().is_negative());
            // u32 quantities cannot be negative; check they are readable.
            for slot in core.inventory().slots() {
                let _ = slot.quantity();
            }
        };

        assert_invariants(&core);
        core.insert_tender(Tender::Coin(Coin::Ten));
        assert_invariants(&core);
        core.select("Cola");
        assert_invariants(&core);
        core.insert_tender(Tender::Note(Note::Ten));
        assert_invariants(&core);
        core.cancel();
        assert_invariants(&core);
        core.dispense();
        assert_invariants(&core);
    }

    #[test]
    fn test_transaction_metadata() {
        let mut core = stocked_core();
        core.select("Cola");

        let txn = core.transaction().unwrap();
        assert_eq!(txn.product().name(), "Cola");
        assert!(txn.paid().is_zero());
        assert!(txn.started_at() <= Utc::now());
    }

    #[test]
    fn test_each_cycle_gets_a_fresh_transaction_id() {
        let mut core = stocked_core();

        let mut vend = |core: &mut VendingCore| {
            core.select("Candy");
            core.insert_tender(Tender::Coin(Coin::One));
            match core.dispense() {
                DispenseOutcome::Dispensed { transaction_id, .. } => transaction_id,
                other => panic!("expected a vend, got {other:?}"),
            }
        };

        let first = vend(&mut core);
        let second = vend(&mut core);
        assert_ne!(first, second);
    }

    /// The machine cycles indefinitely: no terminal state.
    #[test]
    fn test_machine_cycles_after_every_exit_path() {
        let mut core = stocked_core();

        // Exit via cancel.
        core.select("Cola");
        core.cancel();
        assert_eq!(core.state(), MachineState::Idle);

        // Exit via vend.
        core.select("Cola");
        core.insert_tender(Tender::Coin(Coin::Two));
        core.dispense();
        assert_eq!(core.state(), MachineState::Idle);

        // Still selectable.
        assert!(matches!(core.select("Cola"), SelectOutcome::Accepted { .. }));
    }

    #[test]
    fn test_independent_engines_do_not_share_state() {
        let mut a = stocked_core();
        let b = stocked_core();

        a.select("Cola");
        a.insert_tender(Tender::Coin(Coin::Two));
        a.dispense();

        assert_eq!(a.inventory().quantity("Cola"), 9);
        assert_eq!(b.inventory().quantity("Cola"), 10);
        assert!(b.ledger().collected().is_zero());
    }
}
