//! # Outcome Types
//!
//! Discriminated results for every machine event.
//!
//! ## Outcomes, Not Errors
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every (state, event) pair produces an outcome VALUE.                   │
//! │                                                                         │
//! │  A rejected event (coin while idle, cancel while dispensing) is an     │
//! │  expected condition the caller reacts to - show a message, return the  │
//! │  coin - not a fault. The engine never panics and never returns Err     │
//! │  for any of these.                                                      │
//! │                                                                         │
//! │  Amounts ride on the variants: whatever money the caller now owes      │
//! │  the customer (change, refund, a returned coin) is in the outcome.     │
//! │  Collected tender is never silently dropped.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All outcomes serialize (externally tagged, snake_case) so the controller
//! layer can report them to display collaborators as-is.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::product::Product;
use crate::tender::Tender;

// =============================================================================
// Select
// =============================================================================

/// Result of a product-selection event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectOutcome {
    /// Selection accepted; the machine now awaits payment.
    Accepted { product: Product },

    /// Unknown product or empty slot; the machine stays idle.
    ProductUnavailable { name: String },

    /// A transaction is already in progress; the event is a no-op.
    AlreadySelected { selected: Product },
}

// =============================================================================
// Insert Tender
// =============================================================================

/// Result of a coin/note insertion event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderOutcome {
    /// Payment now covers the price; the machine is ready to dispense.
    PaymentComplete { paid: Money, price: Money },

    /// Tender accepted but the total is still short of the price.
    InsufficientFunds { paid: Money, short: Money },

    /// No product selected; the tender is returned to the customer.
    NoSelection { returned: Tender },

    /// Payment already complete; the tender is returned to the customer.
    RefusedWhileDispensing { returned: Tender },
}

// =============================================================================
// Dispense
// =============================================================================

/// Result of a dispense event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispenseOutcome {
    /// The vend committed: one unit taken, ledger credited, change due.
    ///
    /// `change` is non-negative by construction - the machine only reaches
    /// the dispense-ready state once payment covers the price.
    Dispensed {
        product: Product,
        change: Money,
        transaction_id: Uuid,
    },

    /// Payment does not cover the price yet; nothing happens.
    PaymentIncomplete { paid: Money, short: Money },

    /// No product selected; nothing to dispense.
    NoSelection,

    /// Stock ran out between selection and dispense. The transaction is
    /// aborted and the full accumulated payment is owed back.
    Failed { product: Product, refund: Money },
}

// =============================================================================
// Cancel
// =============================================================================

/// Result of a cancellation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelOutcome {
    /// Transaction aborted; the full accumulated payment is owed back.
    Cancelled { refund: Money },

    /// No transaction in progress.
    NothingToCancel,

    /// Payment is already approved; the commit point is singular and a
    /// cancel here is refused.
    RefusedWhileDispensing,
}

// =============================================================================
// Unit Tests
// =============================================================================
