//! # Snapshot DTOs
//!
//! Read-models for display and reporting collaborators.
//!
//! Snapshots are built under the same lock as any mutation (no torn reads)
//! and then handed out as plain owned data: a snapshot is a photograph, not
//! a window - it does not change when the machine does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendo_core::inventory::Slot;
use vendo_core::{Ledger, MachineState, VendingCore};

// =============================================================================
// Slot Snapshot
// =============================================================================

/// One inventory slot as shown on the service panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSnapshot {
    /// Product name (unique key within the machine).
    pub name: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Units remaining.
    pub quantity: u32,
}

impl From<&Slot> for SlotSnapshot {
    fn from(slot: &Slot) -> Self {
        SlotSnapshot {
            name: slot.product().name().to_string(),
            price_cents: slot.price().cents(),
            quantity: slot.quantity(),
        }
    }
}

// =============================================================================
// Machine Snapshot
// =============================================================================

/// The whole machine at one instant: state, in-flight payment, selection,
/// and every slot.
///
/// Slots are sorted by name so repeated snapshots of an unchanged machine
/// serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSnapshot {
    /// Current state tag.
    pub state: MachineState,

    /// Tender accumulated in the current transaction (0 when idle).
    pub payment_cents: i64,

    /// Name of the selected product, if a transaction is in flight.
    pub selection: Option<String>,

    /// Every registered slot, sorted by name.
    pub slots: Vec<SlotSnapshot>,
}

impl From<&VendingCore> for MachineSnapshot {
    fn from(core: &VendingCore) -> Self {
        let mut slots: Vec<SlotSnapshot> = core.inventory().slots().map(SlotSnapshot::from).collect();
        slots.sort_by(|a, b| a.name.cmp(&b.name));

        MachineSnapshot {
            state: core.state(),
            payment_cents: core.payment().cents(),
            selection: core.selection().map(|p| p.name().to_string()),
            slots,
        }
    }
}

// =============================================================================
// Ledger Snapshot
// =============================================================================

/// The money-collected ledger as shown to the collection operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// Money collected since the last collection round, in cents.
    pub collected_cents: i64,

    /// Vends completed over the machine's lifetime.
    pub sales_completed: u64,

    /// When the cash box was last emptied, if ever.
    pub last_collected_at: Option<DateTime<Utc>>,
}

impl From<&Ledger> for LedgerSnapshot {
    fn from(ledger: &Ledger) -> Self {
        LedgerSnapshot {
            collected_cents: ledger.collected().cents(),
            sales_completed: ledger.sales_completed(),
            last_collected_at: ledger.last_collected_at(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
