//! # Ledger Module
//!
//! The money-collected running total for one machine.
//!
//! Credited at the commit point of every successful vend; read and zeroed by
//! the administrative collection round. Monotonically non-decreasing between
//! collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Ledger
// =============================================================================

/// Running total of money collected across completed vends.
///
/// ## Invariants
/// - `collected` only grows between collections
/// - `collect` is the single operation that resets it, and returns exactly
///   what was accumulated (calling it again immediately returns zero)
/// - `sales_completed` counts vends for reporting and is NOT reset by a
///   collection - it is bookkeeping, not cash
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    collected: Money,
    sales_completed: u64,
    last_collected_at: Option<DateTime<Utc>>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Credits the ledger with the price of a completed vend.
    ///
    /// Called only from the engine's dispense commit, after the inventory
    /// decrement has succeeded.
    pub fn credit(&mut self, amount: Money) {
        self.collected += amount;
        self.sales_completed += 1;
    }

    /// Reads and zeroes the collected total, returning the pre-reset value.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::{Ledger, Money};
    ///
    /// let mut ledger = Ledger::new();
    /// ledger.credit(Money::from_cents(150));
    ///
    /// assert_eq!(ledger.collect().cents(), 150);
    /// assert_eq!(ledger.collect().cents(), 0); // second round finds nothing
    /// ```
    pub fn collect(&mut self) -> Money {
        let amount = self.collected;
        self.collected = Money::zero();
        self.last_collected_at = Some(Utc::now());
        amount
    }

    /// Money collected since the last collection round.
    #[inline]
    pub const fn collected(&self) -> Money {
        self.collected
    }

    /// Vends completed over the machine's lifetime.
    #[inline]
    pub const fn sales_completed(&self) -> u64 {
        self.sales_completed
    }

    /// When the cash box was last emptied, if ever.
    #[inline]
    pub const fn last_collected_at(&self) -> Option<DateTime<Utc>> {
        self.last_collected_at
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
