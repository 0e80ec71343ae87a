//! # Tender Module
//!
//! Closed enumerations of the coins and notes the machine accepts.
//!
//! Denominations are fixed at compile time - the acceptor hardware is
//! calibrated for exactly these shapes, so the type is deliberately not
//! extensible at runtime. Face values are whole currency units; [`value`]
//! converts to cents so all downstream arithmetic stays in `Money`.
//!
//! [`value`]: Tender::value

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Coins
// =============================================================================

/// A coin denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coin {
    /// 1 currency unit (100 cents).
    One,
    /// 2 currency units (200 cents).
    Two,
    /// 5 currency units (500 cents).
    Five,
    /// 10 currency units (1000 cents).
    Ten,
}

impl Coin {
    /// Face value of the coin.
    #[inline]
    pub const fn value(&self) -> Money {
        match self {
            Coin::One => Money::from_cents(100),
            Coin::Two => Money::from_cents(200),
            Coin::Five => Money::from_cents(500),
            Coin::Ten => Money::from_cents(1000),
        }
    }
}

// =============================================================================
// Notes
// =============================================================================

/// A banknote denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Note {
    /// 10 currency units (1000 cents).
    Ten,
    /// 20 currency units (2000 cents).
    Twenty,
    /// 50 currency units (5000 cents).
    Fifty,
    /// 100 currency units (10000 cents).
    Hundred,
}

impl Note {
    /// Face value of the note.
    #[inline]
    pub const fn value(&self) -> Money {
        match self {
            Note::Ten => Money::from_cents(1000),
            Note::Twenty => Money::from_cents(2000),
            Note::Fifty => Money::from_cents(5000),
            Note::Hundred => Money::from_cents(10000),
        }
    }
}

// =============================================================================
// Tender
// =============================================================================

/// A discrete unit of payment: one coin or one note.
///
/// The engine only ever asks for the value; which physical slot the tender
/// arrived through matters to the acceptor hardware and to reporting, not
/// to the payment guard.
///
/// ## Example
/// ```rust
/// use vendo_core::tender::{Coin, Note, Tender};
///
/// assert_eq!(Tender::Coin(Coin::Five).value().cents(), 500);
/// assert_eq!(Tender::Note(Note::Twenty).value().cents(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tender {
    Coin(Coin),
    Note(Note),
}

impl Tender {
    /// Face value of the tender.
    #[inline]
    pub const fn value(&self) -> Money {
        match self {
            Tender::Coin(coin) => coin.value(),
            Tender::Note(note) => note.value(),
        }
    }
}

impl fmt::Display for Tender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tender::Coin(_) => write!(f, "coin {}", self.value()),
            Tender::Note(_) => write!(f, "note {}", self.value()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
