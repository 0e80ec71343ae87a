//! # Command Parsing
//!
//! Turns one line of operator/customer input into a machine event.
//!
//! Parsing is a pure function so it can be tested without a terminal; the
//! main loop owns all the I/O.

use thiserror::Error;

use vendo_machine::{Coin, Money, Note, Tender};

// =============================================================================
// Command
// =============================================================================

/// One line of input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `select <name>` - select a product (name may contain spaces).
    Select { name: String },

    /// `coin <one|two|five|ten>` or `note <ten|twenty|fifty|hundred>`.
    Insert(Tender),

    /// `dispense` - fire the dispense signal.
    Dispense,

    /// `cancel` - cancel the current transaction.
    Cancel,

    /// `restock <name> <qty> <price-cents>` - administrative restock.
    Restock {
        name: String,
        quantity: u32,
        price: Money,
    },

    /// `unload <name> <qty>` - administrative stock removal.
    Unload { name: String, quantity: u32 },

    /// `collect` - empty the cash box.
    Collect,

    /// `status` - one-line state summary.
    Status,

    /// `snapshot` - full machine state as JSON.
    Snapshot,

    /// `help` - print the command list.
    Help,

    /// `quit` / `exit` - leave the simulator.
    Quit,
}

// =============================================================================
// Parse Errors
// =============================================================================

/// What went wrong with a line of input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("unknown denomination: {0}")]
    UnknownDenomination(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("not a number: {0}")]
    InvalidNumber(String),
}

// =============================================================================
// Parser
// =============================================================================

/// Parses one line of input into a [`Command`].
///
/// Keywords are case-insensitive; product names are taken verbatim.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let keyword = words.next().ok_or(ParseError::Empty)?.to_lowercase();
    let rest: Vec<&str> = words.collect();

    match keyword.as_str() {
        "select" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("product name"));
            }
            Ok(Command::Select {
                name: rest.join(" "),
            })
        }
        "coin" => {
            let word = rest.first().ok_or(ParseError::MissingArgument("denomination"))?;
            let coin = match word.to_lowercase().as_str() {
                "one" => Coin::One,
                "two" => Coin::Two,
                "five" => Coin::Five,
                "ten" => Coin::Ten,
                other => return Err(ParseError::UnknownDenomination(other.to_string())),
            };
            Ok(Command::Insert(Tender::Coin(coin)))
        }
        "note" => {
            let word = rest.first().ok_or(ParseError::MissingArgument("denomination"))?;
            let note = match word.to_lowercase().as_str() {
                "ten" => Note::Ten,
                "twenty" => Note::Twenty,
                "fifty" => Note::Fifty,
                "hundred" => Note::Hundred,
                other => return Err(ParseError::UnknownDenomination(other.to_string())),
            };
            Ok(Command::Insert(Tender::Note(note)))
        }
        "dispense" => Ok(Command::Dispense),
        "cancel" => Ok(Command::Cancel),
        "restock" => {
            // Name first, then the two numbers: `restock Cola 10 150`
            let (name, quantity, price) = match rest.as_slice() {
                [name, quantity, price] => (*name, *quantity, *price),
                _ => return Err(ParseError::MissingArgument("<name> <qty> <price-cents>")),
            };
            let quantity: u32 = quantity
                .parse()
                .map_err(|_| ParseError::InvalidNumber(quantity.to_string()))?;
            let cents: i64 = price
                .parse()
                .map_err(|_| ParseError::InvalidNumber(price.to_string()))?;
            Ok(Command::Restock {
                name: name.to_string(),
                quantity,
                price: Money::from_cents(cents),
            })
        }
        "unload" => {
            let (name, quantity) = match rest.as_slice() {
                [name, quantity] => (*name, *quantity),
                _ => return Err(ParseError::MissingArgument("<name> <qty>")),
            };
            let quantity: u32 = quantity
                .parse()
                .map_err(|_| ParseError::InvalidNumber(quantity.to_string()))?;
            Ok(Command::Unload {
                name: name.to_string(),
                quantity,
            })
        }
        "collect" => Ok(Command::Collect),
        "status" => Ok(Command::Status),
        "snapshot" => Ok(Command::Snapshot),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// The command list printed by `help`.
pub const HELP: &str = "\
Commands:
  select <name>                 select a product
  coin <one|two|five|ten>       insert a coin
  note <ten|twenty|fifty|hundred>  insert a note
  dispense                      fire the dispense signal
  cancel                        cancel the transaction
  restock <name> <qty> <cents>  add stock (admin)
  unload <name> <qty>           remove stock (admin)
  collect                       empty the cash box (admin)
  status                        one-line state summary
  snapshot                      full machine state as JSON
  help                          this list
  quit                          leave the simulator";

// =============================================================================
// Unit Tests
// =============================================================================
