//! # Vendo Simulator
//!
//! Drives one [`VendingMachine`] from stdin, standing in for the hardware
//! event dispatcher.
//!
//! ## Startup Sequence
//! ```text
//! 1. Initialize logging (tracing-subscriber, RUST_LOG override, default info)
//! 2. Build one machine and seed the demo inventory
//! 3. Read commands line by line, feed the machine, print the panel output
//! ```
//!
//! The simulator holds no business state of its own: every line becomes one
//! machine event, and what gets printed is derived from the returned outcome.
//!
//! ## Example Session
//! ```text
//! > select Cola
//! Selected Cola ($1.50). Insert coins or notes.
//! > coin one
//! Accepted. Paid $1.00, $0.50 still needed.
//! > coin one
//! Payment complete: $2.00 against $1.50. Press dispense.
//! > dispense
//! Enjoy your Cola! Change: $0.50
//! ```

mod commands;

use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use vendo_machine::outcome::{CancelOutcome, DispenseOutcome, SelectOutcome, TenderOutcome};
use vendo_machine::{Money, Product, VendingMachine};

use commands::{parse, Command, HELP};

/// Initializes tracing (logging).
///
/// Default level: INFO. Override with RUST_LOG, e.g.
/// `RUST_LOG=vendo_machine=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Seeds the demo inventory: the classic three-product machine.
fn seed(machine: &VendingMachine) {
    for (name, cents, quantity) in [("Cola", 150, 10), ("Chips", 100, 5), ("Candy", 75, 20)] {
        match Product::new(name, Money::from_cents(cents)) {
            Ok(product) => machine.restock(product, quantity),
            Err(err) => eprintln!("bad seed product {name}: {err}"),
        }
    }
}

fn main() {
    init_tracing();
    info!("starting vendo simulator");

    let machine = VendingMachine::new();
    seed(&machine);

    println!("Vendo simulator. Type `help` for commands.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(err) => {
                eprintln!("read error: {err}");
                break;
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        match parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => run_command(&machine, command),
            Err(err) => println!("{err}"),
        }
    }

    // The collection round a real operator would do before walking away.
    let remaining = machine.collect();
    if remaining.is_positive() {
        println!("Collected {remaining} on shutdown.");
    }
    info!("simulator stopped");
}

/// Executes one parsed command and prints what the front panel would show.
fn run_command(machine: &VendingMachine, command: Command) {
    match command {
        Command::Select { name } => match machine.select(&name) {
            SelectOutcome::Accepted { product } => {
                println!("Selected {product}. Insert coins or notes.");
            }
            SelectOutcome::ProductUnavailable { name } => {
                println!("'{name}' is not available.");
            }
            SelectOutcome::AlreadySelected { selected } => {
                println!("Already vending {}. Cancel first to change.", selected.name());
            }
        },
        Command::Insert(tender) => match machine.insert_tender(tender) {
            TenderOutcome::PaymentComplete { paid, price } => {
                println!("Payment complete: {paid} against {price}. Press dispense.");
            }
            TenderOutcome::InsufficientFunds { paid, short } => {
                println!("Accepted. Paid {paid}, {short} still needed.");
            }
            TenderOutcome::NoSelection { returned } => {
                println!("Returned {returned}: select a product first.");
            }
            TenderOutcome::RefusedWhileDispensing { returned } => {
                println!("Returned {returned}: payment already complete.");
            }
        },
        Command::Dispense => match machine.dispense() {
            DispenseOutcome::Dispensed { product, change, .. } => {
                if change.is_positive() {
                    println!("Enjoy your {}! Change: {change}", product.name());
                } else {
                    println!("Enjoy your {}!", product.name());
                }
            }
            DispenseOutcome::PaymentIncomplete { paid, short } => {
                println!("Paid {paid} so far, {short} still needed.");
            }
            DispenseOutcome::NoSelection => {
                println!("Select a product first.");
            }
            DispenseOutcome::Failed { product, refund } => {
                println!("{} is out of stock. Refunding {refund}.", product.name());
            }
        },
        Command::Cancel => match machine.cancel() {
            CancelOutcome::Cancelled { refund } => {
                if refund.is_positive() {
                    println!("Cancelled. Refunding {refund}.");
                } else {
                    println!("Cancelled.");
                }
            }
            CancelOutcome::NothingToCancel => {
                println!("Nothing to cancel.");
            }
            CancelOutcome::RefusedWhileDispensing => {
                println!("Payment already complete: press dispense.");
            }
        },
        Command::Restock {
            name,
            quantity,
            price,
        } => match Product::new(name, price) {
            Ok(product) => {
                machine.restock(product, quantity);
                println!("Restocked.");
            }
            Err(err) => println!("{err}"),
        },
        Command::Unload { name, quantity } => {
            let removed = machine.unload(&name, quantity);
            println!("Removed {removed} unit(s) of {name}.");
        }
        Command::Collect => {
            let amount = machine.collect();
            println!("Collected {amount}.");
        }
        Command::Status => {
            let snapshot = machine.snapshot();
            let selection = snapshot.selection.as_deref().unwrap_or("-");
            println!(
                "state: {} | selection: {} | paid: {}",
                snapshot.state,
                selection,
                Money::from_cents(snapshot.payment_cents),
            );
        }
        Command::Snapshot => match serde_json::to_string_pretty(&machine.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("snapshot serialization failed: {err}"),
        },
        Command::Help => println!("{HELP}"),
        // Quit is handled by the main loop before we get here.
        Command::Quit => {}
    }
}
