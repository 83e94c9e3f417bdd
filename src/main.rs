//! Bookkeeping Engine CLI
//!
//! Command-line interface that drives the lending and ledger engines
//! through scripted demo scenarios.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --demo library
//! cargo run -- --demo bank
//! cargo run -- --demo bank --export-statement alice.csv
//! RUST_LOG=bookkeeping_engine=debug cargo run
//! ```
//!
//! The library demo catalogs a few copies, runs checkouts and a return,
//! and prints the inventory and circulation log. The bank demo opens two
//! accounts, moves money between them, accrues interest, and prints the
//! balances and the ledger. `--export-statement` additionally writes one
//! account's statement to a CSV file.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (demo setup failed, statement export failed, etc.)

use bookkeeping_engine::cli;
use bookkeeping_engine::core::{
    LedgerEngine, LendingEngine, StatementFilter, DEFAULT_LOAN_PERIOD_DAYS,
};
use bookkeeping_engine::io::write_statement_csv;
use bookkeeping_engine::types::{AccountKind, BookCopy, Medium, Patron};
use rust_decimal::Decimal;
use std::fs::File;
use std::path::Path;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

fn main() {
    // Log to stderr so the demo transcript on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
                )),
        )
        .init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    if let Err(e) = run_demos(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Run the demos selected on the command line.
fn run_demos(args: &cli::CliArgs) -> Result<(), String> {
    if args.demo.includes_library() {
        run_library_demo()?;
    }
    if args.demo.includes_bank() {
        if args.demo.includes_library() {
            println!();
        }
        run_bank_demo(args.export_statement.as_deref())?;
    }
    Ok(())
}

/// Catalog a few copies, check them out, and return one.
///
/// Checkout failures are part of the script and print inline; only
/// setup failures abort the demo.
fn run_library_demo() -> Result<(), String> {
    let mut library = LendingEngine::new();

    library
        .add_copy(BookCopy::new(
            "The Hobbit",
            "J.R.R. Tolkien",
            1,
            Medium::Physical {
                shelf_location: "A3".to_string(),
            },
        ))
        .map_err(|e| format!("Failed to catalog copy: {}", e))?;
    library
        .add_copy(BookCopy::new(
            "The Hobbit",
            "J.R.R. Tolkien",
            2,
            Medium::Physical {
                shelf_location: "A3".to_string(),
            },
        ))
        .map_err(|e| format!("Failed to catalog copy: {}", e))?;
    library
        .add_copy(BookCopy::new(
            "1984",
            "George Orwell",
            1,
            Medium::Digital { file_size_mb: 2.5 },
        ))
        .map_err(|e| format!("Failed to catalog copy: {}", e))?;

    library
        .register_patron(Patron::new("Alice", 3))
        .map_err(|e| format!("Failed to register patron: {}", e))?;
    library
        .register_patron(Patron::new("Bob", 3))
        .map_err(|e| format!("Failed to register patron: {}", e))?;

    println!("=== Library Demo ===");

    println!("\n--- Inventory ---");
    for copy in library.get_all_copies() {
        println!("{}", copy);
    }

    println!("\n--- Search 'the' ---");
    let matches = library.search("the");
    println!("{} copies found for 'the'", matches.len());
    for copy in matches {
        println!("{}", copy);
    }

    println!("\n--- Checkouts ---");
    for (title, patron) in [
        ("The Hobbit", "Alice"),
        ("The Hobbit", "Bob"),
        ("The Hobbit", "Alice"),
    ] {
        match library.checkout(title, patron, DEFAULT_LOAN_PERIOD_DAYS) {
            Ok(key) => println!("{} checked out by {}", key, patron),
            Err(e) => println!("{}", e),
        }
    }

    println!("\n--- Alice Loans ---");
    print_loans(&library, "Alice")?;

    println!("\n--- Returns ---");
    match library.return_copy("The Hobbit", "Alice") {
        Ok(key) => println!("{} returned by Alice", key),
        Err(e) => println!("{}", e),
    }

    println!("\n--- Final Inventory ---");
    for copy in library.get_all_copies() {
        println!("{}", copy);
    }

    println!("\n--- Circulation Log ---");
    for event in library.circulation_log() {
        println!("{}", event);
    }

    Ok(())
}

/// Print a patron's loan count and each open loan with its due date.
fn print_loans(library: &LendingEngine, name: &str) -> Result<(), String> {
    let patron = library
        .get_patron(name)
        .ok_or_else(|| format!("No patron named {}", name))?;
    println!(
        "{} currently has {} of a maximum {} copies checked out",
        patron.name(),
        patron.loan_count(),
        patron.max_loans()
    );

    // Loans iterate in hash order; sort for stable output
    let mut loans: Vec<_> = patron.loans().collect();
    loans.sort_by_key(|(key, _)| (key.title.clone(), key.copy_id));
    for (key, loan) in loans {
        println!("  {} (due {})", key, loan.due_at.format("%Y-%m-%d"));
    }
    Ok(())
}

/// Open two accounts, move money between them, and accrue interest.
fn run_bank_demo(export: Option<&Path>) -> Result<(), String> {
    let mut bank = LedgerEngine::new();

    bank.open_account("Alice", AccountKind::Checking)
        .map_err(|e| format!("Failed to open account: {}", e))?;
    bank.open_account("Bob", AccountKind::Savings)
        .map_err(|e| format!("Failed to open account: {}", e))?;

    println!("=== Bank Demo ===");

    let balance = bank
        .deposit("Alice", Decimal::new(100, 0))
        .map_err(|e| format!("Deposit failed: {}", e))?;
    println!("Deposited 100 to Alice (balance {})", balance);

    let balance = bank
        .withdraw("Alice", Decimal::new(20, 0))
        .map_err(|e| format!("Withdrawal failed: {}", e))?;
    println!("Withdrew 20 from Alice (balance {})", balance);

    bank.transfer("Alice", "Bob", Decimal::new(50, 0))
        .map_err(|e| format!("Transfer failed: {}", e))?;
    println!("Transferred 50 from Alice to Bob");

    let rate = Decimal::new(5, 2);
    let count = bank
        .apply_interest_all(rate)
        .map_err(|e| format!("Interest run failed: {}", e))?;
    println!(
        "Applied {}% interest to {} account(s)",
        rate * Decimal::ONE_HUNDRED,
        count
    );

    println!("\n--- Balances ---");
    for account in bank.get_all_accounts() {
        println!("{}", account);
    }

    println!("\n--- Ledger ---");
    for entry in bank.ledger() {
        println!("{}", entry);
    }

    if let Some(path) = export {
        let records = bank
            .statement("Alice", &StatementFilter::default())
            .map_err(|e| format!("Failed to read statement: {}", e))?;
        let mut file = File::create(path)
            .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
        write_statement_csv(&records, &mut file)?;
        println!("\nExported Alice's statement to {}", path.display());
    }

    Ok(())
}
