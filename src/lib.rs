//! Bookkeeping Engine Library
//! # Overview
//!
//! This library provides two small in-memory bookkeeping state machines that
//! share one architectural pattern: an entity registry, a rule engine over
//! it, and an append-only audit trail.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (BookCopy, Patron, Account, records, errors)
//! - [`cli`] - CLI argument parsing for the demo binary
//! - [`core`] - Business logic components:
//!   - [`core::registry`] - Keyed, insertion-ordered entity storage
//!   - [`core::audit`] - Append-only event logs
//!   - [`core::lending`] - Library circulation rules
//!   - [`core::ledger`] - Bank account rules and the bank-wide ledger
//! - [`io`] - CSV statement export
//!
//! # Lending Rules
//!
//! A checkout picks the lowest-numbered available copy of an exact title,
//! enforces the patron's loan limit, and records the loan with a due date.
//! A return validates the copy against the catalog and the patron's
//! holdings before freeing it.
//!
//! # Ledger Rules
//!
//! Accounts come in three variants. Checking accounts pay a fixed fee of one
//! unit per withdrawal; savings accounts earn interest; transfers move funds
//! between any two accounts with no fee and one matched record per side.
//! Every successful mutation appends to the owning account's history and to
//! the bank-wide ledger, so a balance is always the fold of its records.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{AuditLog, Entity, EntityRegistry, LendingEngine, LedgerEngine, StatementFilter};
pub use io::write_statement_csv;
pub use types::{
    Account, AccountKind, Availability, BookCopy, BookkeepingError, CirculationAction,
    CirculationEvent, CopyKey, LedgerEntry, Loan, Medium, Patron, TransactionKind,
    TransactionRecord,
};
