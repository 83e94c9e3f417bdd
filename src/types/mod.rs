//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: account state and the per-variant policy table
//! - `book`: catalog copies, keys, medium, and availability
//! - `circulation`: lending audit entries
//! - `error`: error types for the bookkeeping engine
//! - `patron`: patrons and their active loans
//! - `transaction`: transaction records and ledger entries

pub mod account;
pub mod book;
pub mod circulation;
pub mod error;
pub mod patron;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use book::{Availability, BookCopy, CopyKey, Medium};
pub use circulation::{CirculationAction, CirculationEvent};
pub use error::BookkeepingError;
pub use patron::{Loan, Patron};
pub use transaction::{LedgerEntry, TransactionKind, TransactionRecord};
