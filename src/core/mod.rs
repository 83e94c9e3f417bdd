//! Core business logic module
//!
//! This module contains the bookkeeping components:
//! - `registry` - Keyed, insertion-ordered entity storage
//! - `audit` - Append-only event logs
//! - `lending` - Library circulation rules (checkout, return, search)
//! - `ledger` - Bank account rules and the bank-wide ledger

pub mod audit;
pub mod lending;
pub mod ledger;
pub mod registry;

pub use audit::AuditLog;
pub use lending::{LendingEngine, DEFAULT_LOAN_PERIOD_DAYS};
pub use ledger::{LedgerEngine, StatementFilter};
pub use registry::{Entity, EntityRegistry};
