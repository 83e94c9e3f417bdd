//! Error types for the bookkeeping engine
//!
//! This module defines all error conditions the lending and ledger engines can
//! report. Every variant is a local, recoverable condition returned to the
//! caller as a value; the core never prints and never panics.
//!
//! # Error Categories
//!
//! - **Registry Errors**: duplicate or missing keys
//! - **Lending Errors**: no available copy, loan limit reached, bad returns
//! - **Ledger Errors**: invalid amounts, insufficient funds, invalid rates,
//!   capability mismatches
//! - **Arithmetic Errors**: overflow, underflow in balance calculations

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bookkeeping engine
///
/// This enum represents all possible failures of registry, lending, and
/// ledger operations. Each variant includes relevant context to help
/// diagnose the condition; turning these into user-facing messages is
/// the presentation layer's job.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookkeepingError {
    /// An entity with the same key is already registered
    ///
    /// This is a recoverable error - the existing entity is untouched.
    #[error("Duplicate key '{key}' already registered")]
    DuplicateKey {
        /// Display form of the colliding key
        key: String,
    },

    /// A keyed lookup required by an operation found nothing
    ///
    /// Plain lookups report absence as `None`; engines raise this when an
    /// operation cannot proceed without the entity.
    #[error("No {entity} found for key '{key}'")]
    NotFound {
        /// The entity category that was searched ("patron", "account", ...)
        entity: String,
        /// Display form of the missing key
        key: String,
    },

    /// Every copy of the requested title is checked out, or none exists
    ///
    /// This is a recoverable error - the checkout is rejected and the
    /// catalog remains unchanged.
    #[error("No available copy of '{title}'")]
    NoCopyAvailable {
        /// The requested title
        title: String,
    },

    /// The patron already holds the maximum number of concurrent loans
    ///
    /// This is a recoverable error - the checkout is rejected.
    #[error("{patron} already has the maximum of {max_loans} borrowed copies")]
    LoanLimitExceeded {
        /// Patron name
        patron: String,
        /// The patron's loan limit
        max_loans: u32,
    },

    /// No copy of the title is checked out anywhere in the catalog
    ///
    /// This is a recoverable error - the return is rejected.
    #[error("No copies of '{title}' are currently checked out")]
    NotCheckedOut {
        /// The requested title
        title: String,
    },

    /// Copies of the title are checked out, but not by this patron
    ///
    /// This is a recoverable error - the return is rejected.
    #[error("{patron} has no copies of '{title}' to return")]
    NotBorrowedByPatron {
        /// The requested title
        title: String,
        /// Patron name
        patron: String,
    },

    /// A non-positive amount was supplied where a positive one is required
    ///
    /// This is a recoverable error - the operation is rejected and the
    /// account state remains unchanged.
    #[error("Invalid amount {amount} for {operation}")]
    InvalidAmount {
        /// Operation that rejected the amount
        operation: String,
        /// The offending amount
        amount: Decimal,
    },

    /// The debit would exceed the account balance
    ///
    /// Where a withdrawal fee applies, `requested` is the fee-inclusive
    /// total. This is a recoverable error - the withdrawal is rejected
    /// and the account state remains unchanged.
    #[error("Insufficient funds for {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account name
        account: String,
        /// Current balance
        balance: Decimal,
        /// Requested debit, including any fee
        requested: Decimal,
    },

    /// A negative interest rate was supplied
    ///
    /// This is a recoverable error - no interest is credited.
    #[error("Invalid interest rate: {rate}")]
    InvalidRate {
        /// The offending rate
        rate: Decimal,
    },

    /// The operation is not part of this account variant's capability set
    ///
    /// This is a recoverable error - the operation is rejected.
    #[error("{operation} is not supported on {kind} account '{account}'")]
    UnsupportedOperation {
        /// Account name
        account: String,
        /// The account variant ("basic", "checking", "savings")
        kind: String,
        /// The rejected operation
        operation: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// This is a recoverable error - the operation is rejected
    /// to keep balance and history consistent.
    #[error("Arithmetic overflow in {operation} for {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account name
        account: String,
    },

    /// Arithmetic underflow would occur
    ///
    /// This is a recoverable error - the operation is rejected
    /// to keep balance and history consistent.
    #[error("Arithmetic underflow in {operation} for {account}")]
    ArithmeticUnderflow {
        /// Operation that would underflow
        operation: String,
        /// Account name
        account: String,
    },
}

// Helper functions for creating common errors

impl BookkeepingError {
    /// Create a DuplicateKey error from any displayable key
    pub fn duplicate_key(key: impl ToString) -> Self {
        BookkeepingError::DuplicateKey {
            key: key.to_string(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(entity: &str, key: impl ToString) -> Self {
        BookkeepingError::NotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }

    /// Create a NoCopyAvailable error
    pub fn no_copy_available(title: &str) -> Self {
        BookkeepingError::NoCopyAvailable {
            title: title.to_string(),
        }
    }

    /// Create a LoanLimitExceeded error
    pub fn loan_limit_exceeded(patron: &str, max_loans: u32) -> Self {
        BookkeepingError::LoanLimitExceeded {
            patron: patron.to_string(),
            max_loans,
        }
    }

    /// Create a NotCheckedOut error
    pub fn not_checked_out(title: &str) -> Self {
        BookkeepingError::NotCheckedOut {
            title: title.to_string(),
        }
    }

    /// Create a NotBorrowedByPatron error
    pub fn not_borrowed_by_patron(title: &str, patron: &str) -> Self {
        BookkeepingError::NotBorrowedByPatron {
            title: title.to_string(),
            patron: patron.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(operation: &str, amount: Decimal) -> Self {
        BookkeepingError::InvalidAmount {
            operation: operation.to_string(),
            amount,
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        BookkeepingError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create an InvalidRate error
    pub fn invalid_rate(rate: Decimal) -> Self {
        BookkeepingError::InvalidRate { rate }
    }

    /// Create an UnsupportedOperation error
    pub fn unsupported_operation(account: &str, kind: &str, operation: &str) -> Self {
        BookkeepingError::UnsupportedOperation {
            account: account.to_string(),
            kind: kind.to_string(),
            operation: operation.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        BookkeepingError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an ArithmeticUnderflow error
    pub fn arithmetic_underflow(operation: &str, account: &str) -> Self {
        BookkeepingError::ArithmeticUnderflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }
}
