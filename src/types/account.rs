//! Account-related types for the bookkeeping engine
//!
//! This module defines the account variants, the per-variant policy table
//! (withdrawal fee, interest eligibility), and the account state itself.
//! Balance and history are private and only move together: the crate-level
//! mutation paths append a record for every balance change, so the balance
//! always equals the signed fold of the history.

use super::error::BookkeepingError;
use super::transaction::{TransactionKind, TransactionRecord};
use crate::core::registry::Entity;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Account variants and their policy table
///
/// The variant decides the withdrawal fee and whether the account earns
/// interest. Everything else behaves identically across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Plain account with no fee and no interest
    Basic,

    /// Fee-charging account: every withdrawal debits a fixed fee on top
    Checking,

    /// Interest-earning account
    Savings,
}

impl AccountKind {
    /// Fixed fee added to every withdrawal from this variant
    pub fn withdrawal_fee(&self) -> Decimal {
        match self {
            AccountKind::Checking => Decimal::ONE,
            AccountKind::Basic | AccountKind::Savings => Decimal::ZERO,
        }
    }

    /// Whether `apply_interest` is part of this variant's capability set
    pub fn earns_interest(&self) -> bool {
        matches!(self, AccountKind::Savings)
    }

    /// Lowercase variant name, as used in error messages and listings
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Basic => "basic",
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named bank account
///
/// Created via the ledger engine's factory, never destroyed. Holds no
/// reference to the bank that owns it; the engine passes ledger copies of
/// each record to the bank-wide log itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    name: String,
    kind: AccountKind,
    balance: Decimal,
    history: Vec<TransactionRecord>,
}

impl Account {
    /// Create an account with a zero balance and empty history
    ///
    /// # Arguments
    ///
    /// * `name` - The account name (registry key)
    /// * `kind` - The account variant
    pub fn new(name: &str, kind: AccountKind) -> Self {
        Account {
            name: name.to_string(),
            kind,
            balance: Decimal::ZERO,
            history: Vec::new(),
        }
    }

    /// The account name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The account variant
    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// The account's transaction history, oldest first
    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Add to the balance and append the matching record
    ///
    /// Callers validate the business rules first; this path only guards
    /// against arithmetic overflow so balance and history stay in sync.
    ///
    /// # Returns
    ///
    /// A copy of the appended record, for the bank-wide ledger.
    pub(crate) fn credit(
        &mut self,
        amount: Decimal,
        kind: TransactionKind,
        counterparty: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<TransactionRecord, BookkeepingError> {
        let balance_after = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| BookkeepingError::arithmetic_overflow(kind.as_str(), &self.name))?;

        self.balance = balance_after;
        let record = TransactionRecord {
            timestamp,
            kind,
            amount,
            balance_after,
            counterparty,
        };
        self.history.push(record.clone());
        Ok(record)
    }

    /// Subtract from the balance and append the matching record
    ///
    /// Callers check funds sufficiency first; this path only guards
    /// against arithmetic underflow so balance and history stay in sync.
    ///
    /// # Returns
    ///
    /// A copy of the appended record, for the bank-wide ledger.
    pub(crate) fn debit(
        &mut self,
        amount: Decimal,
        kind: TransactionKind,
        counterparty: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<TransactionRecord, BookkeepingError> {
        let balance_after = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BookkeepingError::arithmetic_underflow(kind.as_str(), &self.name))?;

        self.balance = balance_after;
        let record = TransactionRecord {
            timestamp,
            kind,
            amount,
            balance_after,
            counterparty,
        };
        self.history.push(record.clone());
        Ok(record)
    }
}

impl Entity for Account {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) balance {}", self.name, self.kind, self.balance)
    }
}
