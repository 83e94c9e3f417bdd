//! Ledger engine module
//!
//! This module provides the `LedgerEngine` struct which owns the account
//! registry and the bank-wide ledger, and applies the deposit, withdrawal,
//! transfer, and interest rules over them.
//!
//! The LedgerEngine is responsible for:
//! - Opening accounts through the registry (one per name)
//! - Validating every operation fully before any balance moves
//! - Applying the per-variant policy table (withdrawal fee, interest eligibility)
//! - Copying every appended transaction record to the bank-wide ledger
//!
//! A failed operation leaves every account and the ledger exactly as they
//! were; a compound operation (transfer) is never partially applied.

use crate::core::audit::AuditLog;
use crate::core::registry::EntityRegistry;
use crate::types::{
    Account, AccountKind, BookkeepingError, LedgerEntry, TransactionKind, TransactionRecord,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

/// Criteria for narrowing one account's statement
///
/// All fields are optional; an empty filter matches every record.
/// Timestamp bounds are inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementFilter {
    /// Keep records at or after this instant
    pub start: Option<DateTime<Utc>>,

    /// Keep records at or before this instant
    pub end: Option<DateTime<Utc>>,

    /// Keep records of this kind only
    pub kind: Option<TransactionKind>,
}

impl StatementFilter {
    /// Whether a record passes every criterion that is set
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        if let Some(start) = self.start {
            if record.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if record.timestamp > end {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if record.kind != kind {
                return false;
            }
        }
        true
    }
}

/// Bookkeeping rules over a registry of accounts
///
/// Owns the accounts and the bank-wide ledger; accounts themselves hold no
/// reference back to the engine. Every successful mutation appends one
/// record to the account's history and a copy to the ledger.
pub struct LedgerEngine {
    /// Accounts in opening order
    accounts: EntityRegistry<Account>,

    /// Bank-wide ledger: every record of every account, in order
    ledger: AuditLog<LedgerEntry>,
}

impl LedgerEngine {
    /// Create an engine with no accounts and an empty ledger
    pub fn new() -> Self {
        LedgerEngine {
            accounts: EntityRegistry::new(),
            ledger: AuditLog::new(),
        }
    }

    /// Open an account with a zero balance
    ///
    /// # Arguments
    ///
    /// * `name` - The account name (registry key)
    /// * `kind` - The account variant
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if an account with this name already exists.
    pub fn open_account(&mut self, name: &str, kind: AccountKind) -> Result<(), BookkeepingError> {
        self.accounts.add(Account::new(name, kind))?;
        debug!("Opened {kind} account for {name}");
        Ok(())
    }

    /// Deposit funds into an account
    ///
    /// # Returns
    ///
    /// The balance after the deposit.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - The amount is zero or negative
    /// * `NotFound` - No account with this name exists
    pub fn deposit(&mut self, name: &str, amount: Decimal) -> Result<Decimal, BookkeepingError> {
        if amount <= Decimal::ZERO {
            return Err(BookkeepingError::invalid_amount("deposit", amount));
        }

        let account = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| BookkeepingError::not_found("account", name))?;

        let record = account.credit(amount, TransactionKind::Deposit, None, Utc::now())?;
        let balance = record.balance_after;
        self.ledger.append(LedgerEntry {
            account: name.to_string(),
            record,
        });
        debug!("Deposited {amount} into {name}");

        Ok(balance)
    }

    /// Withdraw funds from an account
    ///
    /// The account variant's fee is added on top of the requested amount,
    /// the funds check runs against that fee-inclusive total, and the
    /// recorded withdrawal amount includes the fee.
    ///
    /// # Returns
    ///
    /// The balance after the withdrawal.
    ///
    /// # Errors
    ///
    /// * `NotFound` - No account with this name exists
    /// * `InvalidAmount` - A fee-charging variant was asked for a zero or
    ///   negative amount
    /// * `InsufficientFunds` - The fee-inclusive debit is non-positive or
    ///   exceeds the balance
    pub fn withdraw(&mut self, name: &str, amount: Decimal) -> Result<Decimal, BookkeepingError> {
        let account = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| BookkeepingError::not_found("account", name))?;

        // Fee-charging variants reject a non-positive request before the fee lands on top
        let fee = account.kind().withdrawal_fee();
        if !fee.is_zero() && amount <= Decimal::ZERO {
            return Err(BookkeepingError::invalid_amount("withdraw", amount));
        }

        let effective = amount
            .checked_add(fee)
            .ok_or_else(|| BookkeepingError::arithmetic_overflow("withdraw", name))?;

        if effective <= Decimal::ZERO || effective > account.balance() {
            return Err(BookkeepingError::insufficient_funds(
                name,
                account.balance(),
                effective,
            ));
        }

        let record = account.debit(effective, TransactionKind::Withdraw, None, Utc::now())?;
        let balance = record.balance_after;
        self.ledger.append(LedgerEntry {
            account: name.to_string(),
            record,
        });
        debug!("Withdrew {effective} from {name}");

        Ok(balance)
    }

    /// Move funds between two accounts
    ///
    /// No variant fee applies to either side; transfers bypass the
    /// withdrawal policy by contract. Both sides are validated before
    /// either balance moves, so a transfer can never be half-applied.
    /// Each account gets exactly one record, both records share one
    /// timestamp and name each other as counterparty, and both are
    /// copied to the ledger.
    ///
    /// # Errors
    ///
    /// * `NotFound` - Either account name is unknown
    /// * `InsufficientFunds` - The amount is non-positive or exceeds the
    ///   source balance
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<(), BookkeepingError> {
        let from_balance = self
            .accounts
            .get(from)
            .ok_or_else(|| BookkeepingError::not_found("account", from))?
            .balance();
        let to_balance = self
            .accounts
            .get(to)
            .ok_or_else(|| BookkeepingError::not_found("account", to))?
            .balance();

        if amount <= Decimal::ZERO || amount > from_balance {
            return Err(BookkeepingError::insufficient_funds(
                from,
                from_balance,
                amount,
            ));
        }

        // Pre-flight the credit so a failed add can never leave `from` debited
        if to_balance.checked_add(amount).is_none() {
            return Err(BookkeepingError::arithmetic_overflow("transfer_in", to));
        }

        // One timestamp shared by both sides of the pair
        let timestamp = Utc::now();

        let out_record = self
            .accounts
            .get_mut(from)
            .ok_or_else(|| BookkeepingError::not_found("account", from))?
            .debit(
                amount,
                TransactionKind::TransferOut,
                Some(to.to_string()),
                timestamp,
            )?;
        self.ledger.append(LedgerEntry {
            account: from.to_string(),
            record: out_record,
        });

        let in_record = self
            .accounts
            .get_mut(to)
            .ok_or_else(|| BookkeepingError::not_found("account", to))?
            .credit(
                amount,
                TransactionKind::TransferIn,
                Some(from.to_string()),
                timestamp,
            )?;
        self.ledger.append(LedgerEntry {
            account: to.to_string(),
            record: in_record,
        });

        debug!("Transferred {amount} from {from} to {to}");
        Ok(())
    }

    /// Credit interest to a savings account
    ///
    /// The earned amount is `balance * rate`, recorded even when it comes
    /// to zero.
    ///
    /// # Returns
    ///
    /// The balance after the interest credit.
    ///
    /// # Errors
    ///
    /// * `NotFound` - No account with this name exists
    /// * `UnsupportedOperation` - The account variant does not earn interest
    /// * `InvalidRate` - The rate is negative
    pub fn apply_interest(
        &mut self,
        name: &str,
        rate: Decimal,
    ) -> Result<Decimal, BookkeepingError> {
        let account = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| BookkeepingError::not_found("account", name))?;

        // Capability check comes before rate validation
        if !account.kind().earns_interest() {
            return Err(BookkeepingError::unsupported_operation(
                name,
                account.kind().as_str(),
                "apply_interest",
            ));
        }
        if rate < Decimal::ZERO {
            return Err(BookkeepingError::invalid_rate(rate));
        }

        let earned = account
            .balance()
            .checked_mul(rate)
            .ok_or_else(|| BookkeepingError::arithmetic_overflow("interest", name))?;

        let record = account.credit(earned, TransactionKind::Interest, None, Utc::now())?;
        let balance = record.balance_after;
        self.ledger.append(LedgerEntry {
            account: name.to_string(),
            record,
        });
        debug!("Applied interest {earned} to {name}");

        Ok(balance)
    }

    /// Credit interest to every savings account
    ///
    /// Accounts are visited in opening order; non-savings accounts are
    /// untouched.
    ///
    /// # Returns
    ///
    /// The number of accounts credited.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` before touching any account if the rate is
    /// negative.
    pub fn apply_interest_all(&mut self, rate: Decimal) -> Result<usize, BookkeepingError> {
        if rate < Decimal::ZERO {
            return Err(BookkeepingError::invalid_rate(rate));
        }

        let names: Vec<String> = self
            .accounts
            .filter(|account| account.kind().earns_interest())
            .map(|account| account.name().to_string())
            .collect();

        for name in &names {
            self.apply_interest(name, rate)?;
        }

        Ok(names.len())
    }

    /// One account's history narrowed by a filter, oldest record first
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account with this name exists.
    pub fn statement(
        &self,
        name: &str,
        filter: &StatementFilter,
    ) -> Result<Vec<&TransactionRecord>, BookkeepingError> {
        let account = self
            .accounts
            .get(name)
            .ok_or_else(|| BookkeepingError::not_found("account", name))?;

        Ok(account
            .history()
            .iter()
            .filter(|record| filter.matches(record))
            .collect())
    }

    /// Look up one account by name
    pub fn get_account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    /// All accounts in opening order
    pub fn get_all_accounts(&self) -> Vec<&Account> {
        self.accounts.all().collect()
    }

    /// The bank-wide ledger, oldest entry first
    pub fn ledger(&self) -> &AuditLog<LedgerEntry> {
        &self.ledger
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new()
    }
}
