//! Transaction-related types for the bookkeeping engine
//!
//! This module defines the immutable records the ledger engine appends to
//! per-account histories and to the bank-wide ledger. The io layer maps
//! records onto CSV statement rows; only the kind enum carries its wire
//! name here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Transaction kinds recorded by the ledger engine
///
/// Deposits, interest, and incoming transfers add to a balance;
/// withdrawals and outgoing transfers subtract from it. Transfers always
/// produce a matched out/in pair across two accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Funds paid into an account
    Deposit,

    /// Funds taken out of an account (fee-inclusive where a fee applies)
    Withdraw,

    /// Funds sent to another account
    TransferOut,

    /// Funds received from another account
    TransferIn,

    /// Interest credited to a savings account
    Interest,
}

impl TransactionKind {
    /// The snake_case wire name, as written to CSV statements
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
            TransactionKind::TransferOut => "transfer_out",
            TransactionKind::TransferIn => "transfer_in",
            TransactionKind::Interest => "interest",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in an account's transaction history
///
/// Immutable once appended. The amount is always positive; the kind
/// carries the sign.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// When the transaction was applied
    pub timestamp: DateTime<Utc>,

    /// What kind of transaction this was
    pub kind: TransactionKind,

    /// The positive amount moved (fee-inclusive for withdrawals)
    pub amount: Decimal,

    /// The account balance immediately after this transaction
    pub balance_after: Decimal,

    /// The other account in a transfer, if any
    pub counterparty: Option<String>,
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.amount)?;
        if let Some(other) = &self.counterparty {
            let preposition = match self.kind {
                TransactionKind::TransferIn => "from",
                _ => "to",
            };
            write!(f, " {preposition} {other}")?;
        }
        write!(f, " (balance {})", self.balance_after)
    }
}

/// One entry in the bank-wide ledger
///
/// A copy of an account's transaction record with the owning account's
/// name attached, appended in the same order the transactions happened.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    /// Name of the account the record belongs to
    pub account: String,

    /// The transaction record as it appears in that account's history
    pub record: TransactionRecord,
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.account,
            self.record
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn record(kind: TransactionKind, counterparty: Option<&str>) -> TransactionRecord {
        TransactionRecord {
            timestamp: Utc.with_ymd_and_hms(2026, 8, 25, 10, 0, 0).unwrap(),
            kind,
            amount: Decimal::new(50, 0),
            balance_after: Decimal::new(150, 0),
            counterparty: counterparty.map(str::to_string),
        }
    }

    #[rstest]
    #[case::deposit(TransactionKind::Deposit, "deposit")]
    #[case::withdraw(TransactionKind::Withdraw, "withdraw")]
    #[case::transfer_out(TransactionKind::TransferOut, "transfer_out")]
    #[case::transfer_in(TransactionKind::TransferIn, "transfer_in")]
    #[case::interest(TransactionKind::Interest, "interest")]
    fn test_kind_wire_names(#[case] kind: TransactionKind, #[case] expected: &str) {
        assert_eq!(kind.as_str(), expected);
        assert_eq!(kind.to_string(), expected);
    }

    #[rstest]
    #[case::plain(
        record(TransactionKind::Deposit, None),
        "deposit 50 (balance 150)"
    )]
    #[case::outgoing(
        record(TransactionKind::TransferOut, Some("Bob")),
        "transfer_out 50 to Bob (balance 150)"
    )]
    #[case::incoming(
        record(TransactionKind::TransferIn, Some("Alice")),
        "transfer_in 50 from Alice (balance 150)"
    )]
    fn test_record_display(#[case] record: TransactionRecord, #[case] expected: &str) {
        assert_eq!(record.to_string(), expected);
    }

    #[test]
    fn test_ledger_entry_display_includes_account_and_timestamp() {
        let entry = LedgerEntry {
            account: "Alice".to_string(),
            record: record(TransactionKind::Deposit, None),
        };
        assert_eq!(
            entry.to_string(),
            "[2026-08-25 10:00:00] Alice: deposit 50 (balance 150)"
        );
    }
}
