//! CSV format handling for statement export
//!
//! This module centralizes the statement export format, providing:
//! - StatementRow structure for serialization
//! - Conversion from transaction records to export rows
//! - Statement serialization to any writer
//!
//! All functions are pure (no file handling) for easy testing.

use crate::types::{TransactionKind, TransactionRecord};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// CSV row structure for statement export
///
/// Matches the export format with columns:
/// timestamp, type, amount, balance_after, counterparty.
/// Timestamps serialize as RFC 3339; an absent counterparty becomes an
/// empty field.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StatementRow {
    /// Record timestamp, serialized as RFC 3339
    pub timestamp: DateTime<Utc>,

    /// The transaction kind in its snake_case wire form
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Amount moved (fee-inclusive for withdrawals)
    pub amount: Decimal,

    /// Balance immediately after the transaction
    pub balance_after: Decimal,

    /// Counterparty account name, or empty when there is none
    pub counterparty: String,
}

impl From<&TransactionRecord> for StatementRow {
    fn from(record: &TransactionRecord) -> Self {
        StatementRow {
            timestamp: record.timestamp,
            kind: record.kind,
            amount: record.amount,
            balance_after: record.balance_after,
            counterparty: record.counterparty.clone().unwrap_or_default(),
        }
    }
}

/// Write a statement to CSV format
///
/// Writes the header row followed by one row per record in the given
/// order. The header is written even when there are no records.
///
/// # Arguments
///
/// * `records` - Statement records to write, oldest first
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_statement_csv(
    records: &[&TransactionRecord],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::WriterBuilder;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    // Write header
    writer
        .write_record(["timestamp", "type", "amount", "balance_after", "counterparty"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    // Write each record
    for record in records {
        writer
            .serialize(StatementRow::from(*record))
            .map_err(|e| format!("Failed to write statement row: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
