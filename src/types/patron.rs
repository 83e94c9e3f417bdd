//! Patron types for the bookkeeping engine
//!
//! A patron is a named borrower with a loan limit and a map of the copies
//! currently checked out to them. The loan count is always derived from
//! that map, so count and holdings can never drift apart.

use super::book::CopyKey;
use crate::core::registry::Entity;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One active loan held by a patron
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loan {
    /// When the copy was checked out
    pub checked_out_at: DateTime<Utc>,

    /// When the copy is due back
    pub due_at: DateTime<Utc>,
}

/// A registered borrower
///
/// Fields are private so the borrowed map can only change through the
/// lending engine's checkout/return rules, keeping the loan-count
/// invariant intact.
#[derive(Debug, Clone, PartialEq)]
pub struct Patron {
    name: String,
    max_loans: u32,
    borrowed: HashMap<CopyKey, Loan>,
}

impl Patron {
    /// Create a patron with no active loans
    ///
    /// # Arguments
    ///
    /// * `name` - The patron's name (registry key)
    /// * `max_loans` - Maximum number of concurrently borrowed copies
    pub fn new(name: &str, max_loans: u32) -> Self {
        Patron {
            name: name.to_string(),
            max_loans,
            borrowed: HashMap::new(),
        }
    }

    /// The patron's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum number of concurrently borrowed copies
    pub fn max_loans(&self) -> u32 {
        self.max_loans
    }

    /// Number of copies currently on loan to this patron
    ///
    /// Always equal to the size of the borrowed map.
    pub fn loan_count(&self) -> usize {
        self.borrowed.len()
    }

    /// True once the patron holds `max_loans` copies
    pub fn at_loan_limit(&self) -> bool {
        self.borrowed.len() >= self.max_loans as usize
    }

    /// True if the given copy is currently on loan to this patron
    pub fn has_borrowed(&self, key: &CopyKey) -> bool {
        self.borrowed.contains_key(key)
    }

    /// The loan details for a copy, if this patron holds it
    pub fn loan(&self, key: &CopyKey) -> Option<&Loan> {
        self.borrowed.get(key)
    }

    /// Iterate over the patron's active loans (unordered)
    pub fn loans(&self) -> impl Iterator<Item = (&CopyKey, &Loan)> {
        self.borrowed.iter()
    }

    /// Record a new loan
    pub(crate) fn borrow_copy(&mut self, key: CopyKey, loan: Loan) {
        self.borrowed.insert(key, loan);
    }

    /// Remove a loan, returning it if it existed
    pub(crate) fn return_copy(&mut self, key: &CopyKey) -> Option<Loan> {
        self.borrowed.remove(key)
    }
}

impl Entity for Patron {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }
}
