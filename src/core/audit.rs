//! Audit log module
//!
//! This module provides the `AuditLog` struct, the append-only event record
//! both engines write to: circulation events for lending, ledger entries for
//! the bank. Entries can never be removed or reordered, so the log always
//! reflects the exact sequence of successful mutations.

/// Append-only ordered log of structured entries
pub struct AuditLog<E> {
    entries: Vec<E>,
}

impl<E> AuditLog<E> {
    /// Create an empty log
    pub fn new() -> Self {
        AuditLog {
            entries: Vec::new(),
        }
    }

    /// Append one entry to the end of the log
    pub fn append(&mut self, entry: E) {
        self.entries.push(entry);
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    /// Iterate over the entries, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    /// The most recently appended entry, if any
    pub fn last(&self) -> Option<&E> {
        self.entries.last()
    }

    /// Number of entries in the log
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for AuditLog<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E> IntoIterator for &'a AuditLog<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
