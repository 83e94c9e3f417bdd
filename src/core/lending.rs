//! Lending engine module
//!
//! This module provides the `LendingEngine` struct which owns the book-copy
//! catalog, the patron registry, and the circulation log, and applies the
//! checkout/return rules over them.
//!
//! The LendingEngine is responsible for:
//! - Loading copies and patrons into their registries
//! - Finding an available copy and enforcing the patron's loan limit on checkout
//! - Validating returns against the catalog and the patron's holdings
//! - Appending one circulation event per successful mutation
//!
//! Failed operations leave the catalog, the patrons, and the log exactly as
//! they were.

use crate::core::audit::AuditLog;
use crate::core::registry::{Entity, EntityRegistry};
use crate::types::{
    BookCopy, BookkeepingError, CirculationAction, CirculationEvent, CopyKey, Loan, Patron,
};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Loan period used when a caller has no reason to pick another one
pub const DEFAULT_LOAN_PERIOD_DAYS: u32 = 14;

/// Circulation rules over a catalog of copies and a set of patrons
///
/// All state lives in the engine: a registry of copies keyed by
/// (title, copy_id), a registry of patrons keyed by name, and the
/// append-only circulation log.
pub struct LendingEngine {
    /// Catalog of individual copies
    copies: EntityRegistry<BookCopy>,

    /// Registered borrowers
    patrons: EntityRegistry<Patron>,

    /// One entry per successful checkout or return
    log: AuditLog<CirculationEvent>,
}

impl LendingEngine {
    /// Create an engine with an empty catalog and no patrons
    pub fn new() -> Self {
        LendingEngine {
            copies: EntityRegistry::new(),
            patrons: EntityRegistry::new(),
            log: AuditLog::new(),
        }
    }

    /// Add a copy to the catalog
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if a copy with the same (title, copy_id)
    /// already exists.
    pub fn add_copy(&mut self, copy: BookCopy) -> Result<(), BookkeepingError> {
        let key = copy.key();
        self.copies.add(copy)?;
        debug!("Added {key} to the catalog");
        Ok(())
    }

    /// Register a patron
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if a patron with the same name already exists.
    pub fn register_patron(&mut self, patron: Patron) -> Result<(), BookkeepingError> {
        let name = patron.key();
        self.patrons.add(patron)?;
        debug!("Registered patron {name}");
        Ok(())
    }

    /// Check a copy of the given title out to a patron
    ///
    /// Picks the available copy with the lowest copy_id whose title matches
    /// exactly, then marks it checked out, records the loan on the patron
    /// with a due date `loan_period_days` from now, and appends a checkout
    /// event. The three mutations happen together or not at all. A period
    /// that would push the due date past the supported calendar clamps to
    /// the latest representable date.
    ///
    /// # Arguments
    ///
    /// * `title` - Exact title to check out
    /// * `patron_name` - The borrowing patron
    /// * `loan_period_days` - Days until the copy is due back
    ///
    /// # Returns
    ///
    /// The key of the copy that was checked out.
    ///
    /// # Errors
    ///
    /// * `NoCopyAvailable` - No available copy of the title exists
    /// * `NotFound` - The patron is not registered
    /// * `LoanLimitExceeded` - The patron already holds `max_loans` copies
    pub fn checkout(
        &mut self,
        title: &str,
        patron_name: &str,
        loan_period_days: u32,
    ) -> Result<CopyKey, BookkeepingError> {
        // Availability first: lowest copy_id among available copies of the exact title
        let key = self
            .copies
            .filter(|copy| copy.title() == title && copy.is_available())
            .map(Entity::key)
            .min_by_key(|key| key.copy_id)
            .ok_or_else(|| BookkeepingError::no_copy_available(title))?;

        let patron = self
            .patrons
            .get_mut(patron_name)
            .ok_or_else(|| BookkeepingError::not_found("patron", patron_name))?;

        if patron.at_loan_limit() {
            return Err(BookkeepingError::loan_limit_exceeded(
                patron_name,
                patron.max_loans(),
            ));
        }

        // All rules passed; now mutate patron, copy, and log together
        let checked_out_at = Utc::now();
        let due_at = checked_out_at
            .checked_add_signed(Duration::days(i64::from(loan_period_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        patron.borrow_copy(
            key.clone(),
            Loan {
                checked_out_at,
                due_at,
            },
        );

        // The key came from the availability scan, so the copy is present
        if let Some(copy) = self.copies.get_mut(&key) {
            copy.check_out();
        }

        self.log.append(CirculationEvent {
            timestamp: checked_out_at,
            action: CirculationAction::Checkout { due_at },
            copy: key.clone(),
            patron: patron_name.to_string(),
        });
        debug!("Checked out {key} to {patron_name}");

        Ok(key)
    }

    /// Return a copy of the given title from a patron
    ///
    /// If the patron holds several copies of the title, the one with the
    /// lowest copy_id comes back first. Marks the copy available, removes
    /// the loan, and appends a return event, together or not at all.
    ///
    /// # Arguments
    ///
    /// * `title` - Exact title being returned
    /// * `patron_name` - The patron returning it
    ///
    /// # Returns
    ///
    /// The key of the copy that came back.
    ///
    /// # Errors
    ///
    /// * `NotCheckedOut` - No copy of the title is checked out at all
    /// * `NotFound` - The patron is not registered
    /// * `NotBorrowedByPatron` - Copies are checked out, but not to this patron
    pub fn return_copy(
        &mut self,
        title: &str,
        patron_name: &str,
    ) -> Result<CopyKey, BookkeepingError> {
        if !self
            .copies
            .all()
            .any(|copy| copy.title() == title && !copy.is_available())
        {
            return Err(BookkeepingError::not_checked_out(title));
        }

        let patron = self
            .patrons
            .get_mut(patron_name)
            .ok_or_else(|| BookkeepingError::not_found("patron", patron_name))?;

        // Lowest copy_id among this patron's loans of the title
        let key = patron
            .loans()
            .map(|(key, _)| key)
            .filter(|key| key.title == title)
            .min_by_key(|key| key.copy_id)
            .cloned()
            .ok_or_else(|| BookkeepingError::not_borrowed_by_patron(title, patron_name))?;

        patron.return_copy(&key);
        if let Some(copy) = self.copies.get_mut(&key) {
            copy.check_in();
        }

        self.log.append(CirculationEvent {
            timestamp: Utc::now(),
            action: CirculationAction::Return,
            copy: key.clone(),
            patron: patron_name.to_string(),
        });
        debug!("Returned {key} from {patron_name}");

        Ok(key)
    }

    /// Find copies whose title contains the term, case-insensitively
    ///
    /// Purely informational: matches are returned regardless of
    /// availability and nothing is mutated.
    pub fn search(&self, term: &str) -> Vec<&BookCopy> {
        let needle = term.to_lowercase();
        self.copies
            .filter(move |copy| copy.title().to_lowercase().contains(&needle))
            .collect()
    }

    /// Look up one copy by key
    pub fn get_copy(&self, key: &CopyKey) -> Option<&BookCopy> {
        self.copies.get(key)
    }

    /// Look up one patron by name
    pub fn get_patron(&self, name: &str) -> Option<&Patron> {
        self.patrons.get(name)
    }

    /// All copies in catalog order
    pub fn get_all_copies(&self) -> Vec<&BookCopy> {
        self.copies.all().collect()
    }

    /// The circulation log, oldest event first
    pub fn circulation_log(&self) -> &AuditLog<CirculationEvent> {
        &self.log
    }
}

impl Default for LendingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Availability, Medium};

    fn physical(title: &str, copy_id: u32) -> BookCopy {
        BookCopy::new(
            title,
            "Test Author",
            copy_id,
            Medium::Physical {
                shelf_location: "A1".to_string(),
            },
        )
    }

    fn engine_with_catalog() -> LendingEngine {
        let mut engine = LendingEngine::new();
        engine.add_copy(physical("The Hobbit", 1)).unwrap();
        engine.add_copy(physical("The Hobbit", 2)).unwrap();
        engine.add_copy(physical("1984", 1)).unwrap();
        engine.register_patron(Patron::new("Alice", 3)).unwrap();
        engine.register_patron(Patron::new("Bob", 1)).unwrap();
        engine
    }

    #[test]
    fn test_add_copy_duplicate_key_is_rejected() {
        let mut engine = LendingEngine::new();
        engine.add_copy(physical("Dune", 1)).unwrap();

        let result = engine.add_copy(physical("Dune", 1));

        assert_eq!(
            result,
            Err(BookkeepingError::duplicate_key(CopyKey::new("Dune", 1)))
        );
    }

    #[test]
    fn test_register_patron_duplicate_name_is_rejected() {
        let mut engine = LendingEngine::new();
        engine.register_patron(Patron::new("Alice", 3)).unwrap();

        let result = engine.register_patron(Patron::new("Alice", 5));

        assert_eq!(result, Err(BookkeepingError::duplicate_key("Alice")));
    }

    #[test]
    fn test_checkout_marks_copy_patron_and_log() {
        let mut engine = engine_with_catalog();

        let key = engine.checkout("The Hobbit", "Alice", 14).unwrap();

        assert_eq!(key, CopyKey::new("The Hobbit", 1));
        assert_eq!(
            engine.get_copy(&key).unwrap().availability(),
            Availability::CheckedOut
        );

        let alice = engine.get_patron("Alice").unwrap();
        assert_eq!(alice.loan_count(), 1);
        assert!(alice.has_borrowed(&key));

        assert_eq!(engine.circulation_log().len(), 1);
        let event = engine.circulation_log().last().unwrap();
        assert_eq!(event.copy, key);
        assert_eq!(event.patron, "Alice");
        assert!(matches!(event.action, CirculationAction::Checkout { .. }));
    }

    #[test]
    fn test_checkout_picks_lowest_copy_id() {
        let mut engine = LendingEngine::new();

        // Insertion order deliberately reversed
        engine.add_copy(physical("Dune", 3)).unwrap();
        engine.add_copy(physical("Dune", 1)).unwrap();
        engine.add_copy(physical("Dune", 2)).unwrap();
        engine.register_patron(Patron::new("Alice", 5)).unwrap();

        let key = engine.checkout("Dune", "Alice", 14).unwrap();
        assert_eq!(key, CopyKey::new("Dune", 1));
    }

    #[test]
    fn test_checkout_skips_checked_out_copies() {
        let mut engine = engine_with_catalog();

        let first = engine.checkout("The Hobbit", "Alice", 14).unwrap();
        let second = engine.checkout("The Hobbit", "Alice", 14).unwrap();

        assert_eq!(first, CopyKey::new("The Hobbit", 1));
        assert_eq!(second, CopyKey::new("The Hobbit", 2));
    }

    #[test]
    fn test_checkout_unknown_title_fails() {
        let mut engine = engine_with_catalog();

        let result = engine.checkout("Dune", "Alice", 14);

        assert_eq!(result, Err(BookkeepingError::no_copy_available("Dune")));
        assert!(engine.circulation_log().is_empty());
    }

    #[test]
    fn test_checkout_requires_exact_title() {
        let mut engine = engine_with_catalog();

        // "Hobbit" is a substring of a catalog title but not an exact match
        let result = engine.checkout("Hobbit", "Alice", 14);

        assert_eq!(result, Err(BookkeepingError::no_copy_available("Hobbit")));
    }

    #[test]
    fn test_checkout_with_all_copies_out_fails() {
        let mut engine = engine_with_catalog();
        engine.checkout("1984", "Alice", 14).unwrap();

        let result = engine.checkout("1984", "Bob", 14);

        assert_eq!(result, Err(BookkeepingError::no_copy_available("1984")));
    }

    #[test]
    fn test_checkout_unknown_patron_leaves_copy_available() {
        let mut engine = engine_with_catalog();

        let result = engine.checkout("The Hobbit", "Carol", 14);

        assert_eq!(result, Err(BookkeepingError::not_found("patron", "Carol")));
        assert!(engine
            .get_copy(&CopyKey::new("The Hobbit", 1))
            .unwrap()
            .is_available());
        assert!(engine.circulation_log().is_empty());
    }

    #[test]
    fn test_checkout_at_loan_limit_fails_despite_availability() {
        let mut engine = engine_with_catalog();

        // Bob's limit is 1
        engine.checkout("1984", "Bob", 14).unwrap();
        let result = engine.checkout("The Hobbit", "Bob", 14);

        assert_eq!(result, Err(BookkeepingError::loan_limit_exceeded("Bob", 1)));

        // Nothing moved
        assert!(engine
            .get_copy(&CopyKey::new("The Hobbit", 1))
            .unwrap()
            .is_available());
        assert_eq!(engine.get_patron("Bob").unwrap().loan_count(), 1);
        assert_eq!(engine.circulation_log().len(), 1);
    }

    #[test]
    fn test_checkout_with_zero_loan_limit_always_fails() {
        let mut engine = LendingEngine::new();
        engine.add_copy(physical("Dune", 1)).unwrap();
        engine.register_patron(Patron::new("Carol", 0)).unwrap();

        let result = engine.checkout("Dune", "Carol", 14);

        assert_eq!(
            result,
            Err(BookkeepingError::loan_limit_exceeded("Carol", 0))
        );
    }

    #[test]
    fn test_checkout_records_due_date_from_loan_period() {
        let mut engine = engine_with_catalog();

        let key = engine.checkout("The Hobbit", "Alice", 7).unwrap();

        let loan = *engine.get_patron("Alice").unwrap().loan(&key).unwrap();
        assert_eq!(loan.due_at - loan.checked_out_at, Duration::days(7));

        // The audit entry carries the same due date
        match engine.circulation_log().last().unwrap().action {
            CirculationAction::Checkout { due_at } => assert_eq!(due_at, loan.due_at),
            CirculationAction::Return => panic!("expected a checkout event"),
        }
    }

    #[test]
    fn test_checkout_with_extreme_loan_period_clamps_due_date() {
        let mut engine = engine_with_catalog();

        // u32::MAX days lands far past the end of the calendar
        let key = engine.checkout("The Hobbit", "Alice", u32::MAX).unwrap();

        let loan = *engine.get_patron("Alice").unwrap().loan(&key).unwrap();
        assert_eq!(loan.due_at, DateTime::<Utc>::MAX_UTC);

        // The audit entry carries the clamped date too
        match engine.circulation_log().last().unwrap().action {
            CirculationAction::Checkout { due_at } => {
                assert_eq!(due_at, DateTime::<Utc>::MAX_UTC)
            }
            CirculationAction::Return => panic!("expected a checkout event"),
        }
    }

    #[test]
    fn test_return_restores_copy_and_patron() {
        let mut engine = engine_with_catalog();
        let key = engine.checkout("The Hobbit", "Alice", 14).unwrap();

        let returned = engine.return_copy("The Hobbit", "Alice").unwrap();

        assert_eq!(returned, key);
        assert!(engine.get_copy(&key).unwrap().is_available());
        assert_eq!(engine.get_patron("Alice").unwrap().loan_count(), 0);

        assert_eq!(engine.circulation_log().len(), 2);
        let event = engine.circulation_log().last().unwrap();
        assert_eq!(event.action, CirculationAction::Return);
        assert_eq!(event.copy, key);
    }

    #[test]
    fn test_return_when_nothing_checked_out_fails() {
        let mut engine = engine_with_catalog();

        let result = engine.return_copy("The Hobbit", "Alice");

        assert_eq!(
            result,
            Err(BookkeepingError::not_checked_out("The Hobbit"))
        );
    }

    #[test]
    fn test_return_by_wrong_patron_fails() {
        let mut engine = engine_with_catalog();
        engine.checkout("The Hobbit", "Alice", 14).unwrap();

        let result = engine.return_copy("The Hobbit", "Bob");

        assert_eq!(
            result,
            Err(BookkeepingError::not_borrowed_by_patron("The Hobbit", "Bob"))
        );

        // The loan is untouched
        assert_eq!(engine.get_patron("Alice").unwrap().loan_count(), 1);
        assert_eq!(engine.circulation_log().len(), 1);
    }

    #[test]
    fn test_return_picks_lowest_copy_id_of_patrons_loans() {
        let mut engine = engine_with_catalog();
        engine.checkout("The Hobbit", "Alice", 14).unwrap();
        engine.checkout("The Hobbit", "Alice", 14).unwrap();

        let returned = engine.return_copy("The Hobbit", "Alice").unwrap();

        assert_eq!(returned, CopyKey::new("The Hobbit", 1));
        assert!(engine
            .get_copy(&CopyKey::new("The Hobbit", 1))
            .unwrap()
            .is_available());
        assert_eq!(
            engine
                .get_copy(&CopyKey::new("The Hobbit", 2))
                .unwrap()
                .availability(),
            Availability::CheckedOut
        );
    }

    #[test]
    fn test_checkout_return_cycle_frees_the_copy_for_others() {
        let mut engine = LendingEngine::new();
        engine.add_copy(physical("Dune", 1)).unwrap();
        engine.register_patron(Patron::new("Alice", 3)).unwrap();
        engine.register_patron(Patron::new("Bob", 3)).unwrap();

        // Alice takes the only copy
        engine.checkout("Dune", "Alice", 14).unwrap();

        // Bob cannot have it while it is out
        assert_eq!(
            engine.checkout("Dune", "Bob", 14),
            Err(BookkeepingError::no_copy_available("Dune"))
        );

        // After the return, Bob can
        engine.return_copy("Dune", "Alice").unwrap();
        let key = engine.checkout("Dune", "Bob", 14).unwrap();
        assert_eq!(key, CopyKey::new("Dune", 1));
        assert!(engine.get_patron("Bob").unwrap().has_borrowed(&key));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let engine = engine_with_catalog();

        let matches = engine.search("hobbit");

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|copy| copy.title() == "The Hobbit"));
    }

    #[test]
    fn test_search_includes_checked_out_copies() {
        let mut engine = engine_with_catalog();
        engine.checkout("1984", "Alice", 14).unwrap();

        let matches = engine.search("1984");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].availability(), Availability::CheckedOut);
    }

    #[test]
    fn test_search_with_no_matches_is_empty() {
        let engine = engine_with_catalog();
        assert!(engine.search("dune").is_empty());
    }

    #[test]
    fn test_failed_operations_do_not_touch_the_log() {
        let mut engine = engine_with_catalog();

        let _ = engine.checkout("Dune", "Alice", 14);
        let _ = engine.checkout("The Hobbit", "Carol", 14);
        let _ = engine.return_copy("The Hobbit", "Alice");

        assert!(engine.circulation_log().is_empty());
    }
}
