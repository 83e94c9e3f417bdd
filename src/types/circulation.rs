//! Circulation audit types for the bookkeeping engine
//!
//! The lending engine appends one of these entries for every successful
//! checkout or return. Failed operations leave the log untouched.

use super::book::CopyKey;
use chrono::{DateTime, Utc};
use std::fmt;

/// What happened to a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CirculationAction {
    /// The copy left the shelf
    Checkout {
        /// When the copy is due back
        due_at: DateTime<Utc>,
    },

    /// The copy came back
    Return,
}

/// One entry in the circulation log
#[derive(Debug, Clone, PartialEq)]
pub struct CirculationEvent {
    /// When the operation happened
    pub timestamp: DateTime<Utc>,

    /// Checkout or return, with checkout carrying the due date
    pub action: CirculationAction,

    /// The copy involved
    pub copy: CopyKey,

    /// The borrowing patron's name
    pub patron: String,
}

impl fmt::Display for CirculationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = self.timestamp.format("%Y-%m-%d %H:%M:%S");
        match self.action {
            CirculationAction::Checkout { due_at } => write!(
                f,
                "[{}] {} checked out {} (due {})",
                timestamp,
                self.patron,
                self.copy,
                due_at.format("%Y-%m-%d")
            ),
            CirculationAction::Return => {
                write!(f, "[{}] {} returned {}", timestamp, self.patron, self.copy)
            }
        }
    }
}
