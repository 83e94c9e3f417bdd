//! Book and catalog types for the bookkeeping engine
//!
//! This module defines the catalog side of the system: individual book
//! copies, their (title, copy_id) identity, the physical/digital medium
//! split, and the availability state toggled by the lending engine.

use crate::core::registry::Entity;
use std::fmt;

/// Identity of one catalog copy
///
/// A title can exist as several copies; `copy_id` must be unique per title.
/// The pair is the registry key for book copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CopyKey {
    /// Book title
    pub title: String,

    /// Copy number within the title (unique per title)
    pub copy_id: u32,
}

impl CopyKey {
    /// Create a copy key
    ///
    /// # Arguments
    ///
    /// * `title` - The book title
    /// * `copy_id` - The copy number within that title
    pub fn new(title: &str, copy_id: u32) -> Self {
        CopyKey {
            title: title.to_string(),
            copy_id,
        }
    }
}

impl fmt::Display for CopyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.title, self.copy_id)
    }
}

/// Medium-specific data for a copy
///
/// A copy is either physical or digital, never both. The variant carries
/// the one field that only makes sense for that medium.
#[derive(Debug, Clone, PartialEq)]
pub enum Medium {
    /// A printed copy stored on a shelf
    Physical {
        /// Shelf location code, e.g. "A3"
        shelf_location: String,
    },

    /// An e-book download
    Digital {
        /// File size in megabytes
        file_size_mb: f64,
    },
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Medium::Physical { shelf_location } => write!(f, "shelf {shelf_location}"),
            Medium::Digital { file_size_mb } => write!(f, "{file_size_mb} MB e-book"),
        }
    }
}

/// Availability state of a copy
///
/// Toggled only by the lending engine's checkout and return operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    /// On the shelf (or downloadable) and free to check out
    #[default]
    Available,

    /// Currently on loan to exactly one patron
    CheckedOut,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => f.write_str("Available"),
            Availability::CheckedOut => f.write_str("Checked Out"),
        }
    }
}

/// One copy of a titled book
///
/// Created at catalog load time and never destroyed during a session.
/// Fields are private so the availability state can only change through
/// the lending engine's checkout/return rules.
#[derive(Debug, Clone, PartialEq)]
pub struct BookCopy {
    title: String,
    author: String,
    copy_id: u32,
    medium: Medium,
    availability: Availability,
}

impl BookCopy {
    /// Create a new copy in the Available state
    ///
    /// # Arguments
    ///
    /// * `title` - The book title
    /// * `author` - The author name
    /// * `copy_id` - The copy number within this title
    /// * `medium` - Physical or digital medium data
    pub fn new(title: &str, author: &str, copy_id: u32, medium: Medium) -> Self {
        BookCopy {
            title: title.to_string(),
            author: author.to_string(),
            copy_id,
            medium,
            availability: Availability::Available,
        }
    }

    /// The book title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The author name
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The copy number within this title
    pub fn copy_id(&self) -> u32 {
        self.copy_id
    }

    /// Medium-specific data
    pub fn medium(&self) -> &Medium {
        &self.medium
    }

    /// Current availability state
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// True if the copy can be checked out right now
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }

    /// Mark the copy as on loan
    pub(crate) fn check_out(&mut self) {
        self.availability = Availability::CheckedOut;
    }

    /// Mark the copy as back on the shelf
    pub(crate) fn check_in(&mut self) {
        self.availability = Availability::Available;
    }
}

impl Entity for BookCopy {
    type Key = CopyKey;

    fn key(&self) -> CopyKey {
        CopyKey {
            title: self.title.clone(),
            copy_id: self.copy_id,
        }
    }
}

impl fmt::Display for BookCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' by {} (copy #{}, {}) - {}",
            self.title, self.author, self.copy_id, self.medium, self.availability
        )
    }
}
