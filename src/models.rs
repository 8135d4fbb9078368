//! Domain model for a catalogued book. The struct doubles as the on-disk
//! representation, so the serde attributes here define the persisted JSON
//! layout (`Title`, `Author`, `Year`, `Genre`, `Read`).

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
/// A single catalog entry. Books carry no identifier: removal and search match
/// on the title, case-insensitively.
pub struct Book {
    pub title: String,
    pub author: String,
    /// Publication year. The form keeps it within 1000..=2100; the store
    /// accepts any integer.
    pub year: i64,
    pub genre: String,
    /// Whether the owner has finished the book.
    pub read: bool,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read,
        }
    }

    /// `Read` or `Unread`, as shown in listings.
    pub fn status_label(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Unread"
        }
    }

    /// Everything after the title in a listing line: ` by Author (Year) -
    /// Genre - Read`. The UI renders the title separately so it can be bold.
    pub fn details(&self) -> String {
        format!(
            " by {} ({}) - {} - {}",
            self.author,
            self.year,
            self.genre,
            self.status_label()
        )
    }

    pub(crate) fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    pub(crate) fn mentions(&self, keyword_lower: &str) -> bool {
        self.title.to_lowercase().contains(keyword_lower)
            || self.author.to_lowercase().contains(keyword_lower)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.title, self.details())
    }
}

/// Aggregate figures for the statistics page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub total: usize,
    /// Share of read books in percent; `0.0` for an empty library.
    pub percent_read: f64,
}

impl Statistics {
    pub fn from_books(books: &[Book]) -> Self {
        let total = books.len();
        let read = books.iter().filter(|book| book.read).count();
        let percent_read = if total > 0 {
            read as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            percent_read,
        }
    }

    /// Read share as a `0.0..=1.0` ratio for gauge widgets.
    pub fn ratio(&self) -> f64 {
        (self.percent_read / 100.0).clamp(0.0, 1.0)
    }
}
