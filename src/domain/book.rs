//! Book domain model
//!
//! A book is the only record kept in a collection. It carries no identifier:
//! operations address books by case-insensitive comparison of title or author.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single book in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Title, stored with the casing the user typed
    pub title: String,

    /// Author name
    pub author: String,

    /// Publication year (free text, never validated)
    #[serde(deserialize_with = "deserialize_year")]
    pub year: String,

    /// Genre
    pub genre: String,

    /// Whether the book has been read
    pub read: bool,

    /// Fields written by other tools, carried through saves untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    /// Creates a new book record
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
            read,
            extra: Map::new(),
        }
    }

    /// Returns true if the title equals `title`, ignoring case
    pub fn title_is(&self, title: &str) -> bool {
        eq_ignore_case(&self.title, title)
    }

    /// Returns true if the author equals `author`, ignoring case
    pub fn author_is(&self, author: &str) -> bool {
        eq_ignore_case(&self.author, author)
    }

    /// Returns true if the title contains `text`, ignoring case
    pub fn title_contains(&self, text: &str) -> bool {
        self.title.to_lowercase().contains(&text.to_lowercase())
    }

    /// Search rule: substring match on the title, exact match on the author.
    ///
    /// The asymmetry is intentional. `"hob"` finds "The Hobbit", but a partial
    /// author name such as `"Tolk"` never finds "J.R.R. Tolkien".
    pub fn matches_search(&self, text: &str) -> bool {
        self.title_contains(text) || self.author_is(text)
    }

    /// Removal rule: each filter participates only when it is non-empty
    pub fn matches_removal(&self, title: Option<&str>, author: Option<&str>) -> bool {
        let by_title = non_empty(title).is_some_and(|t| self.title_is(t));
        let by_author = non_empty(author).is_some_and(|a| self.author_is(a));
        by_title || by_author
    }

    /// Applies a patch in place
    pub fn apply(&mut self, update: &BookUpdate) {
        replace_if_present(&mut self.title, update.title.as_deref());
        replace_if_present(&mut self.author, update.author.as_deref());
        replace_if_present(&mut self.year, update.year.as_deref());
        replace_if_present(&mut self.genre, update.genre.as_deref());
        self.read = update.read;
    }

    /// Human-readable reading status
    pub fn status_label(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Not Read"
        }
    }
}

/// Changes to apply to an existing book.
///
/// Empty or absent text fields keep the old value. `read` always overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub read: bool,
}

impl BookUpdate {
    /// Creates a patch that only sets the read flag
    pub fn read(read: bool) -> Self {
        Self {
            read,
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}

/// Reading statistics for a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadingProgress {
    /// Number of books in the collection
    pub total: usize,

    /// Number of books marked as read
    pub read: usize,
}

impl ReadingProgress {
    /// Computes progress over a list of books
    pub fn from_books(books: &[Book]) -> Self {
        Self {
            total: books.len(),
            read: books.iter().filter(|b| b.read).count(),
        }
    }

    /// Share of read books as a percentage (0.0 for an empty collection)
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.read as f64 / self.total as f64 * 100.0
        }
    }

    /// Share of read books in `0.0..=1.0`
    pub fn ratio(&self) -> f64 {
        self.percent() / 100.0
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn replace_if_present(field: &mut String, value: Option<&str>) {
    if let Some(value) = non_empty(value) {
        *field = value.to_string();
    }
}

/// Accepts the year as a string or a bare number (`1965` becomes `"1965"`)
fn deserialize_year<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(&other.to_string()),
            &"a string or number",
        )),
    }
}
