//! The book collection store
//!
//! Owns the in-memory list of books and its backing file. Every mutating
//! operation rewrites the whole file before returning.

use std::path::Path;

use anyhow::Result;
use thiserror::Error;

use super::config::UpdateScan;
use super::json::{BookFile, LoadSource};
use crate::domain::{Book, BookUpdate, ReadingProgress};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Please provide at least a title or an author to remove a book")]
    MissingRemoveFilter,
}

/// A book collection backed by a JSON file
#[derive(Debug)]
pub struct BookCollection {
    file: BookFile,
    books: Vec<Book>,
    update_scan: UpdateScan,
    source: LoadSource,
}

impl BookCollection {
    /// Opens the collection stored at `path`, starting empty if the file is
    /// missing or unreadable as a book list
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = BookFile::new(path.as_ref());
        let (books, source) = file.load_or_default()?;

        Ok(Self {
            file,
            books,
            update_scan: UpdateScan::default(),
            source,
        })
    }

    /// Sets how [`update`](Self::update) locates its target
    pub fn with_update_scan(mut self, scan: UpdateScan) -> Self {
        self.update_scan = scan;
        self
    }

    /// Returns the path to the backing file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns how the collection was loaded
    pub fn load_source(&self) -> &LoadSource {
        &self.source
    }

    /// Returns the update scan mode in effect
    pub fn update_scan(&self) -> UpdateScan {
        self.update_scan
    }

    /// Returns all books in collection order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Writes the in-memory list to the backing file
    pub fn save(&self) -> Result<()> {
        self.file.save(&self.books)
    }

    /// Appends a book (duplicates allowed) and saves
    pub fn add(&mut self, book: Book) -> Result<&Book> {
        self.books.push(book);
        self.save()?;
        let index = self.books.len() - 1;
        Ok(&self.books[index])
    }

    /// Removes every book whose title or author equals the given filter,
    /// ignoring case. Empty filters match nothing. Saves only when something
    /// was removed and returns how many books went away.
    pub fn remove(&mut self, title: Option<&str>, author: Option<&str>) -> Result<usize> {
        let before = self.books.len();
        self.books.retain(|book| !book.matches_removal(title, author));
        let removed = before - self.books.len();

        if removed > 0 {
            self.save()?;
        }

        Ok(removed)
    }

    /// Returns books whose title contains `text` or whose author is exactly `text`
    pub fn search(&self, text: &str) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|book| book.matches_search(text))
            .collect()
    }

    /// Applies `update` to the book titled `old_title` and saves.
    ///
    /// With [`UpdateScan::FirstOnly`] only the first book is examined, so the
    /// call fails whenever the target is not at the head of the collection.
    /// Returns false when no book was updated.
    pub fn update(&mut self, old_title: &str, update: &BookUpdate) -> Result<bool> {
        Ok(self.update_entry(old_title, update)?.is_some())
    }

    /// Same as [`update`](Self::update), returning the updated book
    pub fn update_entry(&mut self, old_title: &str, update: &BookUpdate) -> Result<Option<&Book>> {
        let limit = match self.update_scan {
            UpdateScan::FirstOnly => 1,
            UpdateScan::All => self.books.len(),
        };

        let index = self
            .books
            .iter()
            .take(limit)
            .position(|book| book.title_is(old_title));

        match index {
            Some(index) => {
                self.books[index].apply(update);
                self.save()?;
                Ok(Some(&self.books[index]))
            }
            None => Ok(None),
        }
    }

    /// Returns total and read counts
    pub fn progress(&self) -> ReadingProgress {
        ReadingProgress::from_books(&self.books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn book(title: &str, author: &str, read: bool) -> Book {
        Book::new(title, author, "2000", "Fiction", read)
    }

    fn open(dir: &TempDir) -> BookCollection {
        BookCollection::open(dir.path().join("books.json")).unwrap()
    }

    fn on_disk(collection: &BookCollection) -> Vec<Book> {
        BookFile::new(collection.path()).load_or_default().unwrap().0
    }

    #[test]
    fn open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let collection = open(&dir);

        assert!(collection.is_empty());
        assert_eq!(collection.load_source(), &LoadSource::Missing);
        assert!(!collection.path().exists());
    }

    #[test]
    fn add_appends_and_saves() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);

        collection.add(book("Dune", "Frank Herbert", false)).unwrap();
        let added = collection.add(book("Emma", "Jane Austen", true)).unwrap().clone();

        assert_eq!(added, book("Emma", "Jane Austen", true));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.books()[1], added);
        assert_eq!(on_disk(&collection), collection.books());
    }

    #[test]
    fn add_accepts_duplicates_and_empty_fields() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);

        collection.add(book("", "", false)).unwrap();
        collection.add(book("", "", false)).unwrap();

        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn reopen_restores_collection() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(book("Dune", "Frank Herbert", false)).unwrap();

        let reopened = open(&dir);
        assert_eq!(reopened.books(), collection.books());
        assert_eq!(reopened.load_source(), &LoadSource::File);
    }

    #[test]
    fn remove_by_title_removes_all_matches() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(book("1984", "George Orwell", true)).unwrap();
        collection.add(book("Dune", "Frank Herbert", false)).unwrap();
        collection.add(book("1984", "Someone Else", false)).unwrap();

        let removed = collection.remove(Some("1984"), None).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(collection.books(), &[book("Dune", "Frank Herbert", false)]);
        assert_eq!(on_disk(&collection), collection.books());
    }

    #[test]
    fn remove_by_author_ignores_case() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(book("Emma", "Jane Austen", true)).unwrap();
        collection.add(book("Persuasion", "Jane Austen", false)).unwrap();
        collection.add(book("Dune", "Frank Herbert", false)).unwrap();

        let removed = collection.remove(None, Some("JANE AUSTEN")).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn remove_with_empty_filters_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(book("1984", "George Orwell", true)).unwrap();

        assert_eq!(collection.remove(None, None).unwrap(), 0);
        assert_eq!(collection.remove(Some(""), Some("")).unwrap(), 0);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn remove_without_match_does_not_write() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);

        assert_eq!(collection.remove(Some("Missing"), None).unwrap(), 0);
        assert!(!collection.path().exists());
    }

    #[test]
    fn search_title_substring_or_exact_author() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(book("The Hobbit", "J.R.R. Tolkien", true)).unwrap();
        collection.add(book("Dune", "Frank Herbert", false)).unwrap();

        let hobbit = book("The Hobbit", "J.R.R. Tolkien", true);
        assert_eq!(collection.search("hob"), vec![&hobbit]);
        assert_eq!(collection.search("j.r.r. tolkien"), vec![&hobbit]);
        assert!(collection.search("Tolk").is_empty());
        assert_eq!(collection.search("").len(), 2);
    }

    #[test]
    fn update_first_book() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(book("A", "First Author", false)).unwrap();
        collection.add(book("B", "Second Author", false)).unwrap();

        let update = BookUpdate::read(true).title("A2").author("");
        assert!(collection.update("a", &update).unwrap());

        assert_eq!(collection.books()[0].title, "A2");
        assert_eq!(collection.books()[0].author, "First Author");
        assert!(collection.books()[0].read);
        assert_eq!(on_disk(&collection), collection.books());
    }

    #[test]
    fn update_only_examines_first_book_by_default() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(book("A", "First Author", false)).unwrap();
        collection.add(book("B", "Second Author", false)).unwrap();

        assert!(!collection.update("B", &BookUpdate::read(true)).unwrap());
        assert!(!collection.books()[1].read);
    }

    #[test]
    fn update_full_scan_finds_later_book() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir).with_update_scan(UpdateScan::All);
        collection.add(book("A", "First Author", false)).unwrap();
        collection.add(book("B", "Second Author", false)).unwrap();
        collection.add(book("b", "Third Author", false)).unwrap();

        assert!(collection.update("B", &BookUpdate::read(true)).unwrap());
        assert!(collection.books()[1].read);
        assert!(!collection.books()[2].read);
    }

    #[test]
    fn update_empty_collection_fails() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);

        assert!(!collection.update("A", &BookUpdate::default()).unwrap());
    }

    #[test]
    fn progress_counts_read_books() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        assert_eq!(collection.progress(), ReadingProgress { total: 0, read: 0 });

        collection.add(book("A", "x", true)).unwrap();
        collection.add(book("B", "y", false)).unwrap();
        collection.add(book("C", "z", true)).unwrap();

        assert_eq!(collection.progress(), ReadingProgress { total: 3, read: 2 });
    }
}
