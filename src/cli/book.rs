//! Book CLI commands

use anyhow::Result;

use super::output::Output;
use crate::domain::{Book, BookUpdate};
use crate::storage::{BookCollection, LibraryError};

/// Formats a book as one listing line: `Title by Author (Year) - Genre - Status`
pub fn describe(book: &Book) -> String {
    format!(
        "{} by {} ({}) - {} - {}",
        book.title,
        book.author,
        book.year,
        book.genre,
        book.status_label()
    )
}

pub fn add(
    output: &Output,
    collection: &mut BookCollection,
    title: String,
    author: String,
    year: String,
    genre: String,
    read: bool,
) -> Result<()> {
    let book = collection.add(Book::new(title, author, year, genre, read))?.clone();
    output.verbose_ctx("add", &format!("Collection now holds {} book(s)", collection.len()));

    if output.is_json() {
        output.data(&book);
    } else {
        output.success(&format!("Book added successfully: {}", book.title));
    }

    Ok(())
}

pub fn remove(
    output: &Output,
    collection: &mut BookCollection,
    title: Option<&str>,
    author: Option<&str>,
) -> Result<()> {
    let title = title.filter(|t| !t.is_empty());
    let author = author.filter(|a| !a.is_empty());

    if title.is_none() && author.is_none() {
        return Err(LibraryError::MissingRemoveFilter.into());
    }

    let before = collection.len();
    let removed = collection.remove(title, author)?;
    output.verbose_ctx(
        "remove",
        &format!("Books before: {}, after: {}", before, collection.len()),
    );

    if output.is_json() {
        output.data(&serde_json::json!({ "removed": removed }));
    } else if removed == 0 {
        output.warning("No matching books found");
    } else {
        output.success(&format!("Removed {} book(s)", removed));
    }

    Ok(())
}

pub fn search(output: &Output, collection: &BookCollection, text: &str) -> Result<()> {
    let results = collection.search(text);
    output.verbose_ctx("search", &format!("Found {} result(s) for '{}'", results.len(), text));

    if output.is_json() {
        output.data(&results);
    } else if results.is_empty() {
        println!("No books found matching '{}'", text);
    } else {
        for book in &results {
            println!("{}", describe(book));
        }
        println!();
        println!("Found {} book(s)", results.len());
    }

    Ok(())
}

pub fn update(
    output: &Output,
    collection: &mut BookCollection,
    old_title: &str,
    update: &BookUpdate,
) -> Result<()> {
    output.verbose_ctx(
        "update",
        &format!(
            "Looking for '{}' (scan: {})",
            old_title,
            collection.update_scan().as_str()
        ),
    );

    let book = collection
        .update_entry(old_title, update)?
        .ok_or_else(|| LibraryError::BookNotFound(old_title.to_string()))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "updated": true,
            "book": book,
        }));
    } else {
        output.success(&format!("Book updated successfully: {}", describe(book)));
    }

    Ok(())
}

pub fn list(output: &Output, collection: &BookCollection) -> Result<()> {
    if output.is_json() {
        output.data(&collection.books());
    } else if collection.is_empty() {
        println!("No books in your collection yet");
    } else {
        println!("All books in your collection:");
        for (index, book) in collection.books().iter().enumerate() {
            println!("{}. {}", index + 1, describe(book));
        }
    }

    Ok(())
}

pub fn stats(output: &Output, collection: &BookCollection) -> Result<()> {
    let progress = collection.progress();

    if output.is_json() {
        output.data(&serde_json::json!({
            "total": progress.total,
            "read": progress.read,
            "percent": progress.percent(),
        }));
    } else {
        println!("Total books: {}", progress.total);
        println!("Books read: {}", progress.read);
        println!("Progress: {:.2}%", progress.percent());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_read_book() {
        let book = Book::new("Dune", "Frank Herbert", "1965", "Science Fiction", true);
        assert_eq!(
            describe(&book),
            "Dune by Frank Herbert (1965) - Science Fiction - Read"
        );
    }

    #[test]
    fn describe_unread_book() {
        let book = Book::new("Emma", "Jane Austen", "", "", false);
        assert_eq!(describe(&book), "Emma by Jane Austen () -  - Not Read");
    }
}
