//! Domain models for Bookshelf
//!
//! Contains the book record and its matching rules without any I/O concerns.

mod book;

pub use book::{Book, BookUpdate, ReadingProgress};
