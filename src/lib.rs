//! Bookshelf - A personal book collection manager
//!
//! Books are kept in a single JSON file that is rewritten after every
//! change. The collection can be managed from the command line or from an
//! interactive terminal form interface.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Book, BookUpdate, ReadingProgress};
pub use storage::{BookCollection, Config};
