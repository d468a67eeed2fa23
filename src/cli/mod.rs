//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add` | Add a book |
//! | `remove` | Remove books by title or author |
//! | `search` | Find books by title substring or exact author |
//! | `update` | Change a book's details |
//! | `list` | Show the whole collection |
//! | `stats` | Show reading progress |
//! | `tui` | Interactive library manager |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Data File
//!
//! `--file` (or `SHELF_FILE`) selects the JSON book file. Without it the
//! configured `data_file` is used, then `books_data.json` in the current
//! directory.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod book;
mod tui;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
