//! # Storage Layer
//!
//! Persistence for the book collection and user configuration.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Books | JSON array, 4-space indent | `books_data.json` (configurable) |
//! | Config | TOML | `~/.config/bookshelf/config.toml` or `$BOOKSHELF_CONFIG` |
//!
//! ## Write Model
//!
//! - [`BookCollection`] keeps the whole collection in memory
//! - Every mutation rewrites the whole file (last write wins)
//! - Writes go through a temp file, an `fs2` lock and a rename
//! - A missing or malformed file loads as an empty collection
//!
//! ## Key Types
//!
//! - [`BookCollection`] - The store: add, remove, search, update, progress
//! - [`BookFile`] - Load-or-default and save of the backing file
//! - [`Config`] - User configuration

mod json;
mod collection;
mod config;

pub use json::{BookFile, LoadSource};
pub use collection::{BookCollection, LibraryError};
pub use config::{
    Config, ConfigError, OutputFormat as ConfigFormat, UpdateScan, CONFIG_ENV, DEFAULT_DATA_FILE,
};
