//! JSON storage for books
//!
//! The collection lives in a single file holding a JSON array of books.
//! It is read whole when opened and rewritten whole on every save.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::Book;

/// Where the books returned by [`BookFile::load_or_default`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the backing file
    File,
    /// The backing file does not exist yet
    Missing,
    /// The backing file could not be parsed; the collection starts empty
    Malformed(String),
}

/// Backing file for a book collection
#[derive(Debug, Clone)]
pub struct BookFile {
    path: PathBuf,
}

impl BookFile {
    /// Creates a handle for the file at `path` (nothing is read yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all books, falling back to an empty list.
    ///
    /// A missing or unparsable file is not an error: the collection simply
    /// starts empty and the returned [`LoadSource`] says why. Any other I/O
    /// failure is propagated.
    pub fn load_or_default(&self) -> Result<(Vec<Book>, LoadSource)> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok((Vec::new(), LoadSource::Missing));
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Ok((Vec::new(), LoadSource::Malformed(e.to_string())));
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read book file: {}", self.path.display())
                });
            }
        };

        match serde_json::from_str(&content) {
            Ok(books) => Ok((books, LoadSource::File)),
            Err(e) => Ok((Vec::new(), LoadSource::Malformed(e.to_string()))),
        }
    }

    /// Writes all books to the file (full rewrite)
    pub fn save(&self, books: &[Book]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.temp_path();

        let result = Self::write_temp(&temp_path, books).and_then(|()| {
            fs::rename(&temp_path, &self.path).with_context(|| {
                format!(
                    "Failed to rename {} to {}",
                    temp_path.display(),
                    self.path.display()
                )
            })
        });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }

        result
    }

    fn write_temp(temp_path: &Path, books: &[Book]) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock on book file")?;

        let mut writer = BufWriter::new(&file);
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut writer,
            PrettyFormatter::with_indent(b"    "),
        );
        books
            .serialize(&mut serializer)
            .context("Failed to serialize books")?;
        writeln!(writer).context("Failed to write book file")?;

        writer.flush().context("Failed to flush book file")
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
