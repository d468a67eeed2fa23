//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{book, tui};
use crate::storage::{BookCollection, Config, LoadSource};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about = "Personal book collection manager")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to the JSON book file
    #[arg(long, global = true, env = "SHELF_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new book
    Add {
        /// Book title
        title: String,

        /// Author name
        #[arg(long, short, default_value = "")]
        author: String,

        /// Publication year
        #[arg(long, short, default_value = "")]
        year: String,

        /// Genre
        #[arg(long, short, default_value = "")]
        genre: String,

        /// Mark the book as read
        #[arg(long, short)]
        read: bool,
    },

    /// Remove books by title or author
    Remove {
        /// Remove books with this title (case-insensitive)
        #[arg(long, short)]
        title: Option<String>,

        /// Remove books by this author (case-insensitive)
        #[arg(long, short)]
        author: Option<String>,
    },

    /// Search books by title or author
    ///
    /// Titles match on any substring; authors must match exactly.
    Search {
        /// Search text
        text: String,
    },

    /// Update a book's details
    ///
    /// Omitted or empty fields keep their value. The read flag is always
    /// overwritten: leaving out --read marks the book as not read.
    Update {
        /// Current title of the book
        old_title: String,

        /// New title
        #[arg(long, short)]
        title: Option<String>,

        /// New author
        #[arg(long, short)]
        author: Option<String>,

        /// New publication year
        #[arg(long, short)]
        year: Option<String>,

        /// New genre
        #[arg(long, short)]
        genre: Option<String>,

        /// Mark the book as read
        #[arg(long, short)]
        read: bool,
    },

    /// List every book in the collection
    List,

    /// Show reading progress
    Stats,

    /// Open the interactive library manager
    Tui,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("Bookshelf starting");
    output.verbose_ctx("config", &format!("Update scan: {}", config.update_scan.as_str()));

    let path = config.data_file(cli.file.as_deref());
    output.verbose_ctx("storage", &format!("Book file: {}", path.display()));

    let mut collection = BookCollection::open(&path)?.with_update_scan(config.update_scan);
    match collection.load_source() {
        LoadSource::File => {
            output.verbose_ctx("storage", &format!("Loaded {} book(s)", collection.len()))
        }
        LoadSource::Missing => {
            output.verbose_ctx("storage", "Book file not found, starting with an empty collection")
        }
        LoadSource::Malformed(reason) => output.verbose_ctx(
            "storage",
            &format!("Book file unreadable ({}), starting with an empty collection", reason),
        ),
    }

    match cli.command {
        Commands::Add { title, author, year, genre, read } => {
            book::add(&output, &mut collection, title, author, year, genre, read)?
        }
        Commands::Remove { title, author } => {
            book::remove(&output, &mut collection, title.as_deref(), author.as_deref())?
        }
        Commands::Search { text } => book::search(&output, &collection, &text)?,
        Commands::Update { old_title, title, author, year, genre, read } => {
            let update = crate::domain::BookUpdate { title, author, year, genre, read };
            book::update(&output, &mut collection, &old_title, &update)?
        }
        Commands::List => book::list(&output, &collection)?,
        Commands::Stats => book::stats(&output, &collection)?,
        Commands::Tui => tui::run(&output, &mut collection)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
