//! TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::form::{Field, Form};
use super::views;
use super::Terminal;
use crate::domain::{Book, BookUpdate, ReadingProgress};
use crate::storage::BookCollection;

/// Menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddBook,
    RemoveBook,
    SearchBook,
    UpdateBook,
    ViewCollection,
    ReadingProgress,
    Exit,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::AddBook,
        Action::RemoveBook,
        Action::SearchBook,
        Action::UpdateBook,
        Action::ViewCollection,
        Action::ReadingProgress,
        Action::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::AddBook => "Add Book",
            Action::RemoveBook => "Remove Book",
            Action::SearchBook => "Search Book",
            Action::UpdateBook => "Update Book",
            Action::ViewCollection => "View Your Collection",
            Action::ReadingProgress => "Reading Progress",
            Action::Exit => "Exit",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Action::AddBook => "Add a new book",
            Action::RemoveBook => "Remove a book",
            Action::SearchBook => "Search for books",
            Action::UpdateBook => "Update book details",
            Action::ViewCollection => "Your collection",
            Action::ReadingProgress => "Your reading progress",
            Action::Exit => "Exit",
        }
    }

    fn form(&self) -> Form {
        match self {
            Action::AddBook => Form::new(
                vec![
                    Field::text("Book Title"),
                    Field::text("Author Name"),
                    Field::text("Publication Year"),
                    Field::text("Book Genre"),
                    Field::checkbox("Have you read this book?"),
                ],
                "Add Book",
            ),
            Action::RemoveBook => Form::new(
                vec![
                    Field::text("Title to remove (optional)"),
                    Field::text("Author to remove (optional)"),
                ],
                "Remove Book",
            ),
            Action::SearchBook => Form::new(vec![Field::text("Title or author")], "Search"),
            Action::UpdateBook => Form::new(
                vec![
                    Field::text("Title of the book to update"),
                    Field::text("New title (blank keeps it)"),
                    Field::text("New author (blank keeps it)"),
                    Field::text("New year (blank keeps it)"),
                    Field::text("New genre (blank keeps it)"),
                    Field::checkbox("Have you read this book?"),
                ],
                "Update Book Details",
            ),
            Action::ViewCollection | Action::ReadingProgress => Form::new(vec![], "Refresh"),
            Action::Exit => Form::new(vec![], "Exit"),
        }
    }
}

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Menu,
    Form,
}

/// Result of the last submitted action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Warning(String),
    Info(String),
}

/// Content shown under the form
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Empty,
    Books(Vec<Book>),
    Progress(ReadingProgress),
    Farewell,
}

/// Application state
pub struct App<'a> {
    collection: &'a mut BookCollection,
    action_index: usize,
    focus: Focus,
    form: Form,
    feedback: Option<Feedback>,
    panel: Panel,
    should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(collection: &'a mut BookCollection) -> Self {
        let action = Action::ALL[0];
        Self {
            collection,
            action_index: 0,
            focus: Focus::Menu,
            form: action.form(),
            feedback: None,
            panel: Panel::Empty,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Tick => {}
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        views::draw(frame, self);
    }

    /// Handle a key press. Store failures are returned to the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        if self.panel == Panel::Farewell {
            self.should_quit = true;
            return Ok(());
        }

        match self.focus {
            Focus::Menu => self.handle_menu_key(key),
            Focus::Form => self.handle_form_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_action((self.action_index + 1) % Action::ALL.len())?
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let len = Action::ALL.len();
                self.select_action((self.action_index + len - 1) % len)?
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.focus = Focus::Form;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Left => self.focus = Focus::Menu,
            KeyCode::Down | KeyCode::Tab => self.form.next(),
            KeyCode::Up | KeyCode::BackTab => self.form.prev(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter if self.form.on_submit() => self.submit()?,
            KeyCode::Enter => self.form.next(),
            KeyCode::Char(c) => self.form.input(c),
            _ => {}
        }
        Ok(())
    }

    fn select_action(&mut self, index: usize) -> Result<()> {
        self.action_index = index;
        self.form = self.action().form();
        self.feedback = None;
        self.panel = Panel::Empty;

        // Read-only views show their content as soon as they are selected
        if matches!(self.action(), Action::ViewCollection | Action::ReadingProgress) {
            self.submit()?;
        }
        Ok(())
    }

    /// Runs the current action against the collection
    pub fn submit(&mut self) -> Result<()> {
        match self.action() {
            Action::AddBook => self.add_book(),
            Action::RemoveBook => self.remove_book(),
            Action::SearchBook => {
                self.search_books();
                Ok(())
            }
            Action::UpdateBook => self.update_book(),
            Action::ViewCollection => {
                self.view_collection();
                Ok(())
            }
            Action::ReadingProgress => {
                self.panel = Panel::Progress(self.collection.progress());
                self.feedback = None;
                Ok(())
            }
            Action::Exit => {
                self.panel = Panel::Farewell;
                self.feedback = Some(Feedback::Success(
                    "Thank you for using your personal library manager. See you next time!"
                        .to_string(),
                ));
                Ok(())
            }
        }
    }

    fn add_book(&mut self) -> Result<()> {
        let book = Book::new(
            self.form.value(0),
            self.form.value(1),
            self.form.value(2),
            self.form.value(3),
            self.form.checked(4),
        );
        self.collection.add(book)?;
        self.form.reset();
        self.feedback = Some(Feedback::Success("Book added successfully!".to_string()));
        Ok(())
    }

    fn remove_book(&mut self) -> Result<()> {
        let title = self.form.optional(0);
        let author = self.form.optional(1);

        if title.is_none() && author.is_none() {
            self.feedback = Some(Feedback::Warning(
                "Please enter at least a title or an author to remove a book.".to_string(),
            ));
            return Ok(());
        }

        let before = self.collection.len();
        self.collection.remove(title.as_deref(), author.as_deref())?;

        self.feedback = Some(if self.collection.len() == before {
            Feedback::Warning("No matching books found!".to_string())
        } else {
            Feedback::Success("Book removed successfully!".to_string())
        });
        Ok(())
    }

    fn search_books(&mut self) {
        let results: Vec<Book> = self
            .collection
            .search(self.form.value(0))
            .into_iter()
            .cloned()
            .collect();

        self.feedback = Some(Feedback::Info(format!("{} book(s) found", results.len())));
        self.panel = Panel::Books(results);
    }

    fn update_book(&mut self) -> Result<()> {
        let update = BookUpdate {
            title: self.form.optional(1),
            author: self.form.optional(2),
            year: self.form.optional(3),
            genre: self.form.optional(4),
            read: self.form.checked(5),
        };

        let updated = self.collection.update(self.form.value(0), &update)?;
        self.feedback = Some(if updated {
            Feedback::Success("Book updated successfully!".to_string())
        } else {
            Feedback::Warning("Book not found".to_string())
        });
        Ok(())
    }

    fn view_collection(&mut self) {
        self.feedback = if self.collection.is_empty() {
            Some(Feedback::Info("No books in your collection yet".to_string()))
        } else {
            None
        };
        self.panel = Panel::Books(self.collection.books().to_vec());
    }

    pub fn action(&self) -> Action {
        Action::ALL[self.action_index]
    }

    pub fn action_index(&self) -> usize {
        self.action_index
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn book_count(&self) -> usize {
        self.collection.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn open(dir: &TempDir) -> BookCollection {
        BookCollection::open(dir.path().join("books.json")).unwrap()
    }

    fn go_to(app: &mut App, action: Action) {
        while app.action() != action {
            app.handle_key(key(KeyCode::Down)).unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).unwrap();
    }

    #[test]
    fn add_book_through_form() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        {
            let mut app = App::new(&mut collection);
            go_to(&mut app, Action::AddBook);
            assert_eq!(app.focus(), Focus::Form);

            type_text(&mut app, "Dune");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            type_text(&mut app, "Frank Herbert");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            type_text(&mut app, "1965");
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert!(app.form().on_submit());
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(
                app.feedback(),
                Some(&Feedback::Success("Book added successfully!".to_string()))
            );
            assert_eq!(app.book_count(), 1);
        }

        assert_eq!(
            collection.books(),
            &[Book::new("Dune", "Frank Herbert", "1965", "", true)]
        );
    }

    #[test]
    fn remove_without_filters_warns() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(Book::new("1984", "George Orwell", "1949", "", true)).unwrap();

        let mut app = App::new(&mut collection);
        go_to(&mut app, Action::RemoveBook);
        app.handle_key(key(KeyCode::Up)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert!(matches!(app.feedback(), Some(Feedback::Warning(_))));
        assert_eq!(app.book_count(), 1);
    }

    #[test]
    fn remove_reports_missing_match() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(Book::new("1984", "George Orwell", "1949", "", true)).unwrap();

        let mut app = App::new(&mut collection);
        go_to(&mut app, Action::RemoveBook);
        type_text(&mut app, "Dune");
        app.handle_key(key(KeyCode::Up)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            app.feedback(),
            Some(&Feedback::Warning("No matching books found!".to_string()))
        );

        app.handle_key(key(KeyCode::Esc)).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        go_to(&mut app, Action::RemoveBook);
        type_text(&mut app, "1984");
        app.handle_key(key(KeyCode::Up)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            app.feedback(),
            Some(&Feedback::Success("Book removed successfully!".to_string()))
        );
        assert_eq!(app.book_count(), 0);
    }

    #[test]
    fn search_fills_panel() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        let hobbit = Book::new("The Hobbit", "J.R.R. Tolkien", "1937", "Fantasy", false);
        collection.add(hobbit.clone()).unwrap();

        let mut app = App::new(&mut collection);
        go_to(&mut app, Action::SearchBook);
        type_text(&mut app, "hob");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.panel(), &Panel::Books(vec![hobbit]));
    }

    #[test]
    fn update_reports_not_found_for_later_book() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(Book::new("A", "x", "", "", false)).unwrap();
        collection.add(Book::new("B", "y", "", "", false)).unwrap();

        let mut app = App::new(&mut collection);
        go_to(&mut app, Action::UpdateBook);
        type_text(&mut app, "B");
        app.handle_key(key(KeyCode::Up)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(
            app.feedback(),
            Some(&Feedback::Warning("Book not found".to_string()))
        );
    }

    #[test]
    fn selecting_views_shows_content() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);
        collection.add(Book::new("A", "x", "", "", true)).unwrap();
        collection.add(Book::new("B", "y", "", "", false)).unwrap();

        let mut app = App::new(&mut collection);
        while app.action() != Action::ViewCollection {
            app.handle_key(key(KeyCode::Down)).unwrap();
        }
        assert!(matches!(app.panel(), Panel::Books(books) if books.len() == 2));

        app.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(
            app.panel(),
            &Panel::Progress(ReadingProgress { total: 2, read: 1 })
        );
    }

    #[test]
    fn exit_quits_on_next_key() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);

        let mut app = App::new(&mut collection);
        go_to(&mut app, Action::Exit);
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.panel(), &Panel::Farewell);
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn q_in_menu_quits() {
        let dir = TempDir::new().unwrap();
        let mut collection = open(&dir);

        let mut app = App::new(&mut collection);
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit());
    }
}
