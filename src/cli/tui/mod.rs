//! Interactive library manager
//!
//! A terminal form interface over the book collection built on ratatui:
//! a menu of actions on the left, the selected action's form and its
//! results on the right. Each submitted form runs exactly one collection
//! operation.

mod app;
mod event;
mod form;
mod views;

use std::io::{self, stdout, Stdout};
use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::CrosstermBackend;

use super::Output;
use crate::storage::BookCollection;
use app::App;
use event::EventHandler;

/// Terminal type alias
pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Launch the interactive manager
pub fn run(output: &Output, collection: &mut BookCollection) -> Result<()> {
    output.verbose_ctx("tui", "Initializing terminal");

    let mut terminal = init_terminal()?;
    let mut app = App::new(collection);
    let events = EventHandler::new(250);

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, events)));

    let restore_result = restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("Library manager panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("Library manager panicked: {}", s))
            } else {
                Err(anyhow!("Library manager panicked with unknown error"))
            }
        }
    }
}

fn init_terminal() -> Result<Terminal> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(ratatui::Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
