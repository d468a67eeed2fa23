//! Screen layout: title bar, menu sidebar, action pane, key help

mod library;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::app::{Action, App, Focus};

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Menu + action pane
            Constraint::Length(3), // Key help
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(30)])
        .split(rows[1]);

    draw_title(frame, app, rows[0]);
    draw_menu(frame, app, columns[0]);
    library::draw(frame, app, columns[1]);
    draw_help(frame, app, rows[2]);
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(format!(
        "Personal Library Manager  ({} book(s))",
        app.book_count()
    ))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(title, area);
}

fn draw_menu(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Menu;

    let items: Vec<ListItem> = Action::ALL
        .iter()
        .map(|action| ListItem::new(action.label()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Menu")
                .borders(Borders::ALL)
                .border_style(border_style(focused)),
        )
        .highlight_style(
            Style::default()
                .bg(if focused { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.action_index()));

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    let help = match app.focus() {
        Focus::Menu => "j/k:choose  enter:open  q:quit",
        Focus::Form => "tab/arrows:field  space:toggle checkbox  enter:next/submit  esc:menu",
    };

    let paragraph = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

pub(super) fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}
