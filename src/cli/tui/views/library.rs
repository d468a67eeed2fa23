//! Action pane: form, feedback line and results

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

use super::border_style;
use crate::cli::book::describe;
use crate::cli::tui::app::{App, Feedback, Focus, Panel};
use crate::cli::tui::form::FieldKind;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    // Fields, submit row and borders
    let form_height = app.form().fields().len() as u16 + 3;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form_height),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    draw_form(frame, app, chunks[0]);
    draw_feedback(frame, app, chunks[1]);
    draw_panel(frame, app, chunks[2]);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus() == Focus::Form;
    let form = app.form();

    let mut lines: Vec<Line> = form
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let selected = focused && index == form.selected();
            let text = match field.kind {
                FieldKind::Text => {
                    let cursor = if selected { "_" } else { "" };
                    format!("{}: {}{}", field.label, field.value, cursor)
                }
                FieldKind::Checkbox => {
                    let mark = if field.checked { "x" } else { " " };
                    format!("[{}] {}", mark, field.label)
                }
            };
            row(text, selected)
        })
        .collect();

    lines.push(row(
        format!("[ {} ]", form.submit_label()),
        focused && form.on_submit(),
    ));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(app.action().heading())
            .borders(Borders::ALL)
            .border_style(border_style(focused)),
    );

    frame.render_widget(paragraph, area);
}

fn row(text: String, selected: bool) -> Line<'static> {
    if selected {
        Line::styled(
            format!("> {}", text),
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )
    } else {
        Line::raw(format!("  {}", text))
    }
}

fn draw_feedback(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.feedback() {
        Some(Feedback::Success(msg)) => (msg.as_str(), Style::default().fg(Color::Green)),
        Some(Feedback::Warning(msg)) => (msg.as_str(), Style::default().fg(Color::Yellow)),
        Some(Feedback::Info(msg)) => (msg.as_str(), Style::default().fg(Color::Cyan)),
        None => ("", Style::default()),
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn draw_panel(frame: &mut Frame, app: &App, area: Rect) {
    match app.panel() {
        Panel::Empty => {
            frame.render_widget(Block::default().borders(Borders::ALL), area);
        }
        Panel::Books(books) => {
            let items: Vec<ListItem> = books
                .iter()
                .enumerate()
                .map(|(index, book)| {
                    let style = if book.read {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default()
                    };
                    ListItem::new(format!("{}. {}", index + 1, describe(book))).style(style)
                })
                .collect();

            let list = List::new(items).block(
                Block::default()
                    .title(format!("Books ({})", books.len()))
                    .borders(Borders::ALL),
            );
            frame.render_widget(list, area);
        }
        Panel::Progress(progress) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Length(3), Constraint::Min(0)])
                .split(area);

            let counts = Paragraph::new(vec![
                Line::raw(format!("Total books: {}", progress.total)),
                Line::raw(format!("Books read: {}", progress.read)),
            ])
            .block(Block::default().borders(Borders::TOP | Borders::LEFT | Borders::RIGHT));
            frame.render_widget(counts, chunks[0]);

            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL))
                .gauge_style(Style::default().fg(Color::Green))
                .ratio(progress.ratio().clamp(0.0, 1.0))
                .label(format!("Progress: {:.2}%", progress.percent()));
            frame.render_widget(gauge, chunks[1]);
        }
        Panel::Farewell => {
            let paragraph = Paragraph::new("Press any key to leave.")
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(paragraph, area);
        }
    }
}
