//! Main layout and frame composition.

use ratatui::{prelude::*, widgets::Paragraph};

use super::{dialog, list, preview, status};
use crate::tui::app::{App, Mode};

/// Draw the entire application UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Main layout: header, body, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Body
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, main_chunks[0], app);

    // Body: memo list | preview
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[1]);

    list::draw(frame, body_chunks[0], app);
    preview::draw(frame, body_chunks[1], app);

    status::draw(frame, main_chunks[2], app);

    if let Mode::Category(d) = &app.mode {
        dialog::draw(frame, main_chunks[1], d);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let root_text = app.config.memos_dir.display().to_string();
    let title = "memov2";

    let padding =
        area.width.saturating_sub(title.len() as u16 + root_text.len() as u16 + 2)
            as usize;

    let line = Line::from(vec![
        Span::styled(format!(" {title}"), Style::default().fg(Color::Cyan).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(root_text, Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
