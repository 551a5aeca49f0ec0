//! Status bar rendering.

use memov2_core::category::DialogMode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, Mode};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let (left_text, right_text) = match &app.mode {
        Mode::Browse => (
            " [j/k] navigate  [Enter] open  [r] rename  [c] category  [y] duplicate  [q] quit",
            "Ready",
        ),
        Mode::Rename => (" [Enter] submit  [Esc] cancel", "Rename"),
        Mode::Category(dialog) => match dialog.mode() {
            DialogMode::Normal => (
                " [Space] select  [Tab] fold  [n] new  [Enter] move  [Esc] cancel",
                "Category",
            ),
            DialogMode::Input { .. } => (" [Enter] add  [Esc] back", "New category"),
        },
    };

    let (right_content, right_len) = match &app.status {
        Some(status) => {
            let style = if status.is_error {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            (Span::styled(status.text.as_str(), style), status.text.len())
        }
        None => (Span::styled(right_text, Style::default().fg(Color::DarkGray)), right_text.len()),
    };

    let left = Span::styled(left_text, Style::default().fg(Color::DarkGray));

    let padding =
        area.width.saturating_sub(left_text.len() as u16 + right_len as u16 + 2) as usize;

    let line = Line::from(vec![left, Span::raw(" ".repeat(padding)), right_content]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(paragraph, area);
}
