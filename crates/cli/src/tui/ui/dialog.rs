//! Category chooser popup.

use memov2_core::category::{CategoryDialog, DialogMode};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

pub fn draw(frame: &mut Frame, area: Rect, dialog: &CategoryDialog) {
    let popup = centered(area, 60, 70);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title("Move to category")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let rows = dialog.rows();
    let items: Vec<ListItem> = if rows.is_empty() {
        vec![ListItem::new(Span::styled(
            " (no categories, press n to add one)",
            Style::default().fg(Color::DarkGray).italic(),
        ))]
    } else {
        rows.iter().map(|path| ListItem::new(row_line(dialog, path))).collect()
    };

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(dialog.cursor()));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let footer = match dialog.mode() {
        DialogMode::Input { buffer } => Line::from(vec![
            Span::styled(" New: ", Style::default().fg(Color::Cyan).bold()),
            Span::raw(buffer.as_str()),
            Span::styled("_", Style::default().fg(Color::Gray).rapid_blink()),
        ]),
        DialogMode::Normal => {
            let target = dialog.commit();
            let text =
                if target.is_empty() { "/".to_string() } else { target.join("/") };
            Line::from(vec![
                Span::styled(" Target: ", Style::default().fg(Color::DarkGray)),
                Span::styled(text, Style::default().fg(Color::Green)),
            ])
        }
    };
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}

fn row_line<'a>(dialog: &CategoryDialog, path: &'a [String]) -> Line<'a> {
    let depth = path.len().saturating_sub(1);
    let marker = if !dialog.has_children(path) {
        " "
    } else if dialog.is_collapsed(path) {
        "▸"
    } else {
        "▾"
    };
    let check = if dialog.is_selected(path) { "[x]" } else { "[ ]" };
    let name = path.last().map(String::as_str).unwrap_or_default();

    Line::from(vec![
        Span::raw(format!(" {}{marker} {check} ", "  ".repeat(depth))),
        Span::raw(name),
    ])
}

/// A rectangle covering `percent_x` by `percent_y` of `area`, centred.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
