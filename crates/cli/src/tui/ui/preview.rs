//! Preview pane: heading outline and text of the selected memo.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use memov2_core::document::Entry;
use memov2_core::markdown::{flatten, outline};

use crate::tui::app::{App, Mode};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    if matches!(app.mode, Mode::Rename) {
        draw_input_form(frame, area, app);
        return;
    }

    let Some(memo) = app.selected_memo() else {
        let paragraph = Paragraph::new("Create a memo with `memov2 memos new`")
            .style(Style::default().fg(Color::DarkGray))
            .block(bordered("Preview", Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        memo.link_path(),
        Style::default().fg(Color::Cyan).bold(),
    ))];

    let blocks = memo.document().heading_blocks();
    let nodes = outline(blocks);
    let flat = flatten(&nodes);
    if !flat.is_empty() {
        lines.push(Line::from(""));
        for (depth, block) in flat {
            lines.push(Line::from(vec![
                Span::raw("  ".repeat(depth + 1)),
                Span::styled(block.heading_text().to_string(), Style::default().fg(Color::Yellow)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.extend(memo.content_string().lines().map(|l| Line::from(l.to_string())));

    let paragraph = Paragraph::new(lines)
        .block(bordered(&memo.display_title(), Color::DarkGray))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn bordered(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn draw_input_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some((label, buffer)) = app.current_input() else {
        return;
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            format!("  {label}: "),
            Style::default().fg(Color::Cyan).bold(),
        )]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(buffer, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Gray).rapid_blink()),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  [Enter] submit  [Esc] cancel",
            Style::default().fg(Color::DarkGray),
        )]),
    ];

    let paragraph = Paragraph::new(content).block(bordered("Rename", Color::Cyan));
    frame.render_widget(paragraph, area);
}
