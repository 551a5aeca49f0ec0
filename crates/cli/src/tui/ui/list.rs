//! Memo list rendering.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use memov2_core::document::{Entry, Memo};

use crate::tui::app::App;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = if app.memos.is_empty() {
        vec![ListItem::new(Span::styled(
            " (no memos yet)",
            Style::default().fg(Color::DarkGray).italic(),
        ))]
    } else {
        app.memos
            .iter()
            .map(|memo| {
                let date = memo_date(memo);
                let mut spans = vec![
                    Span::styled(format!(" {date} "), Style::default().fg(Color::DarkGray)),
                    Span::raw(memo.display_title()),
                ];
                if !memo.category_tree().is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", memo.category_tree().join("/")),
                        Style::default().fg(Color::Magenta),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Memos ({})", app.memos.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol(">");

    let mut state = ListState::default();
    if !app.memos.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn memo_date(memo: &Memo) -> String {
    memo.date().format("%Y-%m-%d %H:%M").to_string()
}
