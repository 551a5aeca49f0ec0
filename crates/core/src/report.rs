//! Weekly report builders.
//!
//! Both variants fold an ascending sequence of documents into a [`Weekly`],
//! opening a `YYYY | Week N` level-2 heading whenever the ISO `(year, week)`
//! pair changes.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use similar::{Algorithm, TextDiff};

use crate::document::{Entry, Memo, Todo, Weekly};
use crate::filename::DAY_LAYOUT;
use crate::markdown::HeadingBlock;

/// Tracks the current ISO week and appends a heading when it changes.
#[derive(Default)]
struct WeekFrame {
    current: Option<(i32, u32)>,
}

impl WeekFrame {
    fn enter(&mut self, day: NaiveDate, blocks: &mut Vec<HeadingBlock>) {
        let iso = day.iso_week();
        let key = (iso.year(), iso.week());
        if self.current != Some(key) {
            self.current = Some(key);
            blocks.push(HeadingBlock::empty(2, week_heading(day)));
        }
    }
}

/// `YYYY | Week N` using the ISO week-numbering year.
pub fn week_heading(day: NaiveDate) -> String {
    let iso = day.iso_week();
    format!("{} | Week {}", iso.year(), iso.week())
}

/// GitHub-style anchor for a heading: lowercase, spaces to `-`, punctuation
/// dropped.
pub fn anchor(heading: &str) -> String {
    heading
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

/// Memo titles and headings grouped by week, then by day.
///
/// `memos` must already be in ascending date order.
pub fn build_memo_weekly(memos: &[Memo], built_at: NaiveDateTime) -> Weekly {
    let mut blocks = Vec::new();
    let mut frame = WeekFrame::default();
    let mut current_day: Option<NaiveDate> = None;
    let mut items: Vec<String> = Vec::new();

    for memo in memos {
        let day = memo.date().date();
        if current_day != Some(day) {
            flush_day(&mut blocks, &mut items);
            frame.enter(day, &mut blocks);
            blocks.push(HeadingBlock::empty(3, day.format(DAY_LAYOUT).to_string()));
            current_day = Some(day);
        }
        items.push(memo_item(items.len() + 1, memo));
    }
    flush_day(&mut blocks, &mut items);

    let mut weekly = Weekly::new(built_at);
    weekly.document_mut().set_heading_blocks(blocks);
    weekly
}

fn memo_item(ordinal: usize, memo: &Memo) -> String {
    let link = memo.link_path();
    let mut item = format!("{ordinal}. [{}]({link})", memo.display_title());
    for block in memo.document().heading_blocks() {
        let text = block.heading_text();
        item.push_str(&format!("\n  - [{text}]({link}#{})", anchor(text)));
    }
    item
}

fn flush_day(blocks: &mut [HeadingBlock], items: &mut Vec<String>) {
    if items.is_empty() {
        return;
    }
    if let Some(day) = blocks.last_mut() {
        day.set_content_text(&items.join("\n"));
    }
    items.clear();
}

/// Day-to-day changes of the `todos` section as unified diffs.
///
/// Each todo after the first gets a level-3 heading linking to its file; the
/// diff against the previous day follows in a `diff` code block unless the
/// sections are identical. `todos` must already be in ascending date order.
pub fn build_todo_weekly(todos: &[Todo], built_at: NaiveDateTime) -> Weekly {
    let mut blocks = Vec::new();
    let mut frame = WeekFrame::default();

    for pair in todos.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        frame.enter(curr.day(), &mut blocks);

        let name = curr.file_name();
        let heading = format!("[{name}]({name})");
        let content = section_diff(prev, curr)
            .map(|diff| {
                let fence = diff_fence(&diff);
                format!("{fence}diff\n{diff}\n{fence}")
            })
            .unwrap_or_default();
        blocks.push(HeadingBlock::new(3, heading, &content));
    }

    let mut weekly = Weekly::new(built_at);
    weekly.document_mut().set_heading_blocks(blocks);
    weekly
}

/// Myers unified diff of the `todos` sections, `None` when they are equal.
fn section_diff(prev: &Todo, curr: &Todo) -> Option<String> {
    let old = with_newline(prev.todos_section());
    let new = with_newline(curr.todos_section());
    if old == new {
        return None;
    }

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_lines(old.as_str(), new.as_str());
    let text = diff
        .unified_diff()
        .header(&prev.file_name(), &curr.file_name())
        .to_string();
    Some(text.trim_end_matches('\n').to_string())
}

/// A backtick fence longer than any backtick run in `text`, at least three.
fn diff_fence(text: &str) -> String {
    let longest = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

fn with_newline(section: &str) -> String {
    if section.is_empty() { String::new() } else { format!("{section}\n") }
}
