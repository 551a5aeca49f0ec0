//! Filename codec.
//!
//! Every document's metadata (kind, date, title) is encoded in its filename:
//!
//! - todo: `YYYYMMDDDDD_todos.md` (e.g. `20230102Mon_todos.md`)
//! - memo: `YYYYMMDDDDDhhmmss_memo_<slug>.md`
//! - weekly report: `weekly_report.md`
//! - todo template: `todos_template.md`

use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Date layout of a todo filename and of the weekly report date headings.
pub const DAY_LAYOUT: &str = "%Y%m%d%a";
/// Date-time layout of a memo filename.
pub const MEMO_LAYOUT: &str = "%Y%m%d%a%H%M%S";

pub const TODO_SUFFIX: &str = "_todos.md";
pub const MEMO_INFIX: &str = "_memo_";
pub const WEEKLY_FILENAME: &str = "weekly_report.md";
pub const TEMPLATE_FILENAME: &str = "todos_template.md";

static TODO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{8}\S{3})_todos\.md$").expect("valid regex")
});

static MEMO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{8}\S{3}\d{6})_memo_(.*)\.md$").expect("valid regex")
});

/// The closed set of document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Todo,
    Memo,
    Weekly,
    TodoTemplate,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Todo => "todo",
            FileKind::Memo => "memo",
            FileKind::Weekly => "weekly",
            FileKind::TodoTemplate => "todo_template",
        }
    }

    /// Whether `name` (a basename) is a valid filename for this kind.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            FileKind::Todo => TODO_RE.is_match(name),
            FileKind::Memo => MEMO_RE.is_match(name),
            FileKind::Weekly => name == WEEKLY_FILENAME,
            FileKind::TodoTemplate => name == TEMPLATE_FILENAME,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilenameError {
    #[error("filename '{name}' does not match the {kind} format")]
    FormatMismatch { name: String, kind: FileKind },
}

/// Replace characters that cannot appear in a memo slug.
///
/// Lossy: the slug is what gets displayed as the memo title afterwards.
pub fn slugify(title: &str) -> String {
    title.trim().replace([' ', '/', '\\'], "-")
}

/// Encode a document's metadata into its filename.
pub fn encode(kind: FileKind, date: NaiveDateTime, title: &str) -> String {
    match kind {
        FileKind::Todo => format!("{}{TODO_SUFFIX}", date.format(DAY_LAYOUT)),
        FileKind::Memo => {
            format!("{}{MEMO_INFIX}{}.md", date.format(MEMO_LAYOUT), slugify(title))
        }
        FileKind::Weekly => WEEKLY_FILENAME.to_string(),
        FileKind::TodoTemplate => TEMPLATE_FILENAME.to_string(),
    }
}

/// Parse the leading date token of `name` with the layout of `kind`.
///
/// Todo dates resolve to midnight. The weekday abbreviation must agree with
/// the date.
pub fn decode_date(name: &str, kind: FileKind) -> Result<NaiveDateTime, FilenameError> {
    let mismatch = || FilenameError::FormatMismatch { name: name.to_string(), kind };

    match kind {
        FileKind::Todo => {
            let caps = TODO_RE.captures(name).ok_or_else(mismatch)?;
            let day = NaiveDate::parse_from_str(&caps[1], DAY_LAYOUT)
                .map_err(|_| mismatch())?;
            Ok(day.and_time(NaiveTime::MIN))
        }
        FileKind::Memo => {
            let caps = MEMO_RE.captures(name).ok_or_else(mismatch)?;
            NaiveDateTime::parse_from_str(&caps[1], MEMO_LAYOUT).map_err(|_| mismatch())
        }
        FileKind::Weekly | FileKind::TodoTemplate => Err(mismatch()),
    }
}

/// The slug between `_memo_` and `.md`, or `name` unchanged when it is not a
/// memo filename.
pub fn extract_title(name: &str) -> String {
    match MEMO_RE.captures(name) {
        Some(caps) => caps[2].to_string(),
        None => name.to_string(),
    }
}

/// Decode a memo filename into `(date, title)`.
pub fn decode_memo(name: &str) -> Result<(NaiveDateTime, String), FilenameError> {
    let date = decode_date(name, FileKind::Memo)?;
    Ok((date, extract_title(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn encodes_todo_with_weekday() {
        let name = encode(FileKind::Todo, at(2023, 1, 2, 9, 0, 0), "ignored");
        assert_eq!(name, "20230102Mon_todos.md");
    }

    #[test]
    fn encodes_memo_with_slug() {
        let name = encode(FileKind::Memo, at(2023, 1, 2, 15, 4, 5), "Hello World");
        assert_eq!(name, "20230102Mon150405_memo_Hello-World.md");
    }

    #[test]
    fn fixed_names_ignore_metadata() {
        let date = at(2023, 1, 2, 0, 0, 0);
        assert_eq!(encode(FileKind::Weekly, date, "x"), "weekly_report.md");
        assert_eq!(encode(FileKind::TodoTemplate, date, "x"), "todos_template.md");
    }

    #[rstest]
    #[case(FileKind::Todo, "20230102Mon_todos.md", true)]
    #[case(FileKind::Todo, "20230102Mon_todos.md.bak", false)]
    #[case(FileKind::Todo, "2023012Mon_todos.md", false)]
    #[case(FileKind::Memo, "20230102Mon150405_memo_x.md", true)]
    #[case(FileKind::Memo, "20230102Mon150405_memo_.md", true)]
    #[case(FileKind::Memo, "20230102Mon_memo_x.md", false)]
    #[case(FileKind::Memo, "index.md", false)]
    #[case(FileKind::Weekly, "weekly_report.md", true)]
    #[case(FileKind::TodoTemplate, "todos_template.md", true)]
    #[case(FileKind::TodoTemplate, "weekly_report.md", false)]
    fn kind_matches_filename(
        #[case] kind: FileKind,
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(kind.matches(name), expected);
    }

    #[test]
    fn decodes_todo_date_at_midnight() {
        let date = decode_date("20230103Tue_todos.md", FileKind::Todo).unwrap();
        assert_eq!(date, at(2023, 1, 3, 0, 0, 0));
    }

    #[test]
    fn rejects_weekday_that_disagrees_with_date() {
        let err = decode_date("20230103Mon_todos.md", FileKind::Todo).unwrap_err();
        assert!(matches!(err, FilenameError::FormatMismatch { kind: FileKind::Todo, .. }));
    }

    #[test]
    fn memo_round_trip() {
        let date = at(2024, 2, 29, 23, 59, 58);
        let name = encode(FileKind::Memo, date, "slug-safe_title");
        assert_eq!(decode_memo(&name).unwrap(), (date, "slug-safe_title".to_string()));
    }

    #[test]
    fn extract_title_passes_through_unknown_names() {
        assert_eq!(extract_title("20230102Mon150405_memo_a-b.md"), "a-b");
        assert_eq!(extract_title("notes.md"), "notes.md");
    }

    #[test]
    fn slugify_replaces_spaces_and_separators() {
        assert_eq!(slugify(" a b/c\\d "), "a-b-c-d");
    }
}
