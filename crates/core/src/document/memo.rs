use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::filename::{FileKind, extract_title};

use super::{Document, Entry};

/// A titled note filed under a category tree below the memos root.
///
/// An empty category tree places the memo at the memos root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memo {
    doc: Document,
    category_tree: Vec<String>,
}

impl Memo {
    pub fn new(date: NaiveDateTime, title: &str, category_tree: Vec<String>) -> Self {
        Self { doc: Document::new(FileKind::Memo, date, title), category_tree }
    }

    pub fn from_markdown(
        date: NaiveDateTime,
        title: &str,
        category_tree: Vec<String>,
        source: &str,
    ) -> Self {
        Self {
            doc: Document::from_markdown(FileKind::Memo, date, title, source),
            category_tree,
        }
    }

    pub fn category_tree(&self) -> &[String] {
        &self.category_tree
    }

    pub(crate) fn set_category_tree(&mut self, category_tree: Vec<String>) {
        self.category_tree = category_tree;
    }

    /// Title as shown to the user: the slug stored in the filename.
    pub fn display_title(&self) -> String {
        extract_title(&self.file_name())
    }

    /// Path relative to the memos root, `/`-separated on every platform.
    pub fn link_path(&self) -> String {
        let mut parts: Vec<&str> = self.category_tree.iter().map(String::as_str).collect();
        let name = self.file_name();
        parts.push(&name);
        parts.join("/")
    }
}

impl Entry for Memo {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    fn location(&self) -> PathBuf {
        self.category_tree.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 2).unwrap().and_hms_opt(15, 4, 5).unwrap()
    }

    #[test]
    fn location_follows_category_tree() {
        let memo = Memo::new(date(), "Hello World", vec!["work".into(), "q1".into()]);

        assert_eq!(memo.location(), PathBuf::from("work").join("q1"));
        assert_eq!(memo.link_path(), "work/q1/20230102Mon150405_memo_Hello-World.md");
        assert_eq!(memo.display_title(), "Hello-World");
    }

    #[test]
    fn root_memo_has_empty_location() {
        let memo = Memo::new(date(), "x", Vec::new());
        assert_eq!(memo.location(), PathBuf::new());
        assert_eq!(memo.link_path(), "20230102Mon150405_memo_x.md");
    }
}
