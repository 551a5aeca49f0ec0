use chrono::NaiveDateTime;

use crate::filename::FileKind;

use super::{Document, Entry};

const TITLE: &str = "weekly report";

/// A weekly report (`weekly_report.md`). The date records when it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weekly {
    doc: Document,
}

impl Weekly {
    pub fn new(date: NaiveDateTime) -> Self {
        Self { doc: Document::new(FileKind::Weekly, date, TITLE) }
    }

    pub fn from_markdown(date: NaiveDateTime, source: &str) -> Self {
        Self { doc: Document::from_markdown(FileKind::Weekly, date, TITLE, source) }
    }
}

impl Entry for Weekly {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}
