use chrono::NaiveDateTime;

use crate::filename::FileKind;
use crate::markdown::HeadingBlock;

use super::{Document, Entry, TODOS_HEADING, WANTTODOS_HEADING};

/// The seed for each new day's todo file (`todos_template.md`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTemplate {
    doc: Document,
}

impl TodoTemplate {
    /// The default template: empty `todos` and `wanttodos` sections.
    pub fn new() -> Self {
        let mut doc =
            Document::new(FileKind::TodoTemplate, NaiveDateTime::default(), "template");
        doc.set_heading_blocks(vec![
            HeadingBlock::empty(2, TODOS_HEADING),
            HeadingBlock::empty(2, WANTTODOS_HEADING),
        ]);
        Self { doc }
    }

    pub fn from_markdown(source: &str) -> Self {
        Self {
            doc: Document::from_markdown(
                FileKind::TodoTemplate,
                NaiveDateTime::default(),
                "template",
                source,
            ),
        }
    }
}

impl Default for TodoTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Entry for TodoTemplate {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}
