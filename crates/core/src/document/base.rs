use chrono::NaiveDateTime;

use crate::filename::{self, FileKind};
use crate::markdown::{self, HeadingBlock};

use super::DocumentError;

/// State shared by every document kind.
///
/// The filename is derived from `(kind, date, title)` on demand and never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    kind: FileKind,
    date: NaiveDateTime,
    title: String,
    body: Option<HeadingBlock>,
    blocks: Vec<HeadingBlock>,
}

impl Document {
    pub fn new(kind: FileKind, date: NaiveDateTime, title: impl Into<String>) -> Self {
        Self { kind, date, title: title.into(), body: None, blocks: Vec::new() }
    }

    /// Build a document from Markdown source.
    pub fn from_markdown(
        kind: FileKind,
        date: NaiveDateTime,
        title: impl Into<String>,
        source: &str,
    ) -> Self {
        let parsed = markdown::parse(source);
        Self {
            kind,
            date,
            title: title.into(),
            body: parsed.body,
            blocks: parsed.blocks,
        }
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn set_date(&mut self, date: NaiveDateTime) {
        self.date = date;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn file_name(&self) -> String {
        filename::encode(self.kind, self.date, &self.title)
    }

    pub fn body(&self) -> Option<&HeadingBlock> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, content: &str) {
        let body = HeadingBlock::body(content);
        self.body = (!body.content_text().is_empty()).then_some(body);
    }

    pub fn heading_blocks(&self) -> &[HeadingBlock] {
        &self.blocks
    }

    pub fn last_heading_block(&self) -> Option<&HeadingBlock> {
        self.blocks.last()
    }

    pub fn set_heading_blocks(&mut self, blocks: Vec<HeadingBlock>) {
        self.blocks = blocks;
    }

    pub fn push_heading_block(&mut self, block: HeadingBlock) {
        self.blocks.push(block);
    }

    /// First block whose heading text equals `heading_text`, at any level.
    pub fn find_heading_block(&self, heading_text: &str) -> Option<&HeadingBlock> {
        self.blocks.iter().find(|b| b.heading_text() == heading_text)
    }

    /// Replace the first block matching `input` on `(level, heading_text)`.
    pub fn override_heading_block_matched(
        &mut self,
        input: &HeadingBlock,
    ) -> Result<(), DocumentError> {
        let slot = self.blocks.iter_mut().find(|b| b.matches(input)).ok_or_else(|| {
            DocumentError::HeadingNotFound {
                level: input.level(),
                heading: input.heading_text().to_string(),
            }
        })?;
        *slot = input.clone();
        Ok(())
    }

    /// Apply [`Self::override_heading_block_matched`] in order, stopping at the
    /// first block that has no match.
    pub fn override_heading_blocks_matched(
        &mut self,
        inputs: &[HeadingBlock],
    ) -> Result<(), DocumentError> {
        inputs.iter().try_for_each(|input| self.override_heading_block_matched(input))
    }

    pub fn content_string(&self) -> String {
        markdown::serialize(self.body.as_ref(), &self.blocks)
    }
}
