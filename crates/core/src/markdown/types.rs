use std::fmt;

use super::parser::seal_content;

/// One Markdown heading and the raw text up to the next heading.
///
/// Level 0 with an empty heading is the top-level body of a document.
/// Content is kept normalised: no leading blank lines, no trailing whitespace,
/// top-level heading lines escaped and code fences closed. A block therefore
/// serialises to text that parses back to an equal block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeadingBlock {
    level: u8,
    heading_text: String,
    content_text: String,
}

impl HeadingBlock {
    /// Create a heading block. `level` is clamped to 1..=6.
    pub fn new(level: u8, heading_text: impl Into<String>, content_text: &str) -> Self {
        let heading_text: String = heading_text.into();
        Self {
            level: level.clamp(1, 6),
            heading_text: canonical_heading(&heading_text),
            content_text: canonical_content(content_text),
        }
    }

    /// A heading block with no content.
    pub fn empty(level: u8, heading_text: impl Into<String>) -> Self {
        Self::new(level, heading_text, "")
    }

    /// The prose before the first heading.
    pub fn body(content_text: &str) -> Self {
        Self {
            level: 0,
            heading_text: String::new(),
            content_text: canonical_content(content_text),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn heading_text(&self) -> &str {
        &self.heading_text
    }

    pub fn content_text(&self) -> &str {
        &self.content_text
    }

    pub fn set_content_text(&mut self, content_text: &str) {
        self.content_text = canonical_content(content_text);
    }

    pub fn is_body(&self) -> bool {
        self.level == 0
    }

    /// Blocks match when level and heading text are equal; content is ignored.
    pub fn matches(&self, other: &HeadingBlock) -> bool {
        self.level == other.level && self.heading_text == other.heading_text
    }
}

impl fmt::Display for HeadingBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_body() {
            if self.content_text.is_empty() {
                return Ok(());
            }
            return writeln!(f, "{}", self.content_text);
        }

        write!(f, "{} {}\n\n", "#".repeat(self.level as usize), self.heading_text)?;
        if !self.content_text.is_empty() {
            writeln!(f, "{}", self.content_text)?;
        }
        Ok(())
    }
}

/// Strip leading blank lines and trailing whitespace.
pub fn normalize_content(raw: &str) -> String {
    let mut start = 0;
    for line in raw.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    raw[start..].trim_end().to_string()
}

fn canonical_content(raw: &str) -> String {
    seal_content(&normalize_content(raw))
}

/// Single-line heading text. A trailing run of `#` that would read as a
/// closing sequence gets its first `#` escaped.
fn canonical_heading(raw: &str) -> String {
    let text = raw.replace(['\n', '\r'], " ").trim().to_string();
    let before = text.trim_end_matches('#');
    if before.len() == text.len() || !(before.is_empty() || before.ends_with([' ', '\t'])) {
        return text;
    }
    format!("{before}\\{}", &text[before.len()..])
}

/// Serialise a body and heading blocks, one blank line between blocks.
pub fn serialize(body: Option<&HeadingBlock>, blocks: &[HeadingBlock]) -> String {
    let mut out = String::new();
    let body = body.filter(|b| !b.content_text.is_empty());

    for block in body.into_iter().chain(blocks) {
        if !out.is_empty() && !out.ends_with("\n\n") {
            out.push('\n');
        }
        out.push_str(&block.to_string());
    }

    out
}
