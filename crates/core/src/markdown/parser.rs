//! Splits a Markdown source into a top-level body and heading blocks.
//!
//! Headings are located with comrak so that `#` lines inside fenced code,
//! block quotes or list items stay content. Block text is sliced from the
//! raw source to keep the user's formatting byte-for-byte.

use comrak::nodes::NodeValue;
use comrak::{Arena, Options, parse_document};

use super::types::{HeadingBlock, normalize_content};

/// Result of parsing a Markdown source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedMarkdown {
    pub body: Option<HeadingBlock>,
    pub blocks: Vec<HeadingBlock>,
}

/// A top-level ATX heading located in the source.
#[derive(Debug)]
struct HeadingLine {
    /// Zero-based line index.
    line: usize,
    level: u8,
}

pub fn parse(source: &str) -> ParsedMarkdown {
    let lines: Vec<&str> = source.lines().collect();
    let headings = find_heading_lines(source, lines.len());

    let first = headings.first().map_or(lines.len(), |h| h.line);
    let body_text = normalize_content(&lines[..first].join("\n"));
    let body = (!body_text.is_empty()).then(|| HeadingBlock::body(&body_text));

    let blocks = headings
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let end = headings.get(i + 1).map_or(lines.len(), |next| next.line);
            let content = lines[h.line + 1..end].join("\n");
            HeadingBlock::new(h.level, heading_text(lines[h.line]), &content)
        })
        .collect();

    ParsedMarkdown { body, blocks }
}

/// Make block content safe to serialise between two headings.
///
/// Top-level ATX heading lines get their first `#` escaped and a code fence
/// left open at the end is closed, so the text parses back as one block.
/// Already sealed content is returned unchanged.
pub(crate) fn seal_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, content, &options);

    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    let mut open_fence = None;
    for node in root.children() {
        let data = node.data.borrow();
        match data.value {
            NodeValue::Heading(ref heading) if !heading.setext => {
                let line = data.sourcepos.start.line.saturating_sub(1);
                if let Some(text) = lines.get_mut(line)
                    && let Some(at) = text.find('#')
                {
                    text.insert(at, '\\');
                }
            }
            NodeValue::CodeBlock(ref code) if code.fenced => {
                let start = data.sourcepos.start.line.saturating_sub(1);
                let end = data.sourcepos.end.line.saturating_sub(1);
                let fence = (code.fence_char as char).to_string().repeat(code.fence_length);
                let closed = end > start
                    && lines.get(end).is_some_and(|l| is_closing_fence(l, &fence));
                open_fence = (!closed).then_some(fence);
            }
            _ => open_fence = None,
        }
    }

    if let Some(fence) = open_fence {
        lines.push(fence);
    }
    lines.join("\n")
}

fn is_closing_fence(line: &str, fence: &str) -> bool {
    let trimmed = line.trim();
    let Some(first) = fence.chars().next() else {
        return false;
    };
    trimmed.len() >= fence.len() && trimmed.chars().all(|c| c == first)
}

fn find_heading_lines(source: &str, line_count: usize) -> Vec<HeadingLine> {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, source, &options);

    let mut headings = Vec::new();
    for node in root.children() {
        let data = node.data.borrow();
        if let NodeValue::Heading(ref heading) = data.value {
            if heading.setext {
                continue;
            }
            let line = data.sourcepos.start.line.saturating_sub(1);
            if line < line_count {
                headings.push(HeadingLine { line, level: heading.level });
            }
        }
    }
    headings
}

/// Heading text from a raw ATX line: leading hashes and an optional closing
/// hash sequence removed.
pub(crate) fn heading_text(line: &str) -> String {
    let text = line.trim_start().trim_start_matches('#').trim();
    let without_closing = text.trim_end_matches('#');

    if without_closing.is_empty() {
        String::new()
    } else if without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end().to_string()
    } else {
        text.to_string()
    }
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.parse.smart = false;
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::types::serialize;

    #[test]
    fn splits_body_and_blocks() {
        let parsed = parse("intro line\n\n# Title\n\ntext\n## todos\n\n- [ ] a\n");

        assert_eq!(parsed.body, Some(HeadingBlock::body("intro line")));
        assert_eq!(
            parsed.blocks,
            vec![
                HeadingBlock::new(1, "Title", "text"),
                HeadingBlock::new(2, "todos", "- [ ] a"),
            ]
        );
    }

    #[test]
    fn list_is_flat_regardless_of_nesting() {
        let parsed = parse("# a\n## b\n### c\n## d\n");
        let levels: Vec<u8> = parsed.blocks.iter().map(HeadingBlock::level).collect();
        assert_eq!(levels, vec![1, 2, 3, 2]);
        assert!(parsed.body.is_none());
    }

    #[test]
    fn hashes_inside_code_fences_are_content() {
        let src = "## script\n\n```sh\n# not a heading\necho hi\n```\n## next\n";
        let parsed = parse(src);

        assert_eq!(parsed.blocks.len(), 2);
        assert_eq!(
            parsed.blocks[0].content_text(),
            "```sh\n# not a heading\necho hi\n```"
        );
    }

    #[test]
    fn setext_headings_and_front_matter_stay_in_body() {
        let parsed = parse("---\ntitle: x\n---\n\nSub\n===\n\n## real\n");

        assert_eq!(
            parsed.body.as_ref().map(HeadingBlock::content_text),
            Some("---\ntitle: x\n---\n\nSub\n===")
        );
        assert_eq!(parsed.blocks, vec![HeadingBlock::empty(2, "real")]);
    }

    #[test]
    fn strips_closing_hash_sequence_but_keeps_inner_hash() {
        assert_eq!(heading_text("## done ##"), "done");
        assert_eq!(heading_text("## C#"), "C#");
        assert_eq!(heading_text("  ### spaced"), "spaced");
        assert_eq!(heading_text("##"), "");
    }

    #[test]
    fn parse_then_serialize_is_stable() {
        let body = HeadingBlock::body("preface\n\nmore");
        let blocks = vec![
            HeadingBlock::new(1, "Memo", "    indented code\n\ntext"),
            HeadingBlock::empty(2, "empty"),
            HeadingBlock::new(2, "list", "- a\n  - b"),
            HeadingBlock::new(4, "quote", "> # quoted hash"),
        ];

        let parsed = parse(&serialize(Some(&body), &blocks));
        assert_eq!(parsed.body, Some(body));
        assert_eq!(parsed.blocks, blocks);
    }

    #[test]
    fn seal_escapes_top_level_heading_lines_only() {
        assert_eq!(seal_content("text\n\n# not a heading"), "text\n\n\\# not a heading");
        assert_eq!(seal_content("  ## indented"), "  \\## indented");
        assert_eq!(seal_content("> # quoted\n\n```\n# code\n```"), "> # quoted\n\n```\n# code\n```");
    }

    #[test]
    fn seal_closes_trailing_open_fence() {
        assert_eq!(seal_content("```rust\nfn x() {}"), "```rust\nfn x() {}\n```");
        assert_eq!(seal_content("~~~~\n```"), "~~~~\n```\n~~~~");
        assert_eq!(seal_content("```\n```"), "```\n```");
    }

    #[test]
    fn seal_is_idempotent() {
        let once = seal_content("# a\n\n```\nb");
        assert_eq!(seal_content(&once), once);
    }

    #[test]
    fn empty_source() {
        assert_eq!(parse(""), ParsedMarkdown::default());
    }
}
