//! Memo index: a Markdown outline of the memos directory.

use std::cmp::Ordering;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::filename::{FileKind, extract_title};
use crate::repo::walker::{components, is_hidden};
use crate::repo::{RepoError, RepoResult};

/// Render the index of the memos under `root`.
///
/// Top-level directories become `## name` sections, deeper directories nested
/// bullets, and each memo a `- [title](a/b/file.md)` link. Within a directory,
/// memos come before subdirectories and both are in lexical order.
pub fn build_index(root: &Path) -> RepoResult<String> {
    let mut lines: Vec<String> = Vec::new();
    if !root.is_dir() {
        return Ok(String::new());
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .max_open(1)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|source| RepoError::Walk { path: root.to_path_buf(), source })?;
        let name = entry.file_name().to_string_lossy();
        let depth = entry.depth();

        if entry.file_type().is_dir() {
            if depth == 1 {
                if !lines.is_empty() {
                    lines.push(String::new());
                }
                lines.push(format!("## {name}"));
                lines.push(String::new());
            } else {
                lines.push(format!("{}- {name}", indent(depth - 2)));
            }
            continue;
        }

        if !FileKind::Memo.matches(&name) {
            tracing::debug!("index: skipping {}", entry.path().display());
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        lines.push(format!(
            "{}- [{}]({})",
            indent(depth.saturating_sub(2)),
            extract_title(&name),
            components(relative).join("/")
        ));
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}
