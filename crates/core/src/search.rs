//! Memo listing and substring search.

use std::fmt;

use serde::Serialize;

use crate::document::{Entry, Memo};
use crate::repo::{MemoRepo, RepoResult, Repository};

const EXCERPT_WIDTH: usize = 80;

/// Expands a query into the variants to match, e.g. a romaji input into its
/// kana spellings.
pub trait QueryExpander {
    fn expand(&self, query: &str) -> Vec<String>;
}

/// Matches the query as typed.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityExpander;

impl QueryExpander for IdentityExpander {
    fn expand(&self, query: &str) -> Vec<String> {
        vec![query.to_string()]
    }
}

/// One `title<TAB>path` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub title: String,
    pub path: String,
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.title, self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchType {
    Title,
    Heading,
    Body,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchType::Title => "Title",
            MatchType::Heading => "Heading",
            MatchType::Body => "Body",
        };
        f.write_str(s)
    }
}

/// A memo matching a search, with where it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub path: String,
    pub match_type: MatchType,
    pub excerpt: String,
}

impl SearchHit {
    /// `title<TAB>path<TAB>[Type]<TAB>excerpt`
    pub fn context_line(&self) -> String {
        format!("{}\t{}\t[{}]\t{}", self.title, self.path, self.match_type, self.excerpt)
    }

    pub fn list_entry(&self) -> ListEntry {
        ListEntry { title: self.title.clone(), path: self.path.clone() }
    }
}

/// Every memo as a list entry, in enumeration order.
pub fn list(repo: &MemoRepo, show_full_path: bool) -> RepoResult<Vec<ListEntry>> {
    Ok(repo.entries()?.iter().map(|memo| list_entry(repo, memo, show_full_path)).collect())
}

/// Memos whose title, a heading or the text contains `query`, ignoring case.
///
/// Each memo is reported once, at its first match in the order title,
/// heading, body.
pub fn search(
    repo: &MemoRepo,
    query: &str,
    show_full_path: bool,
    expander: &dyn QueryExpander,
) -> RepoResult<Vec<SearchHit>> {
    let needles: Vec<String> = expander.expand(query).iter().map(|q| q.to_lowercase()).collect();

    let mut hits = Vec::new();
    for memo in repo.entries()? {
        if let Some((match_type, excerpt)) = find_match(&memo, &needles) {
            let entry = list_entry(repo, &memo, show_full_path);
            hits.push(SearchHit { title: entry.title, path: entry.path, match_type, excerpt });
        }
    }
    tracing::debug!("search '{query}': {} hits", hits.len());
    Ok(hits)
}

fn list_entry(repo: &MemoRepo, memo: &Memo, show_full_path: bool) -> ListEntry {
    let path = if show_full_path {
        repo.path_of(memo).display().to_string()
    } else {
        memo.link_path()
    };
    ListEntry { title: memo.display_title(), path }
}

fn find_match(memo: &Memo, needles: &[String]) -> Option<(MatchType, String)> {
    let title = memo.display_title();
    if let Some(excerpt) = excerpt(&title, needles) {
        return Some((MatchType::Title, excerpt));
    }

    let doc = memo.document();
    for block in doc.heading_blocks() {
        if let Some(excerpt) = excerpt(block.heading_text(), needles) {
            return Some((MatchType::Heading, excerpt));
        }
    }

    doc.body()
        .into_iter()
        .chain(doc.heading_blocks())
        .find_map(|block| excerpt(block.content_text(), needles))
        .map(|excerpt| (MatchType::Body, excerpt))
}

/// The first line of `text` containing any needle, shortened around the
/// match.
fn excerpt(text: &str, needles: &[String]) -> Option<String> {
    text.lines().find_map(|line| {
        let lower = line.to_lowercase();
        let at = needles.iter().find_map(|n| lower.find(n.as_str()))?;
        Some(window(line.trim(), lower[..at].chars().count()))
    })
}

fn window(line: &str, match_char: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= EXCERPT_WIDTH {
        return line.to_string();
    }

    let start = match_char.saturating_sub(EXCERPT_WIDTH / 2).min(chars.len() - EXCERPT_WIDTH);
    let end = start + EXCERPT_WIDTH;
    let mut out = String::new();
    if start > 0 {
        out.push_str("...");
    }
    out.extend(&chars[start..end]);
    if end < chars.len() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::{TempDir, tempdir};

    fn setup() -> (TempDir, MemoRepo) {
        let tmp = tempdir().unwrap();
        let repo = MemoRepo::new(tmp.path());
        let at = |h| NaiveDate::from_ymd_opt(2023, 1, 2).unwrap().and_hms_opt(h, 0, 0).unwrap();

        let memos = [
            Memo::from_markdown(at(9), "Rust notes", vec!["dev".into()], "## Ownership\n\nborrowck\n"),
            Memo::from_markdown(at(10), "shopping", Vec::new(), "milk\n\n## Friday\n\nbuy RUST remover\n"),
            Memo::from_markdown(at(11), "journal", Vec::new(), "nothing here\n"),
        ];
        for memo in &memos {
            repo.save(memo, false).unwrap();
        }
        (tmp, repo)
    }

    #[test]
    fn list_relative_and_full() {
        let (tmp, repo) = setup();

        let short = list(&repo, false).unwrap();
        assert_eq!(short[0].to_string(), "Rust-notes\tdev/20230102Mon090000_memo_Rust-notes.md");

        let full = list(&repo, true).unwrap();
        assert_eq!(
            full[1].path,
            tmp.path().join("20230102Mon100000_memo_shopping.md").display().to_string()
        );
    }

    #[test]
    fn search_reports_first_match_kind() {
        let (_tmp, repo) = setup();
        let hits = search(&repo, "rust", false, &IdentityExpander).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].match_type, MatchType::Title);
        assert_eq!(hits[1].match_type, MatchType::Body);
        assert_eq!(hits[1].excerpt, "buy RUST remover");
        assert_eq!(
            hits[1].context_line(),
            "shopping\t20230102Mon100000_memo_shopping.md\t[Body]\tbuy RUST remover"
        );
    }

    #[test]
    fn search_matches_headings() {
        let (_tmp, repo) = setup();
        let hits = search(&repo, "OWNER", false, &IdentityExpander).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].match_type, hits[0].excerpt.as_str()), (MatchType::Heading, "Ownership"));
    }

    struct Synonyms;

    impl QueryExpander for Synonyms {
        fn expand(&self, query: &str) -> Vec<String> {
            vec![query.to_string(), "milk".to_string()]
        }
    }

    #[test]
    fn expander_variants_are_matched() {
        let (_tmp, repo) = setup();
        let hits = search(&repo, "dairy", false, &Synonyms).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "shopping");
    }

    #[test]
    fn long_lines_are_windowed() {
        let line = format!("{}needle{}", "a".repeat(100), "b".repeat(100));
        let out = excerpt(&line, &["needle".to_string()]).unwrap();
        assert!(out.starts_with("...") && out.ends_with("..."));
        assert!(out.contains("needle"));
    }
}
