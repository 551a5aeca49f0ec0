//! Shell completion support with dynamic value completers.
//!
//! Completers read the user's config and memos directory, offering memo paths
//! and category names relative to the memos root.

use clap_complete::engine::CompletionCandidate;
use memov2_core::config::loader::{default_config_path, ConfigLoader};
use memov2_core::repo::{MemoRepo, Repository};
use std::ffi::OsStr;

/// Load the memos repository, returning None if there is no usable config.
fn load_repo() -> Option<MemoRepo> {
    let path = default_config_path();
    if !path.is_file() {
        return None;
    }
    ConfigLoader::load_or_init(Some(&path)).ok().map(|cfg| MemoRepo::new(cfg.memos_dir))
}

/// Complete memo paths relative to the memos root.
pub fn complete_memos(current: &OsStr) -> Vec<CompletionCandidate> {
    let current_str = current.to_str().unwrap_or("");
    load_repo().map(|repo| memo_candidates(&repo, current_str)).unwrap_or_default()
}

/// Complete category path components (`a/b`).
pub fn complete_categories(current: &OsStr) -> Vec<CompletionCandidate> {
    let current_str = current.to_str().unwrap_or("");
    load_repo().map(|repo| category_candidates(&repo, current_str)).unwrap_or_default()
}

fn memo_candidates(repo: &MemoRepo, prefix: &str) -> Vec<CompletionCandidate> {
    let Ok(memos) = repo.entries() else {
        return Vec::new();
    };

    memos
        .iter()
        .map(|memo| (memo.link_path(), memo.display_title()))
        .filter(|(path, _)| path.starts_with(prefix))
        .map(|(path, title)| CompletionCandidate::new(path).help(Some(title.into())))
        .collect()
}

fn category_candidates(repo: &MemoRepo, prefix: &str) -> Vec<CompletionCandidate> {
    let Ok(categories) = repo.categories() else {
        return Vec::new();
    };

    categories
        .iter()
        .filter_map(|tree| tree.last())
        .filter(|name| name.starts_with(prefix))
        .map(|name| CompletionCandidate::new(name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use memov2_core::document::Memo;
    use tempfile::tempdir;

    fn values(candidates: &[CompletionCandidate]) -> Vec<String> {
        candidates.iter().map(|c| c.get_value().to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn memo_paths_filtered_by_prefix() {
        let tmp = tempdir().unwrap();
        let repo = MemoRepo::new(tmp.path());
        let date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap().and_hms_opt(9, 0, 0).unwrap();
        repo.save(&Memo::new(date, "a", vec!["work".into()]), false).unwrap();
        repo.save(&Memo::new(date, "b", Vec::new()), false).unwrap();

        let all = values(&memo_candidates(&repo, ""));
        assert_eq!(all.len(), 2);

        let work = values(&memo_candidates(&repo, "work/"));
        assert_eq!(work, vec!["work/20230102Mon090000_memo_a.md"]);
    }

    #[test]
    fn categories_complete_last_component() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("work/q1")).unwrap();
        let repo = MemoRepo::new(tmp.path());

        assert_eq!(values(&category_candidates(&repo, "q")), vec!["q1"]);
    }
}
