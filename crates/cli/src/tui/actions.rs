//! Repository operations triggered from the browser.
//!
//! Errors are flattened to strings for the status bar.

use std::path::PathBuf;

use memov2_core::document::Memo;
use memov2_core::repo::{MemoRepo, Repository};

/// What an action did and which file should stay selected afterwards.
#[derive(Debug)]
pub struct Outcome {
    pub message: String,
    pub path: PathBuf,
}

pub fn load_memos(repo: &MemoRepo) -> Result<Vec<Memo>, String> {
    repo.entries().map_err(|e| format!("Failed to load memos: {e}"))
}

pub fn rename(repo: &MemoRepo, memo: &mut Memo, title: &str) -> Result<Outcome, String> {
    let before = memo.display_title();
    let path = repo.rename(memo, title).map_err(|e| format!("Rename failed: {e}"))?;
    Ok(Outcome { message: format!("Renamed {before} -> {}", memo.display_title()), path })
}

pub fn move_to(repo: &MemoRepo, memo: &mut Memo, tree: Vec<String>) -> Result<Outcome, String> {
    let path = repo.move_to(memo, tree).map_err(|e| format!("Move failed: {e}"))?;
    let target = if memo.category_tree().is_empty() {
        "/".to_string()
    } else {
        memo.category_tree().join("/")
    };
    Ok(Outcome { message: format!("Moved to {target}"), path })
}

pub fn duplicate(repo: &MemoRepo, memo: &Memo) -> Result<Outcome, String> {
    let copy = repo.duplicate(memo).map_err(|e| format!("Duplicate failed: {e}"))?;
    Ok(Outcome { message: format!("Duplicated as {}", copy.link_path()), path: repo.path_of(&copy) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn move_reports_root_and_errors() {
        let tmp = tempdir().unwrap();
        let repo = MemoRepo::new(tmp.path());
        let date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let mut memo = Memo::new(date, "a", vec!["work".into()]);
        repo.save(&memo, false).unwrap();

        let outcome = move_to(&repo, &mut memo, Vec::new()).unwrap();
        assert_eq!(outcome.message, "Moved to /");
        assert!(outcome.path.is_file());

        let err = move_to(&repo, &mut memo, vec!["..".into()]).unwrap_err();
        assert!(err.starts_with("Move failed:"));
    }
}
