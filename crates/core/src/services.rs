//! Entry points behind the CLI commands.
//!
//! Each takes the resolved configuration explicitly and returns the path of
//! the document it wrote, ready to hand to an editor.

use std::path::PathBuf;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::config::types::ResolvedConfig;
use crate::document::{Entry, Memo, TODOS_HEADING, Todo, WANTTODOS_HEADING};
use crate::index::build_index;
use crate::repo::{MemoRepo, RepoResult, Repository, TodoRepo, WeeklyRepo};
use crate::report::{build_memo_weekly, build_todo_weekly};

/// Daily todo files.
pub struct TodoService;

impl TodoService {
    /// Today's todo: the template, with `todos` and `wanttodos` carried over
    /// from the most recent file in the `days_to_seek` days before `today`.
    pub fn inherit(repo: &TodoRepo, today: NaiveDate, days_to_seek: u32) -> RepoResult<Todo> {
        let mut seed = repo.template(today)?;

        let earliest = today - Duration::days(i64::from(days_to_seek));
        let entries = repo.entries()?;
        let Some(donor) = entries.iter().rev().find(|t| t.day() < today && t.day() >= earliest)
        else {
            tracing::debug!("no todo file within {days_to_seek} days before {today}");
            return Ok(seed);
        };

        tracing::debug!("inheriting from {}", donor.file_name());
        for block in donor.document().heading_blocks() {
            let text = block.heading_text();
            if text != TODOS_HEADING && text != WANTTODOS_HEADING {
                continue;
            }
            if let Err(e) = seed.document_mut().override_heading_block_matched(block) {
                tracing::warn!("not carried over from {}: {e}", donor.file_name());
            }
        }
        Ok(seed)
    }

    /// Write today's todo file. Without `truncate` an existing file is kept.
    pub fn create_today(
        config: &ResolvedConfig,
        today: NaiveDate,
        truncate: bool,
    ) -> RepoResult<PathBuf> {
        let repo = TodoRepo::new(&config.todos_dir);
        repo.ensure_template()?;
        let todo = Self::inherit(&repo, today, config.todos_days_to_seek)?;
        repo.save(&todo, truncate)
    }

    /// Rebuild `weekly_report.md` in the todos directory.
    pub fn weekly(config: &ResolvedConfig, built_at: NaiveDateTime) -> RepoResult<PathBuf> {
        let todos = TodoRepo::new(&config.todos_dir).entries()?;
        let weekly = build_todo_weekly(&todos, built_at);
        WeeklyRepo::new(&config.todos_dir).save(&weekly, true)
    }
}

/// Categorised memos.
pub struct MemoService;

impl MemoService {
    /// Create an empty memo. An existing file with the same name is kept.
    pub fn create(
        config: &ResolvedConfig,
        date: NaiveDateTime,
        title: &str,
        category_tree: Vec<String>,
    ) -> RepoResult<PathBuf> {
        let memo = Memo::new(date, title, category_tree);
        MemoRepo::new(&config.memos_dir).save(&memo, false)
    }

    /// Tidy, then rewrite `index.md` in the memos directory.
    pub fn index(config: &ResolvedConfig) -> RepoResult<PathBuf> {
        let repo = MemoRepo::new(&config.memos_dir);
        tidy_logged(&repo);
        let content = build_index(&config.memos_dir)?;
        repo.save_index(&content)
    }

    /// Tidy, then rebuild `weekly_report.md` in the memos directory.
    pub fn weekly(config: &ResolvedConfig, built_at: NaiveDateTime) -> RepoResult<PathBuf> {
        let repo = MemoRepo::new(&config.memos_dir);
        tidy_logged(&repo);
        let memos = repo.entries()?;
        let weekly = build_memo_weekly(&memos, built_at);
        WeeklyRepo::new(&config.memos_dir).save(&weekly, true)
    }
}

/// Report generation goes ahead even when tidying fails.
fn tidy_logged(repo: &MemoRepo) {
    match repo.tidy() {
        Ok(report) => {
            for path in &report.conflicts {
                tracing::warn!("tidy left {} in place (destination exists)", path.display());
            }
        }
        Err(e) => tracing::warn!("tidy failed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn repo_with(files: &[(&str, &str)]) -> (tempfile::TempDir, TodoRepo) {
        let tmp = tempdir().unwrap();
        for (name, content) in files {
            fs::write(tmp.path().join(name), content).unwrap();
        }
        let repo = TodoRepo::new(tmp.path());
        repo.ensure_template().unwrap();
        (tmp, repo)
    }

    #[test]
    fn latest_donor_in_window_wins() {
        let (_tmp, repo) = repo_with(&[
            ("20230101Sun_todos.md", "## todos\n\n- old\n"),
            ("20230102Mon_todos.md", "## todos\n\n- newer\n"),
            ("20230103Tue_todos.md", "## todos\n\n- today already\n"),
        ]);
        let todo = TodoService::inherit(&repo, day(2023, 1, 3), 10).unwrap();
        assert_eq!(todo.todos_section(), "- newer");
    }

    #[test]
    fn donor_outside_window_is_ignored() {
        let (_tmp, repo) = repo_with(&[("20230101Sun_todos.md", "## todos\n\n- old\n")]);
        let todo = TodoService::inherit(&repo, day(2023, 1, 5), 3).unwrap();
        assert_eq!(todo.content_string(), "## todos\n\n## wanttodos\n\n");

        let todo = TodoService::inherit(&repo, day(2023, 1, 4), 3).unwrap();
        assert_eq!(todo.todos_section(), "- old");
    }

    #[test]
    fn unmatched_donor_headings_are_skipped() {
        let (_tmp, repo) = repo_with(&[(
            "20230102Mon_todos.md",
            "# todos\n\n- wrong level\n\n## wanttodos\n\n- keep\n\n## notes\n\nx\n",
        )]);
        let todo = TodoService::inherit(&repo, day(2023, 1, 3), 10).unwrap();
        assert_eq!(todo.content_string(), "## todos\n\n## wanttodos\n\n- keep\n");
    }

    #[test]
    fn missing_template_is_fatal() {
        let tmp = tempdir().unwrap();
        let repo = TodoRepo::new(tmp.path());
        assert!(TodoService::inherit(&repo, day(2023, 1, 3), 10).is_err());
    }
}
