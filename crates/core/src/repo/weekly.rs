use std::path::{Path, PathBuf};

use chrono::Local;

use super::{RepoResult, Repository, writer};
use crate::document::Weekly;
use crate::filename::{FileKind, WEEKLY_FILENAME};

/// The single `weekly_report.md` under a root.
#[derive(Debug, Clone)]
pub struct WeeklyRepo {
    root: PathBuf,
}

impl WeeklyRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join(WEEKLY_FILENAME)
    }
}

impl Repository for WeeklyRepo {
    type Item = Weekly;

    fn root(&self) -> &Path {
        &self.root
    }

    fn kind(&self) -> FileKind {
        FileKind::Weekly
    }

    /// The current report, if one has been written.
    fn entries(&self) -> RepoResult<Vec<Weekly>> {
        let path = self.report_path();
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let source = writer::read_file(&path)?;
        Ok(vec![Weekly::from_markdown(Local::now().naive_local(), &source)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Entry;
    use crate::markdown::HeadingBlock;
    use tempfile::tempdir;

    #[test]
    fn save_overwrites_fixed_name() {
        let tmp = tempdir().unwrap();
        let repo = WeeklyRepo::new(tmp.path());
        assert!(repo.entries().unwrap().is_empty());

        let mut weekly = Weekly::new(Local::now().naive_local());
        weekly.document_mut().push_heading_block(HeadingBlock::empty(2, "first"));
        repo.save(&weekly, true).unwrap();

        weekly.document_mut().set_heading_blocks(vec![HeadingBlock::empty(2, "second")]);
        let path = repo.save(&weekly, true).unwrap();

        assert_eq!(path, tmp.path().join("weekly_report.md"));
        let stored = repo.entries().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].content_string(), "## second\n\n");
    }
}
