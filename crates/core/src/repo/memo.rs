use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::Duration;

use super::walker::{DocumentWalker, WalkedFile, components};
use super::{RepoError, RepoResult, Repository, sort_by_date_then_path, writer};
use crate::document::{Entry, Memo};
use crate::filename::{self, FileKind};

pub const INDEX_FILENAME: &str = "index.md";

/// Outcome of [`MemoRepo::tidy`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TidyReport {
    /// `(from, to)` for every relocated file.
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// Files left in place because their destination already exists.
    pub conflicts: Vec<PathBuf>,
}

/// Categorised memos under the memos root.
#[derive(Debug, Clone)]
pub struct MemoRepo {
    root: PathBuf,
}

impl MemoRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the memo at `path` (absolute, or relative to the root).
    ///
    /// The path must stay below the root: `.` and `..` components are rejected.
    pub fn load(&self, path: &Path) -> RepoResult<Memo> {
        let absolute = self.root.join(path);
        let relative = absolute
            .strip_prefix(&self.root)
            .map_err(|_| RepoError::NotFound(absolute.clone()))?
            .to_path_buf();
        if let Some(bad) = relative.components().find(|c| !matches!(c, Component::Normal(_))) {
            return Err(RepoError::InvalidCategory(bad.as_os_str().to_string_lossy().into_owned()));
        }
        let file_name = relative
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| RepoError::NotFound(absolute.clone()))?;

        self.read(&WalkedFile { absolute_path: absolute, relative_path: relative, file_name })
    }

    fn read(&self, file: &WalkedFile) -> RepoResult<Memo> {
        let (date, title) = filename::decode_memo(&file.file_name)?;
        let source = writer::read_file(&file.absolute_path)?;
        Ok(Memo::from_markdown(date, &title, file.dir_components(), &source))
    }

    /// Every category path present below the root, including empty ones.
    pub fn categories(&self) -> RepoResult<Vec<Vec<String>>> {
        Ok(DocumentWalker::new(&self.root)
            .directories()?
            .iter()
            .map(|dir| components(dir))
            .collect())
    }

    /// Relocate `memo` under `category_tree`.
    pub fn move_to(&self, memo: &mut Memo, category_tree: Vec<String>) -> RepoResult<PathBuf> {
        validate_category(&category_tree)?;

        let from = self.path_of(memo);
        let mut moved = memo.clone();
        moved.set_category_tree(category_tree);
        let to = self.path_of(&moved);

        writer::rename_file(&from, &to)?;
        tracing::info!("moved {} -> {}", from.display(), to.display());
        *memo = moved;
        Ok(to)
    }

    /// Give `memo` a new title in place (same directory and timestamp).
    pub fn rename(&self, memo: &mut Memo, title: &str) -> RepoResult<PathBuf> {
        let from = self.path_of(memo);
        let mut renamed = memo.clone();
        renamed.document_mut().set_title(filename::slugify(title));
        let to = self.path_of(&renamed);

        writer::rename_file(&from, &to)?;
        tracing::info!("renamed {} -> {}", from.display(), to.display());
        *memo = renamed;
        Ok(to)
    }

    pub fn delete(&self, memo: &Memo) -> RepoResult<()> {
        let path = self.path_of(memo);
        fs::remove_file(&path).map_err(|e| RepoError::io(&path, e))?;
        tracing::info!("deleted {}", path.display());
        Ok(())
    }

    /// Copy `memo` next to itself, advancing the timestamp one second at a
    /// time until the name is free.
    pub fn duplicate(&self, memo: &Memo) -> RepoResult<Memo> {
        let from = self.path_of(memo);
        let source = writer::read_file(&from)?;

        let mut copy = memo.clone();
        loop {
            let next = copy.date() + Duration::seconds(1);
            copy.document_mut().set_date(next);
            let to = self.path_of(&copy);
            if writer::write_file(&to, &source, false)? {
                tracing::info!("duplicated {} -> {}", from.display(), to.display());
                return Ok(copy);
            }
        }
    }

    /// Re-align filenames and directories with the metadata they encode.
    ///
    /// Slugs that no longer match `slugify(title)` are rewritten and category
    /// components with surrounding whitespace are trimmed. Files that do not
    /// look like memos are not touched.
    pub fn tidy(&self) -> RepoResult<TidyReport> {
        let mut report = TidyReport::default();

        for file in DocumentWalker::new(&self.root).walk(FileKind::Memo)? {
            let Ok((date, title)) = filename::decode_memo(&file.file_name) else {
                tracing::debug!("tidy: skipping {}", file.absolute_path.display());
                continue;
            };
            let tree: Vec<String> = file
                .dir_components()
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();

            let target = self.path_of(&Memo::new(date, &title, tree));
            match writer::rename_file(&file.absolute_path, &target) {
                Ok(()) if target != file.absolute_path => {
                    tracing::info!(
                        "tidy: {} -> {}",
                        file.absolute_path.display(),
                        target.display()
                    );
                    report.moved.push((file.absolute_path, target));
                }
                Ok(()) => {}
                Err(RepoError::Conflict(existing)) => {
                    tracing::warn!(
                        "tidy: cannot move {}, {} already exists",
                        file.absolute_path.display(),
                        existing.display()
                    );
                    report.conflicts.push(file.absolute_path);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILENAME)
    }

    /// Overwrite `index.md` at the root.
    pub fn save_index(&self, content: &str) -> RepoResult<PathBuf> {
        let path = self.index_path();
        writer::write_file(&path, content, true)?;
        Ok(path)
    }
}

impl Repository for MemoRepo {
    type Item = Memo;

    fn root(&self) -> &Path {
        &self.root
    }

    fn kind(&self) -> FileKind {
        FileKind::Memo
    }

    fn entries(&self) -> RepoResult<Vec<Memo>> {
        let mut loaded = Vec::new();
        for file in DocumentWalker::new(&self.root).walk(FileKind::Memo)? {
            match self.read(&file) {
                Ok(memo) => loaded.push((file.absolute_path, memo)),
                Err(RepoError::FormatMismatch(e)) => {
                    tracing::debug!("skipping {}: {e}", file.absolute_path.display());
                }
                Err(e) => return Err(e),
            }
        }

        sort_by_date_then_path(&mut loaded);
        Ok(loaded.into_iter().map(|(_, memo)| memo).collect())
    }
}

/// A category component must be a plain, visible directory name.
fn validate_category(tree: &[String]) -> RepoResult<()> {
    for component in tree {
        let valid = !component.is_empty()
            && component.trim() == component
            && component != "."
            && component != ".."
            && !component.starts_with('.')
            && !component.contains(['/', '\\']);
        if !valid {
            return Err(RepoError::InvalidCategory(component.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::tempdir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 2).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    fn tree(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn save_creates_category_directories() {
        let tmp = tempdir().unwrap();
        let repo = MemoRepo::new(tmp.path());
        let memo = Memo::new(at(15, 4, 5), "Hello World", tree(&["a", "b"]));

        let path = repo.save(&memo, false).unwrap();
        assert_eq!(path, tmp.path().join("a/b/20230102Mon150405_memo_Hello-World.md"));
        assert!(path.is_file());
    }

    #[test]
    fn load_relative_path_derives_category() {
        let tmp = tempdir().unwrap();
        let repo = MemoRepo::new(tmp.path());
        repo.save(&Memo::new(at(1, 2, 3), "x", tree(&["work"])), false).unwrap();

        let memo = repo.load(Path::new("work/20230102Mon010203_memo_x.md")).unwrap();
        assert_eq!(memo.category_tree(), &["work".to_string()]);
        assert_eq!(memo.title(), "x");
    }

    #[test]
    fn load_stays_inside_root() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("memos");
        let outside = tmp.path().join("elsewhere");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&outside).unwrap();
        let stray = outside.join("20230102Mon010203_memo_x.md");
        fs::write(&stray, "# x\n").unwrap();
        let repo = MemoRepo::new(&root);

        for path in [
            "../elsewhere/20230102Mon010203_memo_x.md",
            "./../elsewhere/20230102Mon010203_memo_x.md",
        ] {
            assert!(matches!(
                repo.load(Path::new(path)),
                Err(RepoError::InvalidCategory(_))
            ));
        }
        assert!(matches!(repo.load(&stray), Err(RepoError::NotFound(_))));
        assert!(stray.is_file());
    }

    #[test]
    fn load_rejects_non_memo_names() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("notes.md"), "").unwrap();
        let repo = MemoRepo::new(tmp.path());
        assert!(matches!(
            repo.load(Path::new("notes.md")),
            Err(RepoError::FormatMismatch(_))
        ));
    }

    #[test]
    fn move_rejects_invalid_components() {
        let tmp = tempdir().unwrap();
        let repo = MemoRepo::new(tmp.path());
        let mut memo = Memo::new(at(1, 2, 3), "x", Vec::new());
        repo.save(&memo, false).unwrap();

        for bad in [&[""][..], &[".."], &[".hidden"], &[" padded"], &["a/b"]] {
            let err = repo.move_to(&mut memo, tree(bad)).unwrap_err();
            assert!(matches!(err, RepoError::InvalidCategory(_)), "{bad:?}");
        }
        assert!(memo.category_tree().is_empty());
    }

    #[test]
    fn delete_and_missing_delete() {
        let tmp = tempdir().unwrap();
        let repo = MemoRepo::new(tmp.path());
        let memo = Memo::new(at(1, 2, 3), "x", Vec::new());
        let path = repo.save(&memo, false).unwrap();

        repo.delete(&memo).unwrap();
        assert!(!path.exists());
        assert!(matches!(repo.delete(&memo), Err(RepoError::NotFound(_))));
    }

    #[test]
    fn duplicate_advances_time_past_existing_files() {
        let tmp = tempdir().unwrap();
        let repo = MemoRepo::new(tmp.path());
        let memo = Memo::from_markdown(at(1, 2, 3), "x", Vec::new(), "# body\n");
        fs::write(repo.path_of(&memo), "# body\n").unwrap();
        repo.save(&Memo::new(at(1, 2, 4), "x", Vec::new()), false).unwrap();

        let copy = repo.duplicate(&memo).unwrap();
        assert_eq!(copy.date(), at(1, 2, 5));
        assert_eq!(fs::read_to_string(repo.path_of(&copy)).unwrap(), "# body\n");
    }

    #[test]
    fn tidy_rewrites_slugs_and_trims_categories() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join(" work ")).unwrap();
        fs::write(root.join("20230102Mon010203_memo_Hello World.md"), "a").unwrap();
        fs::write(root.join(" work /20230102Mon010204_memo_y.md"), "b").unwrap();
        fs::write(root.join("20230102Mon010205_memo_ok.md"), "c").unwrap();
        fs::write(root.join("scratch.md"), "d").unwrap();

        let report = MemoRepo::new(root).tidy().unwrap();

        assert_eq!(report.moved.len(), 2);
        assert!(report.conflicts.is_empty());
        assert!(root.join("20230102Mon010203_memo_Hello-World.md").is_file());
        assert!(root.join("work/20230102Mon010204_memo_y.md").is_file());
        assert!(root.join("20230102Mon010205_memo_ok.md").is_file());
        assert!(root.join("scratch.md").is_file());
    }

    #[test]
    fn tidy_reports_conflicts_without_overwriting() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("20230102Mon010203_memo_a b.md"), "spaced").unwrap();
        fs::write(root.join("20230102Mon010203_memo_a-b.md"), "slug").unwrap();

        let report = MemoRepo::new(root).tidy().unwrap();

        assert_eq!(report.conflicts, vec![root.join("20230102Mon010203_memo_a b.md")]);
        assert_eq!(
            fs::read_to_string(root.join("20230102Mon010203_memo_a-b.md")).unwrap(),
            "slug"
        );
    }

    #[test]
    fn categories_include_every_prefix() {
        let tmp = tempdir().unwrap();
        let repo = MemoRepo::new(tmp.path());
        repo.save(&Memo::new(at(1, 2, 3), "x", tree(&["b", "c"])), false).unwrap();
        fs::create_dir_all(tmp.path().join("a")).unwrap();

        assert_eq!(
            repo.categories().unwrap(),
            vec![tree(&["a"]), tree(&["b"]), tree(&["b", "c"])]
        );
    }
}
