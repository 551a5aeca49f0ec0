//! Depth-first directory walker with deterministic (lexical) order.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{RepoError, RepoResult};
use crate::filename::FileKind;

/// A file whose basename matched the requested kind.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path to the file.
    pub absolute_path: PathBuf,
    /// Path relative to the walk root.
    pub relative_path: PathBuf,
    pub file_name: String,
}

impl WalkedFile {
    /// Directory components between the root and the file.
    pub fn dir_components(&self) -> Vec<String> {
        components(self.relative_path.parent().unwrap_or(Path::new("")))
    }
}

/// Walker over a repository root. Hidden entries are skipped.
#[derive(Debug)]
pub struct DocumentWalker {
    root: PathBuf,
}

impl DocumentWalker {
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files whose basename matches `kind`, in walk order.
    ///
    /// A missing root yields no files.
    pub fn walk(&self, kind: FileKind) -> RepoResult<Vec<WalkedFile>> {
        let mut files = Vec::new();
        for entry in self.entries()? {
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !kind.matches(&file_name) {
                tracing::debug!("skipping {} (not a {kind} file)", entry.path().display());
                continue;
            }
            files.push(WalkedFile {
                absolute_path: entry.path().to_path_buf(),
                relative_path: self.relative(entry.path()),
                file_name,
            });
        }
        Ok(files)
    }

    /// Every directory below the root (root excluded), relative to the root.
    pub fn directories(&self) -> RepoResult<Vec<PathBuf>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|e| e.depth() > 0 && e.file_type().is_dir())
            .map(|e| self.relative(e.path()))
            .collect())
    }

    fn entries(&self) -> RepoResult<Vec<DirEntry>> {
        if !self.root.is_dir() {
            tracing::debug!("{} does not exist yet", self.root.display());
            return Ok(Vec::new());
        }

        WalkDir::new(&self.root)
            .follow_links(false)
            .max_open(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
            .map(|entry| {
                entry.map_err(|source| RepoError::Walk { path: self.root.clone(), source })
            })
            .collect()
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }
}

/// Path components as strings.
pub fn components(path: &Path) -> Vec<String> {
    path.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect()
}

pub(crate) fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}
