//! Filesystem repositories.
//!
//! One repository per root directory: [`TodoRepo`] for daily todo files,
//! [`MemoRepo`] for categorised memos and [`WeeklyRepo`] for the single
//! weekly report. They share [`Repository::save`] and differ in filename and
//! location rules, which come from the [`Entry`] they store.

mod memo;
mod todo;
pub mod walker;
mod weekly;
pub mod writer;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::document::{DocumentError, Entry};
use crate::filename::{FileKind, FilenameError};

pub use memo::{MemoRepo, TidyReport};
pub use todo::TodoRepo;
pub use walker::{DocumentWalker, WalkedFile};
pub use weekly::WeeklyRepo;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    FormatMismatch(#[from] FilenameError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("destination already exists: {0}")]
    Conflict(PathBuf),

    #[error("invalid category component '{0}'")]
    InvalidCategory(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl RepoError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            RepoError::NotFound(path.to_path_buf())
        } else {
            RepoError::Io { path: path.to_path_buf(), source }
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage for one kind of document under a root directory.
pub trait Repository {
    type Item: Entry;

    fn root(&self) -> &Path;

    fn kind(&self) -> FileKind;

    /// Every stored document, sorted by date then path.
    fn entries(&self) -> RepoResult<Vec<Self::Item>>;

    /// Absolute path of `item` under this repository.
    fn path_of(&self, item: &Self::Item) -> PathBuf {
        self.root().join(item.location()).join(item.file_name())
    }

    /// Write `item` to its path. Without `truncate` an existing file is left
    /// untouched. Returns the path either way.
    fn save(&self, item: &Self::Item, truncate: bool) -> RepoResult<PathBuf> {
        let name = item.file_name();
        if !self.kind().matches(&name) {
            return Err(FilenameError::FormatMismatch { name, kind: self.kind() }.into());
        }

        let path = self.path_of(item);
        if writer::write_file(&path, &item.content_string(), truncate)? {
            tracing::debug!("saved {} {}", self.kind(), path.display());
        } else {
            tracing::debug!("{} already exists, left untouched", path.display());
        }
        Ok(path)
    }
}

/// Order `(path, item)` pairs by date, then path.
pub(crate) fn sort_by_date_then_path<T: Entry>(items: &mut [(PathBuf, T)]) {
    items.sort_by(|(pa, a), (pb, b)| a.date().cmp(&b.date()).then_with(|| pa.cmp(pb)));
}
