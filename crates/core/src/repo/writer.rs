//! Shared file helpers: ensure directory, stream write, flush.
//!
//! No temp-file swap; a crash mid-write can leave a partial file.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use super::{RepoError, RepoResult};

/// Write `content` to `path`, creating parent directories.
///
/// Without `truncate` an existing file is left alone and `Ok(false)` is
/// returned.
pub fn write_file(path: &Path, content: &str, truncate: bool) -> RepoResult<bool> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RepoError::io(parent, e))?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if truncate {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let file = match options.open(path) {
        Ok(file) => file,
        Err(e) if !truncate && e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(RepoError::io(path, e)),
    };

    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes()).map_err(|e| RepoError::io(path, e))?;
    writer.flush().map_err(|e| RepoError::io(path, e))?;
    Ok(true)
}

pub fn read_file(path: &Path) -> RepoResult<String> {
    fs::read_to_string(path).map_err(|e| RepoError::io(path, e))
}

/// Move `from` to `to`, creating the destination directory.
///
/// Fails with `NotFound` when `from` is missing and `Conflict` when `to`
/// exists. Moving a file onto itself is a no-op.
pub fn rename_file(from: &Path, to: &Path) -> RepoResult<()> {
    if from == to {
        return Ok(());
    }
    if !from.is_file() {
        return Err(RepoError::NotFound(from.to_path_buf()));
    }
    if to.exists() {
        return Err(RepoError::Conflict(to.to_path_buf()));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| RepoError::io(parent, e))?;
    }
    fs::rename(from, to).map_err(|e| RepoError::io(from, e))
}
