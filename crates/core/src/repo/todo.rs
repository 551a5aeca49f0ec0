use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::walker::DocumentWalker;
use super::{RepoError, RepoResult, Repository, sort_by_date_then_path, writer};
use crate::document::{Entry, Todo, TodoTemplate};
use crate::filename::{self, FileKind, TEMPLATE_FILENAME};

/// Daily todo files under the todos root.
#[derive(Debug, Clone)]
pub struct TodoRepo {
    root: PathBuf,
}

impl TodoRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the todo file at `path` (absolute, or relative to the root).
    pub fn load(&self, path: &Path) -> RepoResult<Todo> {
        let path = self.root.join(path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| RepoError::NotFound(path.clone()))?;
        let date = filename::decode_date(&name, FileKind::Todo)?;
        let source = writer::read_file(&path)?;
        Ok(Todo::from_markdown(date.date(), &source))
    }

    /// The todo file for `day`. Only the matching file is read.
    pub fn find_by_date(&self, day: NaiveDate) -> RepoResult<Todo> {
        let expected = Todo::new(day);
        let name = expected.file_name();
        let found = DocumentWalker::new(&self.root)
            .walk(FileKind::Todo)?
            .into_iter()
            .filter(|file| file.file_name == name)
            .min_by(|a, b| a.absolute_path.cmp(&b.absolute_path));

        match found {
            Some(file) => self.load(&file.absolute_path),
            None => Err(RepoError::NotFound(self.path_of(&expected))),
        }
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join(TEMPLATE_FILENAME)
    }

    pub fn load_template(&self) -> RepoResult<TodoTemplate> {
        let source = writer::read_file(&self.template_path())?;
        Ok(TodoTemplate::from_markdown(&source))
    }

    /// A todo for `day` seeded from the template file.
    pub fn template(&self, day: NaiveDate) -> RepoResult<Todo> {
        Ok(Todo::from_template(&self.load_template()?, day))
    }

    /// Write the default template unless one already exists.
    pub fn ensure_template(&self) -> RepoResult<PathBuf> {
        let path = self.template_path();
        if writer::write_file(&path, &TodoTemplate::new().content_string(), false)? {
            tracing::info!("created todo template {}", path.display());
        }
        Ok(path)
    }
}

impl Repository for TodoRepo {
    type Item = Todo;

    fn root(&self) -> &Path {
        &self.root
    }

    fn kind(&self) -> FileKind {
        FileKind::Todo
    }

    fn entries(&self) -> RepoResult<Vec<Todo>> {
        let mut loaded = Vec::new();
        for file in DocumentWalker::new(&self.root).walk(FileKind::Todo)? {
            let date = match filename::decode_date(&file.file_name, FileKind::Todo) {
                Ok(date) => date,
                Err(e) => {
                    tracing::debug!("skipping {}: {e}", file.absolute_path.display());
                    continue;
                }
            };
            let source = writer::read_file(&file.absolute_path)?;
            loaded.push((file.absolute_path, Todo::from_markdown(date.date(), &source)));
        }

        sort_by_date_then_path(&mut loaded);
        Ok(loaded.into_iter().map(|(_, todo)| todo).collect())
    }
}
