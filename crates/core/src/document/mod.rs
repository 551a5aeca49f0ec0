//! Document entities.
//!
//! Typed wrappers over [`Document`], each with its own filename rule:
//! [`Todo`], [`Memo`], [`Weekly`] and [`TodoTemplate`]. The [`Entry`] trait is
//! the seam repositories use to place and serialise any of them.

mod base;
mod memo;
mod template;
mod todo;
mod weekly;

use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::filename::FileKind;

pub use base::Document;
pub use memo::Memo;
pub use template::TodoTemplate;
pub use todo::Todo;
pub use weekly::Weekly;

/// Heading names carried over from one day's todo file to the next.
pub const TODOS_HEADING: &str = "todos";
pub const WANTTODOS_HEADING: &str = "wanttodos";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("no heading block '{heading}' at level {level}")]
    HeadingNotFound { level: u8, heading: String },
}

/// A document stored in a repository.
pub trait Entry {
    fn document(&self) -> &Document;

    fn document_mut(&mut self) -> &mut Document;

    /// Directory relative to the repository root.
    fn location(&self) -> PathBuf {
        PathBuf::new()
    }

    fn kind(&self) -> FileKind {
        self.document().kind()
    }

    fn date(&self) -> NaiveDateTime {
        self.document().date()
    }

    fn title(&self) -> &str {
        self.document().title()
    }

    fn file_name(&self) -> String {
        self.document().file_name()
    }

    fn content_string(&self) -> String {
        self.document().content_string()
    }
}
