//! Markdown block model.
//!
//! A document is a top-level body (the prose before the first heading) plus a
//! flat, source-ordered list of heading blocks. Hierarchy is not stored; use
//! [`outline`] to build a tree view on demand.

pub mod outline;
pub mod parser;
pub mod types;

pub use outline::{OutlineNode, flatten, outline};
pub use parser::{ParsedMarkdown, parse};
pub use types::{HeadingBlock, normalize_content, serialize};
