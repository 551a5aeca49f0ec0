use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::filename::FileKind;

use super::{Document, Entry, TODOS_HEADING, TodoTemplate};

/// One day's todo file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    doc: Document,
}

impl Todo {
    pub fn new(day: NaiveDate) -> Self {
        Self { doc: Document::new(FileKind::Todo, midnight(day), TODOS_HEADING) }
    }

    pub fn from_markdown(day: NaiveDate, source: &str) -> Self {
        Self {
            doc: Document::from_markdown(FileKind::Todo, midnight(day), TODOS_HEADING, source),
        }
    }

    /// A new day's todo seeded with the template's blocks.
    pub fn from_template(template: &TodoTemplate, day: NaiveDate) -> Self {
        let mut todo = Self::new(day);
        if let Some(body) = template.document().body() {
            todo.doc.set_body(body.content_text());
        }
        todo.doc.set_heading_blocks(template.document().heading_blocks().to_vec());
        todo
    }

    pub fn day(&self) -> NaiveDate {
        self.doc.date().date()
    }

    /// Content of the `todos` section, empty when the section is absent.
    pub fn todos_section(&self) -> &str {
        self.doc.find_heading_block(TODOS_HEADING).map_or("", |b| b.content_text())
    }
}

impl Entry for Todo {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

fn midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_template_copies_blocks() {
        let day = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        let todo = Todo::from_template(&TodoTemplate::new(), day);

        assert_eq!(todo.file_name(), "20230103Tue_todos.md");
        assert_eq!(todo.content_string(), "## todos\n\n## wanttodos\n\n");
    }

    #[test]
    fn todos_section_defaults_to_empty() {
        let day = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        assert_eq!(Todo::from_markdown(day, "## other\n\nx\n").todos_section(), "");
        assert_eq!(Todo::from_markdown(day, "## todos\n\n- a\n").todos_section(), "- a");
    }
}
