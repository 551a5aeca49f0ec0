//! Category picker state for the memo browser.
//!
//! Pure data: sorting, collapsing, selection and the add-category input flow.
//! Rendering lives in the CLI.

use std::collections::BTreeSet;

/// A category path: directory components below the memos root.
pub type CategoryPath = Vec<String>;

/// `a/b/c` form used as the selection and collapse key.
pub fn path_key(path: &[String]) -> String {
    path.join("/")
}

/// Depth-first order: each path is followed by its descendants, siblings in
/// lexical order of their last component. Duplicates are removed.
pub fn sort_categories(all: &[CategoryPath]) -> Vec<CategoryPath> {
    let set: BTreeSet<&CategoryPath> = all.iter().filter(|p| !p.is_empty()).collect();
    set.into_iter().cloned().collect()
}

/// Paths not hidden by a collapsed ancestor. A collapsed path itself stays
/// visible.
pub fn visible<'a>(all: &'a [CategoryPath], collapsed: &BTreeSet<String>) -> Vec<&'a CategoryPath> {
    all.iter()
        .filter(|path| (1..path.len()).all(|n| !collapsed.contains(&path_key(&path[..n]))))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogMode {
    #[default]
    Normal,
    /// Typing a new `/`-separated category path.
    Input { buffer: String },
}

#[derive(Debug, Clone, Default)]
pub struct CategoryDialog {
    categories: Vec<CategoryPath>,
    selected: BTreeSet<String>,
    collapsed: BTreeSet<String>,
    cursor: usize,
    mode: DialogMode,
}

impl CategoryDialog {
    /// A dialog over `all`, with `current` (the memo's tree) preselected.
    pub fn new(all: &[CategoryPath], current: &[String]) -> Self {
        let mut dialog = Self { categories: sort_categories(all), ..Self::default() };
        if !current.is_empty() {
            dialog.add_path(current.to_vec());
            dialog.selected.insert(path_key(current));
        }
        dialog
    }

    pub fn categories(&self) -> &[CategoryPath] {
        &self.categories
    }

    pub fn rows(&self) -> Vec<&CategoryPath> {
        visible(&self.categories, &self.collapsed)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    pub fn is_selected(&self, path: &[String]) -> bool {
        self.selected.contains(&path_key(path))
    }

    pub fn is_collapsed(&self, path: &[String]) -> bool {
        self.collapsed.contains(&path_key(path))
    }

    pub fn has_children(&self, path: &[String]) -> bool {
        self.categories.iter().any(|p| p.len() > path.len() && p.starts_with(path))
    }

    pub fn current(&self) -> Option<&CategoryPath> {
        self.rows().get(self.cursor).copied()
    }

    /// Move the cursor by `delta` rows, clamped to the visible rows.
    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.rows().len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn toggle_select(&mut self, path: &[String]) {
        let key = path_key(path);
        if !self.selected.remove(&key) {
            self.selected.insert(key);
        }
    }

    pub fn toggle_collapse(&mut self, path: &[String]) {
        let key = path_key(path);
        if !self.collapsed.remove(&key) {
            self.collapsed.insert(key);
        }
        self.move_cursor(0);
    }

    pub fn toggle_select_current(&mut self) {
        if let Some(path) = self.current().cloned() {
            self.toggle_select(&path);
        }
    }

    pub fn toggle_collapse_current(&mut self) {
        if let Some(path) = self.current().cloned() {
            self.toggle_collapse(&path);
        }
    }

    pub fn begin_input(&mut self) {
        self.mode = DialogMode::Input { buffer: String::new() };
    }

    pub fn input_char(&mut self, c: char) {
        if let DialogMode::Input { buffer } = &mut self.mode {
            buffer.push(c);
        }
    }

    pub fn input_backspace(&mut self) {
        if let DialogMode::Input { buffer } = &mut self.mode {
            buffer.pop();
        }
    }

    /// Leave input mode, discarding the buffer.
    pub fn cancel_input(&mut self) {
        self.mode = DialogMode::Normal;
    }

    /// Leave input mode, adding and selecting the typed path. Returns the
    /// added path, if any.
    pub fn submit_input(&mut self) -> Option<CategoryPath> {
        let DialogMode::Input { buffer } = std::mem::take(&mut self.mode) else {
            return None;
        };
        self.add_category(&buffer)
    }

    /// Add a `/`-separated path (with all its prefixes) and select it.
    pub fn add_category(&mut self, input: &str) -> Option<CategoryPath> {
        let path: CategoryPath = input
            .split(['/', '\\'])
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();
        if path.is_empty() {
            return None;
        }

        self.add_path(path.clone());
        self.selected.insert(path_key(&path));
        if let Some(row) = self.rows().iter().position(|p| **p == path) {
            self.cursor = row;
        }
        Some(path)
    }

    fn add_path(&mut self, path: CategoryPath) {
        let mut all = std::mem::take(&mut self.categories);
        all.extend((1..=path.len()).map(|n| path[..n].to_vec()));
        self.categories = sort_categories(&all);
    }

    /// The longest selected path, ties going to the earlier one in sort order.
    /// Nothing selected means the memos root.
    pub fn commit(&self) -> CategoryPath {
        let mut best: Option<&CategoryPath> = None;
        for path in &self.categories {
            if self.selected.contains(&path_key(path))
                && best.is_none_or(|b| path.len() > b.len())
            {
                best = Some(path);
            }
        }
        best.cloned().unwrap_or_default()
    }
}
