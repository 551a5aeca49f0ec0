//! Application state and update logic following The Elm Architecture.

use std::path::{Path, PathBuf};

use memov2_core::category::{CategoryDialog, DialogMode};
use memov2_core::config::types::ResolvedConfig;
use memov2_core::document::Memo;
use memov2_core::repo::{MemoRepo, Repository};

use super::actions;

/// Current operating mode.
#[derive(Debug, Clone)]
pub enum Mode {
    /// Browsing the memo list.
    Browse,
    /// Typing a new title for the selected memo.
    Rename,
    /// Choosing a category for the selected memo.
    Category(CategoryDialog),
}

/// Feedback message to display in status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Messages that drive state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    SelectNext,
    SelectPrev,

    // Memo actions
    Open,
    StartRename,
    OpenCategories,
    Duplicate,

    // Category dialog
    ToggleSelect,
    ToggleCollapse,
    NewCategory,
    Commit,

    // Input handling
    InputChar(char),
    InputBackspace,
    InputSubmit,
    Cancel,

    // System
    Quit,
}

/// Main application state.
pub struct App {
    /// Operating mode.
    pub mode: Mode,

    /// Resolved configuration.
    pub config: ResolvedConfig,

    pub repo: MemoRepo,

    /// Memos in enumeration order.
    pub memos: Vec<Memo>,

    /// Currently selected index in the list.
    pub selected: usize,

    /// Current input buffer (rename).
    pub input_buffer: String,

    /// Status bar message.
    pub status: Option<StatusMessage>,

    /// File to hand to the editor before the next frame.
    pub pending_open: Option<PathBuf>,

    /// Should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new App over the configured memos directory.
    pub fn new(config: ResolvedConfig) -> Self {
        let repo = MemoRepo::new(&config.memos_dir);
        let mut app = App {
            mode: Mode::Browse,
            config,
            repo,
            memos: Vec::new(),
            selected: 0,
            input_buffer: String::new(),
            status: None,
            pending_open: None,
            should_quit: false,
        };
        app.reload(None);
        app
    }

    pub fn selected_memo(&self) -> Option<&Memo> {
        self.memos.get(self.selected)
    }

    /// Process a message and update state.
    pub fn update(&mut self, msg: Message) {
        if msg == Message::Quit {
            self.should_quit = true;
            return;
        }

        if let Mode::Category(dialog) = &mut self.mode {
            if let Some(committed) = update_dialog(dialog, msg) {
                self.mode = Mode::Browse;
                if let Some(tree) = committed {
                    self.move_selected(tree);
                }
            }
            return;
        }

        if matches!(self.mode, Mode::Rename) {
            self.update_rename(msg);
        } else {
            self.update_browse(msg);
        }
    }

    fn update_browse(&mut self, msg: Message) {
        match msg {
            Message::SelectNext => {
                if self.selected < self.memos.len().saturating_sub(1) {
                    self.selected += 1;
                }
            }
            Message::SelectPrev => {
                self.selected = self.selected.saturating_sub(1);
            }
            Message::Open => {
                if let Some(memo) = self.selected_memo() {
                    self.pending_open = Some(self.repo.path_of(memo));
                }
            }
            Message::StartRename => {
                if let Some(memo) = self.selected_memo() {
                    self.input_buffer = memo.display_title();
                    self.mode = Mode::Rename;
                }
            }
            Message::OpenCategories => self.open_categories(),
            Message::Duplicate => {
                if let Some(memo) = self.selected_memo() {
                    let result = actions::duplicate(&self.repo, memo);
                    self.finish(result);
                }
            }
            Message::Cancel => self.status = None,
            _ => {}
        }
    }

    fn update_rename(&mut self, msg: Message) {
        match msg {
            Message::InputChar(c) => self.input_buffer.push(c),
            Message::InputBackspace => {
                self.input_buffer.pop();
            }
            Message::InputSubmit => {
                let title = std::mem::take(&mut self.input_buffer);
                self.mode = Mode::Browse;
                if title.trim().is_empty() {
                    return;
                }
                if let Some(mut memo) = self.selected_memo().cloned() {
                    let result = actions::rename(&self.repo, &mut memo, title.trim());
                    self.finish(result);
                }
            }
            Message::Cancel => {
                self.input_buffer.clear();
                self.mode = Mode::Browse;
            }
            _ => {}
        }
    }

    fn open_categories(&mut self) {
        let Some(memo) = self.selected_memo() else {
            return;
        };
        match self.repo.categories() {
            Ok(all) => self.mode = Mode::Category(CategoryDialog::new(&all, memo.category_tree())),
            Err(e) => self.set_error(format!("Failed to list categories: {e}")),
        }
    }

    fn move_selected(&mut self, tree: Vec<String>) {
        if let Some(mut memo) = self.selected_memo().cloned() {
            let result = actions::move_to(&self.repo, &mut memo, tree);
            self.finish(result);
        }
    }

    /// Show the outcome and reload, keeping the affected memo selected.
    fn finish(&mut self, result: Result<actions::Outcome, String>) {
        match result {
            Ok(outcome) => {
                self.status = Some(StatusMessage { text: outcome.message, is_error: false });
                self.reload(Some(outcome.path.as_path()));
            }
            Err(text) => self.set_error(text),
        }
    }

    /// Record the result of an editor session started from `pending_open`.
    pub fn editor_closed(&mut self, path: &Path, result: Result<(), String>) {
        match result {
            Ok(()) => self.status = None,
            Err(text) => self.set_error(text),
        }
        self.reload(Some(path));
    }

    fn set_error(&mut self, text: String) {
        self.status = Some(StatusMessage { text, is_error: true });
    }

    /// Re-read the memo list, selecting `focus` when it is present.
    pub fn reload(&mut self, focus: Option<&Path>) {
        match actions::load_memos(&self.repo) {
            Ok(memos) => self.memos = memos,
            Err(text) => self.set_error(text),
        }
        if let Some(path) = focus {
            if let Some(i) = self.memos.iter().position(|m| self.repo.path_of(m).as_path() == path) {
                self.selected = i;
            }
        }
        self.selected = self.selected.min(self.memos.len().saturating_sub(1));
    }

    /// Current input prompt label.
    pub fn current_input(&self) -> Option<(&str, &str)> {
        match &self.mode {
            Mode::Rename => Some(("New title", self.input_buffer.as_str())),
            Mode::Category(dialog) => match dialog.mode() {
                DialogMode::Input { buffer } => Some(("New category", buffer.as_str())),
                DialogMode::Normal => None,
            },
            Mode::Browse => None,
        }
    }
}

/// Apply `msg` to the dialog. `Some(result)` closes it; the inner value is
/// the committed tree, `None` when the dialog was dismissed.
fn update_dialog(dialog: &mut CategoryDialog, msg: Message) -> Option<Option<Vec<String>>> {
    if let DialogMode::Input { .. } = dialog.mode() {
        match msg {
            Message::InputChar(c) => dialog.input_char(c),
            Message::InputBackspace => dialog.input_backspace(),
            Message::InputSubmit => {
                dialog.submit_input();
            }
            Message::Cancel => dialog.cancel_input(),
            _ => {}
        }
        return None;
    }

    match msg {
        Message::SelectNext => dialog.move_cursor(1),
        Message::SelectPrev => dialog.move_cursor(-1),
        Message::ToggleSelect => dialog.toggle_select_current(),
        Message::ToggleCollapse => dialog.toggle_collapse_current(),
        Message::NewCategory => dialog.begin_input(),
        Message::Commit => return Some(Some(dialog.commit())),
        Message::Cancel => return Some(None),
        _ => {}
    }
    None
}
