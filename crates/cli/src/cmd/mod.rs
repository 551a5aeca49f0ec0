pub mod config;
pub mod memos;
pub mod output;
pub mod todos;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use memov2_core::config::types::ResolvedConfig;
use memov2_core::editor::{CommandEditor, Editor};

/// Hand `path` to the configured editor.
pub fn open_in_editor(cfg: &ResolvedConfig, path: &Path) -> Result<()> {
    CommandEditor::new(cfg.editor_command.clone())
        .open(&cfg.base_dir, path)
        .wrap_err_with(|| format!("error opening {}", path.display()))
}
