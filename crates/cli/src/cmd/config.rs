//! `config show` / `config edit`.

use color_eyre::eyre::Result;
use memov2_core::config::types::ResolvedConfig;

use super::open_in_editor;

pub fn show(cfg: &ResolvedConfig) -> Result<()> {
    println!("base_dir: {}", cfg.base_dir.display());
    println!("todos_dir: {}", cfg.todos_dir.display());
    println!("memos_dir: {}", cfg.memos_dir.display());
    println!("todos_daystoseek: {}", cfg.todos_days_to_seek);
    Ok(())
}

pub fn edit(cfg: &ResolvedConfig) -> Result<()> {
    open_in_editor(cfg, &cfg.config_path)
}
