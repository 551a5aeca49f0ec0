//! `todos new` / `todos weekly`.

use chrono::Local;
use color_eyre::eyre::{Result, WrapErr};
use memov2_core::config::types::ResolvedConfig;
use memov2_core::services::TodoService;

use super::open_in_editor;

pub fn new(cfg: &ResolvedConfig, truncate: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let path = TodoService::create_today(cfg, today, truncate)
        .wrap_err("error creating today's todo file")?;
    tracing::info!("todo file {}", path.display());
    open_in_editor(cfg, &path)
}

pub fn weekly(cfg: &ResolvedConfig) -> Result<()> {
    let path = TodoService::weekly(cfg, Local::now().naive_local())
        .wrap_err("error building the todo weekly report")?;
    open_in_editor(cfg, &path)
}
