//! `memos …` subcommands.

use std::path::Path;

use chrono::Local;
use color_eyre::eyre::{Result, WrapErr};
use memov2_core::config::types::ResolvedConfig;
use memov2_core::document::Memo;
use memov2_core::repo::{MemoRepo, Repository};
use memov2_core::search::{self, IdentityExpander};
use memov2_core::services::MemoService;

use super::open_in_editor;
use super::output::{print_entries, print_hits, print_json};
use crate::prompt::{self, PromptError};
use crate::{ListArgs, SearchArgs};

fn repo(cfg: &ResolvedConfig) -> MemoRepo {
    MemoRepo::new(&cfg.memos_dir)
}

fn load(repo: &MemoRepo, path: &Path) -> Result<Memo> {
    repo.load(path).wrap_err_with(|| format!("error loading memo {}", path.display()))
}

/// Display form of a path under the memos root.
fn relative(cfg: &ResolvedConfig, path: &Path) -> String {
    path.strip_prefix(&cfg.memos_dir).unwrap_or(path).display().to_string()
}

/// Title from the arguments or a prompt. `None` means the user cancelled.
fn title_from(words: &[String], label: &str) -> Result<Option<String>> {
    match prompt::title_or_prompt(words, label) {
        Ok(title) => Ok(Some(title)),
        Err(PromptError::Cancelled) => {
            println!("Cancelled.");
            Ok(None)
        }
        Err(e) => Err(e).wrap_err("error reading title"),
    }
}

pub fn new(cfg: &ResolvedConfig, words: &[String]) -> Result<()> {
    let Some(title) = title_from(words, "Title")? else {
        return Ok(());
    };
    let path = MemoService::create(cfg, Local::now().naive_local(), &title, Vec::new())
        .wrap_err("error creating memo")?;
    println!("Created: {}", relative(cfg, &path));
    open_in_editor(cfg, &path)
}

pub fn index(cfg: &ResolvedConfig) -> Result<()> {
    let path = MemoService::index(cfg).wrap_err("error building the memo index")?;
    open_in_editor(cfg, &path)
}

pub fn weekly(cfg: &ResolvedConfig) -> Result<()> {
    let path = MemoService::weekly(cfg, Local::now().naive_local())
        .wrap_err("error building the memo weekly report")?;
    open_in_editor(cfg, &path)
}

pub fn list(cfg: &ResolvedConfig, args: &ListArgs) -> Result<()> {
    let entries = search::list(&repo(cfg), !args.short).wrap_err("error listing memos")?;
    if args.json {
        print_json(&entries)
    } else {
        print_entries(&entries);
        Ok(())
    }
}

pub fn search(cfg: &ResolvedConfig, args: &SearchArgs) -> Result<()> {
    let query = args.query.join(" ");
    let hits = search::search(&repo(cfg), &query, !args.short, &IdentityExpander)
        .wrap_err("error searching memos")?;
    if args.json {
        print_json(&hits)
    } else {
        print_hits(&hits, args.context);
        Ok(())
    }
}

pub fn open(cfg: &ResolvedConfig, path: &Path) -> Result<()> {
    let repo = repo(cfg);
    let memo = load(&repo, path)?;
    open_in_editor(cfg, &repo.path_of(&memo))
}

pub fn rename(cfg: &ResolvedConfig, path: &Path, words: &[String]) -> Result<()> {
    let repo = repo(cfg);
    let mut memo = load(&repo, path)?;
    let Some(title) = title_from(words, "New title")? else {
        return Ok(());
    };

    let to = repo.rename(&mut memo, &title).wrap_err("error renaming memo")?;
    println!("Renamed: {} -> {}", path.display(), relative(cfg, &to));
    Ok(())
}

pub fn move_memo(cfg: &ResolvedConfig, path: &Path, category: Vec<String>) -> Result<()> {
    let repo = repo(cfg);
    let mut memo = load(&repo, path)?;
    let tree: Vec<String> = category
        .iter()
        .flat_map(|c| c.split('/'))
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect();

    let to = repo.move_to(&mut memo, tree).wrap_err("error moving memo")?;
    println!("Moved: {} -> {}", path.display(), relative(cfg, &to));
    Ok(())
}

pub fn delete(cfg: &ResolvedConfig, path: &Path) -> Result<()> {
    let repo = repo(cfg);
    let memo = load(&repo, path)?;
    repo.delete(&memo).wrap_err("error deleting memo")?;
    println!("Deleted: {}", path.display());
    Ok(())
}

pub fn duplicate(cfg: &ResolvedConfig, path: &Path) -> Result<()> {
    let repo = repo(cfg);
    let memo = load(&repo, path)?;
    let copy = repo.duplicate(&memo).wrap_err("error duplicating memo")?;
    println!("Duplicated: {} -> {}", path.display(), copy.link_path());
    Ok(())
}

pub fn tidy(cfg: &ResolvedConfig) -> Result<()> {
    let report = repo(cfg).tidy().wrap_err("error tidying memos")?;
    for (from, to) in &report.moved {
        println!("Moved: {} -> {}", relative(cfg, from), relative(cfg, to));
    }
    for path in &report.conflicts {
        println!("Conflict: {} (destination exists)", relative(cfg, path));
    }
    if report.moved.is_empty() && report.conflicts.is_empty() {
        println!("Nothing to tidy.");
    }
    Ok(())
}

pub fn categories(cfg: &ResolvedConfig) -> Result<()> {
    for tree in repo(cfg).categories().wrap_err("error listing categories")? {
        println!("{}", tree.join("/"));
    }
    Ok(())
}
