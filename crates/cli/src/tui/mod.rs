//! Interactive memo browser.

mod actions;
mod app;
mod event;
mod ui;

use std::io;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{poll, read, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ratatui::prelude::*;

use memov2_core::config::types::ResolvedConfig;

use app::App;
use event::map_key_event;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the TUI application.
pub fn run(config: ResolvedConfig) -> Result<()> {
    let app = App::new(config);

    let mut terminal = setup_terminal()?;

    // Run with cleanup on panic
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        run_app(&mut terminal, app)
    }));

    // Always restore terminal
    restore_terminal(&mut terminal)?;

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(color_eyre::eyre::eyre!("Application panicked")),
    }
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(terminal: &mut Term, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        if poll(Duration::from_millis(100))? {
            if let Event::Key(key) = read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(msg) = map_key_event(&app, key) {
                        app.update(msg);
                    }
                }
            }
        }

        if let Some(path) = app.pending_open.take() {
            // The editor owns the terminal until it exits.
            restore_terminal(terminal)?;
            let result = crate::cmd::open_in_editor(&app.config, &path)
                .map_err(|e| format!("{e:#}"));
            enable_raw_mode()?;
            execute!(terminal.backend_mut(), EnterAlternateScreen)?;
            terminal.clear()?;
            app.editor_closed(&path, result);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
