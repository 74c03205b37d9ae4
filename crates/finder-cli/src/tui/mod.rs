//! Interactive terminal UI for Finder.
//!
//! Four screens driven by [`finder_core::Session`]:
//! - Search: pick a risk profile or custom filters
//! - Loading: progress of the running analysis
//! - Results: the analysis report, with favoriting
//! - Favorites: saved projects

mod app;
mod components;
mod event;
mod ui;

use color_eyre::eyre::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;

use app::App;
use finder_core::{Config, FavoritesRepository};

/// Run the TUI application.
pub async fn run(config: Config, favorites: Box<dyn FavoritesRepository>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, favorites);
    let result = app.run(&mut terminal).await;

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
