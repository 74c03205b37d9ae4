//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use finder_core::{Screen, ScoreTier, Verdict};

use super::app::{App, InputMode};
use super::components::{favorites, input, progress, results, search, tabs};

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let banner_height = if app.session.error().is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Tab bar
            Constraint::Length(banner_height), // Error banner
            Constraint::Min(10),               // Screen
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    tabs::render(app, frame, chunks[0]);

    if let Some(error) = app.session.error() {
        render_error_banner(error, frame, chunks[1]);
    }

    match app.session.screen() {
        Screen::Search => render_search(app, frame, chunks[2]),
        Screen::Loading => progress::render(app, frame, chunks[2]),
        Screen::Results => results::render(app, frame, chunks[2]),
        Screen::Favorites => favorites::render(app, frame, chunks[2]),
    }

    render_status_bar(app, frame, chunks[3]);
}

fn render_search(app: &App, frame: &mut Frame, area: Rect) {
    if app.input_mode == InputMode::Editing {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(3)])
            .split(area);
        search::render(app, frame, chunks[0]);
        input::render(app, frame, chunks[1]);
    } else {
        search::render(app, frame, area);
    }
}

fn render_error_banner(error: &str, frame: &mut Frame, area: Rect) {
    let banner = Paragraph::new(error)
        .style(Style::default().fg(Color::White).bg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error  [Esc] dismiss "),
        );
    frame.render_widget(banner, area);
}

/// Render the status bar.
fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let keys = match (app.session.screen(), app.input_mode) {
        (_, InputMode::Editing) => "[Enter] Add  [Esc] Cancel",
        (Screen::Search, _) => {
            "[Tab] Mode  [←/→] Select  [Space] Toggle  [a] Add  [Enter] Find  [f] Favorites  [q] Quit"
        }
        (Screen::Loading, _) => "Our AI is scanning the web...  [q] Quit",
        (Screen::Results, _) => "[s] Favorite  [o] X profile  [p] Prime source  [j/k] Scroll  [b] Back",
        (Screen::Favorites, _) => "[j/k] Select  [d] Remove  [o] X profile  [b] Back",
    };

    let info = app
        .status_message
        .clone()
        .unwrap_or_else(|| app.current_model());

    let status_bar = Paragraph::new(format!("{}  |  {}", keys, info))
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}

/// Colour for an overall score.
pub fn score_color(tier: ScoreTier) -> Color {
    match tier {
        ScoreTier::High => Color::Green,
        ScoreTier::Medium => Color::Yellow,
        ScoreTier::Low => Color::Red,
    }
}

/// Colour for a filter verdict.
pub fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Positive => Color::Green,
        Verdict::Negative => Color::Red,
        Verdict::Neutral => Color::Gray,
    }
}
