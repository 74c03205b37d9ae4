//! Tab bar component.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Tabs as RataTabs},
};

use finder_core::Screen;

use crate::tui::app::App;

const SCREENS: [Screen; 4] = [
    Screen::Search,
    Screen::Loading,
    Screen::Results,
    Screen::Favorites,
];

/// Render the tab bar. Tabs follow the session; they are not switchable.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let titles: Vec<&str> = SCREENS.iter().map(|s| s.display_name()).collect();
    let current = app.session.screen();
    let selected = SCREENS.iter().position(|s| *s == current).unwrap_or(0);

    let tabs = RataTabs::new(titles)
        .block(
            Block::default()
                .title(" THE FINDER ")
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" | ");

    frame.render_widget(tabs, area);
}
