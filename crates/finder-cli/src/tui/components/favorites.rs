//! Favorites screen: saved projects and the selected report.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::tui::app::App;
use crate::tui::components::results::report_lines;
use crate::tui::ui::score_color;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let favorites = app.session.favorites();

    if favorites.is_empty() {
        let empty = Paragraph::new("You haven't favorited any projects yet.")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(block(" Saved Projects "));
        frame.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = favorites
        .iter()
        .map(|project| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{:>3} ", project.overall_score),
                        Style::default()
                            .fg(score_color(project.score_tier()))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        project.project_name.as_str(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::styled(
                    format!("    {}", project.score_rationale),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block(" Saved Projects "))
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = ListState::default().with_selected(Some(app.selected_favorite));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(project) = favorites.get(app.selected_favorite) {
        let detail = Paragraph::new(report_lines(project))
            .block(block(" Report "))
            .wrap(Wrap { trim: false })
            .scroll((app.scroll_offset, 0));
        frame.render_widget(detail, chunks[1]);
    }
}

fn block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}
