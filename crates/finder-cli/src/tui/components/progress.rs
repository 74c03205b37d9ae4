//! Loading screen: spinner and analysis checklist.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::tui::app::{App, ProgressStatus};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Render the progress checklist.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Finding ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner_area);

    let spinner = SPINNER[app.spinner_frame % SPINNER.len()];
    let heading = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", spinner), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("Analyzing: {}", criteria_label(app)),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(heading, chunks[0]);

    let items: Vec<ListItem> = app
        .progress_items
        .iter()
        .map(|item| {
            let (icon_style, label_style) = match item.status {
                ProgressStatus::Pending => (
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::DarkGray),
                ),
                ProgressStatus::InProgress => (
                    Style::default().fg(Color::Yellow),
                    Style::default().fg(Color::Yellow),
                ),
                ProgressStatus::Complete => (
                    Style::default().fg(Color::Green),
                    Style::default().fg(Color::White),
                ),
                ProgressStatus::Failed => (
                    Style::default().fg(Color::Red),
                    Style::default().fg(Color::Red),
                ),
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", item.status.icon()), icon_style),
                Span::styled(item.label.as_str(), label_style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), chunks[1]);
}

fn criteria_label(app: &App) -> String {
    let criteria = app.selection.criteria();
    format!("{} ({})", criteria.mode().label(), criteria.describe())
}
