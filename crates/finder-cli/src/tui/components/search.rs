//! Search screen: mode toggle, risk profile and custom filters.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use finder_core::{FilterMode, RiskLevel};

use crate::tui::app::App;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" AI-Powered Project Discovery ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let selection = &app.selection;
    let mut lines = vec![mode_line(selection.mode), Line::raw("")];

    match selection.mode {
        FilterMode::Default => {
            lines.push(Line::styled(
                "Choose Your Risk Profile",
                Style::default().fg(Color::Cyan),
            ));
            lines.push(risk_line(selection.risk_level));
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!(
                    "Scored out of {}; above {} is \"{}\".",
                    selection.risk_level.max_score(),
                    selection.risk_level.pass_threshold(),
                    selection.risk_level.pass_label()
                ),
                Style::default().fg(Color::DarkGray),
            ));
        }
        FilterMode::Custom => {
            lines.push(Line::styled(
                "Select & Add Custom Filters",
                Style::default().fg(Color::Cyan),
            ));
            lines.push(suggestion_line(app));
            lines.push(Line::raw(""));

            if selection.filters().is_empty() {
                lines.push(Line::styled(
                    "No filters selected. Press [a] to add one.",
                    Style::default().fg(Color::Red),
                ));
            }
            for filter in selection.filters() {
                lines.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(Color::Blue)),
                    Span::raw(filter.as_str()),
                ]));
            }
        }
    }

    lines.push(Line::raw(""));
    let submit_style = if selection.can_submit(app.session.is_loading()) {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::styled(" FIND ME A PROJECT [Enter] ", submit_style));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn mode_line(mode: FilterMode) -> Line<'static> {
    let spans = [FilterMode::Default, FilterMode::Custom]
        .into_iter()
        .map(|m| {
            let style = if m == mode {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!(" {} ", m.label()), style)
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn risk_line(selected: RiskLevel) -> Line<'static> {
    let mut spans = Vec::new();
    for level in RiskLevel::ALL {
        let color = match level {
            RiskLevel::Safest => Color::Green,
            RiskLevel::Moderate => Color::Yellow,
            RiskLevel::Risky => Color::Red,
        };
        let style = if level == selected {
            Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        spans.push(Span::styled(format!(" {} ", level), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn suggestion_line(app: &App) -> Line<'_> {
    let mut spans = Vec::new();
    for (i, suggestion) in app.selection.suggestions().iter().enumerate() {
        let mut style = if app.selection.is_selected(suggestion) {
            Style::default().fg(Color::White).bg(Color::Blue)
        } else {
            Style::default().fg(Color::Gray)
        };
        if i == app.selected_suggestion {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} ", suggestion), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
