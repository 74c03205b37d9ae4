//! Results screen: the analysis report.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use finder_core::config::NO_AIRDROP_TASKS_MESSAGE;
use finder_core::AnalysisResult;

use crate::tui::app::App;
use crate::tui::ui::{score_color, verdict_color};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some(result) = app.session.result() else {
        return;
    };

    let star = if app.current_favorited { "★" } else { "☆" };
    let block = Block::default()
        .title(format!(" {} {} ", star, result.project_name))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(score_color(result.score_tier())));

    let paragraph = Paragraph::new(report_lines(result))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));

    frame.render_widget(paragraph, area);
}

fn heading(text: &str) -> Line<'_> {
    Line::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )
}

fn dim(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

/// Styled lines for a full report.
pub fn report_lines(result: &AnalysisResult) -> Vec<Line<'_>> {
    let score_style = Style::default()
        .fg(score_color(result.score_tier()))
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{}/100", result.overall_score), score_style),
            Span::raw("  "),
            Span::styled(
                result.score_rationale.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if !result.twitter_url.is_empty() {
        lines.push(Line::from(vec![dim("X: "), Span::raw(result.twitter_url.as_str())]));
    }

    if let Some(prime) = &result.prime_source {
        lines.push(Line::raw(""));
        lines.push(heading("Prime Source"));
        lines.push(Line::raw(prime.title.as_str()));
        lines.push(Line::from(dim(prime.uri.as_str())));
    }

    lines.push(Line::raw(""));
    lines.push(heading("Founders"));
    if result.founders.is_empty() {
        lines.push(Line::from(dim("No founders identified.")));
    }
    for founder in &result.founders {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", founder.initials()),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(
                founder.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        if !founder.achievements.is_empty() {
            lines.push(Line::raw(format!("     {}", founder.achievements)));
        }
        if !founder.profile_url.is_empty() {
            lines.push(Line::from(vec![Span::raw("     "), dim(founder.profile_url.as_str())]));
        }
    }

    lines.push(Line::raw(""));
    lines.push(heading("Filter Analysis"));
    for filter in &result.filter_analysis {
        lines.push(Line::from(vec![
            Span::styled(
                filter.filter_name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", filter.level),
                Style::default().fg(Color::Black).bg(verdict_color(filter.verdict)),
            ),
        ]));
        lines.push(Line::raw(format!("  {}", filter.description)));
    }

    lines.push(Line::raw(""));
    lines.push(heading("Airdrop Tasks"));
    if result.airdrop_tasks.is_empty() {
        lines.push(Line::from(dim(NO_AIRDROP_TASKS_MESSAGE)));
    }
    for (i, task) in result.airdrop_tasks.iter().enumerate() {
        lines.push(Line::raw(format!("{}. {}", i + 1, task)));
    }

    if !result.grounding_attribution.is_empty() {
        lines.push(Line::raw(""));
        lines.push(heading("Sources"));
        for source in &result.grounding_attribution {
            lines.push(Line::from(vec![
                Span::raw(format!("- {} ", source.title)),
                dim(source.uri.as_str()),
            ]));
        }
    }

    lines
}
