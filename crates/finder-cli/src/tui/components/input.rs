//! Input field for a new custom filter.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tui::app::App;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Add a new filter ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Yellow));

    let inner_area = block.inner(area);

    let input = Paragraph::new(format!("{}_", app.input_buffer))
        .style(Style::default().fg(Color::White))
        .block(block);

    frame.render_widget(input, area);

    let cursor_x = inner_area.x + app.input_buffer.chars().count() as u16;
    frame.set_cursor_position(Position::new(cursor_x, inner_area.y));
}
