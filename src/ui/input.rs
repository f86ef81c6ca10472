//! Input line rendering.

use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

use super::theme::COLOR_BORDER;

/// Render the bordered input line and place the terminal cursor after the
/// typed text.
pub fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Message (Enter to send, Ctrl+L to clear, Ctrl+C to quit) ");

    let inner = block.inner(area);
    let paragraph = Paragraph::new(app.input.as_str()).block(block);
    frame.render_widget(paragraph, area);

    if inner.width > 0 {
        let cursor_x = app.input.width() as u16;
        let x = inner.x + cursor_x.min(inner.width.saturating_sub(1));
        frame.set_cursor_position(Position { x, y: inner.y });
    }
}
