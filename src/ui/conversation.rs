//! Conversation screen rendering
//!
//! Implements the conversation view with header, messages, streaming
//! indicator, and input line.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::models::Role;

use super::helpers::{inner_rect, SPINNER_FRAMES};
use super::input::render_input;
use super::theme::{
    COLOR_ASSISTANT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_NOTICE, COLOR_USER,
};

/// Render the conversation screen
pub fn render_conversation_screen(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(outer_block, size);

    let inner = inner_rect(size, 1);

    let show_status_line = app.is_streaming() || app.status_notice.is_some();

    if show_status_line {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(5),    // Messages area
                Constraint::Length(1), // Status / streaming indicator
                Constraint::Length(3), // Input area
            ])
            .split(inner);

        render_header(frame, chunks[0], app);
        render_messages_area(frame, chunks[1], app);
        render_status_line(frame, chunks[2], app);
        render_input(frame, chunks[3], app);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(5),    // Messages area
                Constraint::Length(3), // Input area
            ])
            .split(inner);

        render_header(frame, chunks[0], app);
        render_messages_area(frame, chunks[1], app);
        render_input(frame, chunks[2], app);
    }
}

/// Render the title line with the backend URL right-aligned
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            " trickle",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.client.base_url()),
            Style::default().fg(COLOR_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

/// Render the message history, pinned to the bottom
fn render_messages_area(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    for message in app.log.messages() {
        let (label, color) = match message.role {
            Role::User => ("you", COLOR_USER),
            Role::Assistant => ("assistant", COLOR_ASSISTANT),
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("● {}", label),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", message.created_at.format("%H:%M:%S")),
                Style::default().fg(COLOR_DIM),
            ),
        ]));

        let content_lines: Vec<&str> = message.content.split('\n').collect();
        let last = content_lines.len() - 1;
        for (i, content_line) in content_lines.iter().enumerate() {
            let mut text = format!("  {}", content_line);
            // Block cursor on the last line of the in-progress message.
            if message.is_streaming && i == last {
                text.push('▌');
            }
            lines.push(Line::from(text));
        }
        lines.push(Line::from(""));
    }

    // Keep the latest content visible.
    let total = lines.len() as u16;
    let offset = total.saturating_sub(area.height);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(paragraph, area);
}

/// Render the streaming indicator or a transient status notice
fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.is_streaming() {
        let spinner_index = (app.tick_count % SPINNER_FRAMES.len() as u64) as usize;
        let spinner = SPINNER_FRAMES[spinner_index];
        Line::from(Span::styled(
            format!("  {} Responding...", spinner),
            Style::default().fg(COLOR_DIM),
        ))
    } else if let Some(notice) = &app.status_notice {
        Line::from(Span::styled(
            format!("  {}", notice),
            Style::default().fg(COLOR_NOTICE),
        ))
    } else {
        return;
    };

    frame.render_widget(Paragraph::new(line), area);
}
