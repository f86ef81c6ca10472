//! Terminal UI rendering.
//!
//! Consumes the message log snapshot and the in-progress indicator; never
//! mutates application state.

mod conversation;
mod helpers;
mod input;
mod theme;

use ratatui::Frame;

use crate::app::App;

pub use helpers::SPINNER_FRAMES;

/// Render the whole UI for one frame.
pub fn render(frame: &mut Frame, app: &App) {
    conversation::render_conversation_screen(frame, app);
}
