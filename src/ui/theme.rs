//! Color constants for the UI.
//!
//! Minimal dark palette.

use ratatui::style::Color;

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// User message label
pub const COLOR_USER: Color = Color::Cyan;

/// Assistant message label
pub const COLOR_ASSISTANT: Color = Color::LightGreen;

/// Status notices (send rejected while busy)
pub const COLOR_NOTICE: Color = Color::Yellow;
