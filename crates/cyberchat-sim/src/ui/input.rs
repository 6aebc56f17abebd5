//! Input line
//!
//! Displays the typed line behind a prompt that changes while a dialog is
//! up.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::screen::Screen;

/// Render the input line and place the cursor after the typed text.
pub fn render(frame: &mut Frame, screen: &Screen, area: Rect) {
    let text = format!("{}{}", screen.prompt(), screen.input());
    let cursor_offset = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);

    frame.render_widget(Paragraph::new(text).style(Style::default().fg(Color::White)), area);

    let max_x = area.x.saturating_add(area.width).saturating_sub(1);
    let cursor_x = area.x.saturating_add(cursor_offset).min(max_x);
    frame.set_cursor_position((cursor_x, area.y));
}
