//! Message log
//!
//! Notices and navigation, newest at the bottom.

use std::collections::VecDeque;

use ratatui::{Frame, layout::Rect, text::Line, widgets::Paragraph};

/// Render as many of the latest messages as fit.
pub fn render(frame: &mut Frame, messages: &VecDeque<String>, area: Rect) {
    let skip = messages.len().saturating_sub(usize::from(area.height));
    let lines: Vec<Line> = messages.iter().skip(skip).map(|m| Line::raw(m.as_str())).collect();

    frame.render_widget(Paragraph::new(lines), area);
}
