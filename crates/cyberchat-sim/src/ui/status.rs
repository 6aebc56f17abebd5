//! Status line
//!
//! Displays the gate status and the adapter state behind it.

use cyberchat_gate::{GateStatus, GateView};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status line.
pub fn render(frame: &mut Frame, view: Option<&GateView>, area: Rect) {
    let Some(view) = view else {
        frame.render_widget(Paragraph::new("Starting..."), area);
        return;
    };

    let color = match view.status {
        GateStatus::Error => Color::Red,
        GateStatus::Offline => Color::Yellow,
        GateStatus::Online => Color::Green,
    };

    let status_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(view.status.to_string(), status_style),
        Span::raw("  "),
        Span::styled(view.adapter.label(), Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}
